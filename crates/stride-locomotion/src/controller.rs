//! Frame-stepped locomotion controller
//!
//! One `step` runs the whole pipeline in a fixed order:
//! look, crouch gate, sprint gate, planar velocity, move, gravity, jump,
//! stamina, pose blend. Animation flags are derived from the result.

use crate::environment::{AnimationFlags, AnimationSink, Environment};
use crate::input::FrameInput;
use crate::profile::Profile;
use crate::spine::SpineRig;
use crate::state::LocomotionState;
use stride_core::{Quat, Vec2, Vec3};

/// Move input at or below this magnitude counts as no input
pub const DEAD_ZONE: f32 = 0.1;

/// Vertical speed a grounded, falling character is reset to each frame
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Smallest applied translation that counts as having moved
const MIN_DISPLACEMENT: f32 = 1e-4;

/// Per-player locomotion controller
#[derive(Debug, Clone)]
pub struct LocomotionController {
    profile: Profile,
    state: LocomotionState,
    spine: Option<SpineRig>,
}

/// Everything a frame produced, for the caller and the animation sink
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Translation the environment actually applied
    pub translation: Vec3,
    pub grounded: bool,
    pub planar_speed: f32,
    pub vertical_velocity: f32,
    pub stamina: f32,
    pub body_height: f32,
    pub camera_height: f32,
    pub pitch: f32,
    pub yaw: f32,
    /// Camera orientation relative to the body
    pub camera_rotation: Quat,
    pub body_rotation: Quat,
    pub flags: AnimationFlags,
    /// Spine bone rotations, empty without a rig
    pub spine: Vec<Quat>,
}

impl StepReport {
    /// Forward this frame's cosmetic output to an animation sink
    pub fn publish(&self, sink: &mut dyn AnimationSink) {
        sink.set_flags(self.flags);
        sink.set_camera(self.camera_height, self.camera_rotation);
        sink.set_body_rotation(self.body_rotation);
        if !self.spine.is_empty() {
            sink.set_spine(&self.spine);
        }
    }
}

impl LocomotionController {
    pub fn new(profile: Profile) -> Self {
        let state = LocomotionState::new(&profile);
        Self {
            profile,
            state,
            spine: None,
        }
    }

    /// Attach a spine chain to bend with look pitch
    pub fn with_spine(mut self, rig: SpineRig) -> Self {
        self.spine = Some(rig);
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Swap the profile between frames. Stamina is re-clamped to the new max.
    pub fn set_profile(&mut self, profile: Profile) {
        self.state.stamina = self.state.stamina.clamp(0.0, profile.max_stamina);
        self.profile = profile;
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn spine(&self) -> Option<&SpineRig> {
        self.spine.as_ref()
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// A `dt` that is zero, negative or not finite leaves every state field
    /// untouched and does not move the environment.
    pub fn step<E: Environment + ?Sized>(
        &mut self,
        dt: f32,
        input: &FrameInput,
        env: &mut E,
    ) -> StepReport {
        if !(dt.is_finite() && dt > 0.0) {
            return self.report(Vec3::ZERO, has_move_input(input.move_input));
        }

        let profile = &self.profile;
        let state = &mut self.state;
        let moving = has_move_input(input.move_input);

        if input.jump_requested {
            state.jump_latched = true;
        }

        update_look(state, profile, input.look_input);
        update_crouch(state, profile, input.crouch_held, &*env);

        let grounded = env.is_grounded();
        update_sprint(state, input.sprint_held, grounded);
        integrate_planar(state, profile, input.move_input, grounded, dt);

        let outcome = env.move_by(state.velocity() * dt);
        state.grounded = outcome.grounded;

        apply_gravity(state, profile, dt);
        resolve_jump(state, profile, &*env);
        update_stamina(state, profile, outcome.translation, dt);
        blend_pose(state, profile, dt);
        env.resize(state.body_height);

        self.report(outcome.translation, moving)
    }

    fn report(&self, translation: Vec3, moving: bool) -> StepReport {
        let state = &self.state;
        StepReport {
            translation,
            grounded: state.grounded,
            planar_speed: state.planar_speed(),
            vertical_velocity: state.vertical_velocity,
            stamina: state.stamina,
            body_height: state.body_height,
            camera_height: state.camera_height,
            pitch: state.pitch,
            yaw: state.yaw,
            camera_rotation: state.camera_rotation(),
            body_rotation: state.body_rotation(),
            flags: AnimationFlags::derive(
                moving,
                state.grounded,
                state.is_sprinting,
                state.is_crouching,
            ),
            spine: self
                .spine
                .as_ref()
                .map(|rig| rig.pose(state.pitch, self.profile.max_spine_bend))
                .unwrap_or_default(),
        }
    }
}

fn has_move_input(move_input: Vec2) -> bool {
    move_input.length() > DEAD_ZONE
}

fn update_look(state: &mut LocomotionState, profile: &Profile, look: Vec2) {
    state.yaw += look.x * profile.mouse_sensitivity;
    state.pitch = (state.pitch - look.y * profile.mouse_sensitivity).clamp(-90.0, 90.0);
}

/// Crouch starts on press; standing back up waits for headroom.
fn update_crouch<E: Environment + ?Sized>(
    state: &mut LocomotionState,
    profile: &Profile,
    crouch_held: bool,
    env: &E,
) {
    if crouch_held {
        if !state.is_crouching {
            log::debug!("crouch: enter");
            state.is_crouching = true;
        }
    } else if state.is_crouching {
        if env.probe_headroom(state.body_height, profile.stand_height, profile.body_radius) {
            log::debug!("crouch: leave");
            state.is_crouching = false;
        } else {
            log::trace!("crouch: stand blocked by geometry above");
        }
    }
}

/// Crouching cancels a sprint in progress as well as blocking entry.
fn update_sprint(state: &mut LocomotionState, sprint_held: bool, grounded: bool) {
    if state.is_sprinting {
        if !sprint_held || state.stamina <= 0.0 || state.is_crouching {
            log::debug!(
                "sprint: stop (held={}, stamina={:.2}, crouching={})",
                sprint_held,
                state.stamina,
                state.is_crouching
            );
            state.is_sprinting = false;
        }
    } else if sprint_held && state.stamina > 0.0 && grounded && !state.is_crouching {
        log::debug!("sprint: start");
        state.is_sprinting = true;
    }
}

fn target_speed(state: &LocomotionState, profile: &Profile) -> f32 {
    if state.is_crouching {
        profile.max_crouch_speed
    } else if state.is_sprinting {
        profile.max_sprint_speed
    } else {
        profile.max_walk_speed
    }
}

fn desired_velocity(state: &LocomotionState, profile: &Profile, move_input: Vec2) -> Vec3 {
    if !has_move_input(move_input) {
        return Vec3::ZERO;
    }
    let dir = move_input.normalized();
    let (forward, right) = state.heading_axes();
    (right * dir.x + forward * dir.y) * target_speed(state, profile)
}

/// Linear approach toward the desired velocity; never overshoots.
fn integrate_planar(
    state: &mut LocomotionState,
    profile: &Profile,
    move_input: Vec2,
    grounded: bool,
    dt: f32,
) {
    let desired = desired_velocity(state, profile, move_input);

    let rate = if has_move_input(move_input) {
        if grounded && state.planar_velocity.dot(&desired) < 0.0 {
            profile.ground_deceleration
        } else if grounded {
            profile.ground_acceleration
        } else {
            profile.air_acceleration
        }
    } else if grounded {
        profile.ground_deceleration
    } else {
        profile.air_deceleration
    };

    state.planar_velocity = state.planar_velocity.move_towards(desired, rate * dt);
}

fn apply_gravity(state: &mut LocomotionState, profile: &Profile, dt: f32) {
    if state.grounded && state.vertical_velocity < 0.0 {
        state.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
    }
    state.vertical_velocity += profile.gravity * dt;
}

/// Launch speed that peaks at `jump_height` under `gravity`
fn launch_speed(profile: &Profile) -> f32 {
    (profile.jump_height * -2.0 * profile.gravity).max(0.0).sqrt()
}

fn resolve_jump<E: Environment + ?Sized>(state: &mut LocomotionState, profile: &Profile, env: &E) {
    if !state.jump_latched {
        return;
    }
    if state.grounded {
        state.jump_latched = false;
        state.vertical_velocity = launch_speed(profile);
        log::debug!("jump: launch at {:.3} m/s", state.vertical_velocity);
    } else if env.cast_down(profile.ground_probe_range) > profile.jump_clear_distance {
        state.jump_latched = false;
        log::debug!("jump: request dropped, too far above ground");
    }
}

/// Drain only while sprinting and actually displaced, so sprinting into a
/// wall costs nothing. Running dry ends the sprint in the same frame.
fn update_stamina(state: &mut LocomotionState, profile: &Profile, translation: Vec3, dt: f32) {
    let moved = translation.length() > MIN_DISPLACEMENT;
    if state.is_sprinting && moved {
        state.stamina = (state.stamina - profile.stamina_drain_rate * dt).max(0.0);
        if state.stamina <= 0.0 {
            log::debug!("sprint: stop, stamina exhausted");
            state.is_sprinting = false;
        }
    } else {
        state.stamina = (state.stamina + profile.stamina_regen_rate * dt).min(profile.max_stamina);
    }
}

/// Exponential approach toward the stance targets, resumable mid-transition.
fn blend_pose(state: &mut LocomotionState, profile: &Profile, dt: f32) {
    let (height, camera) = if state.is_crouching {
        (profile.crouch_height, profile.crouch_camera_height)
    } else {
        (profile.stand_height, profile.stand_camera_height)
    };
    let alpha = 1.0 - (-profile.crouch_transition_speed * dt).exp();
    state.body_height += (height - state.body_height) * alpha;
    state.camera_height += (camera - state.camera_height) * alpha;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spine::SpineRig;
    use crate::testing::{RecordingSink, ScriptedEnvironment};

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    fn controller() -> LocomotionController {
        LocomotionController::new(Profile::default())
    }

    fn forward() -> FrameInput {
        FrameInput::new().with_move(0.0, 1.0)
    }

    #[test]
    fn test_walk_scenario_single_step() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let report = ctl.step(0.1, &forward(), &mut env);

        assert!(approx(report.planar_speed, 3.0, 1e-4));
        let v = ctl.state().planar_velocity;
        assert!(approx(v.z, -3.0, 1e-4));
        assert!(approx(v.x, 0.0, 1e-6));
        assert!(report.flags.walking);
    }

    #[test]
    fn test_acceleration_never_overshoots() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let dt = 0.02;
        for n in 1..=20 {
            ctl.step(dt, &forward(), &mut env);
            let expected = (n as f32 * 30.0 * dt).min(4.0);
            assert!(
                approx(ctl.state().planar_speed(), expected, 1e-3),
                "step {n}: {} vs {expected}",
                ctl.state().planar_speed()
            );
        }
    }

    #[test]
    fn test_sprint_speed_target() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let input = forward().with_sprint(true);
        for _ in 0..60 {
            ctl.step(0.05, &input, &mut env);
        }
        assert!(ctl.state().is_sprinting);
        assert!(approx(ctl.state().planar_speed(), 6.0, 1e-4));
    }

    #[test]
    fn test_dead_zone_input_is_no_input() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let report = ctl.step(0.1, &FrameInput::new().with_move(0.05, 0.05), &mut env);
        assert_eq!(report.planar_speed, 0.0);
        assert!(!report.flags.walking);
    }

    #[test]
    fn test_release_decelerates_to_rest() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..10 {
            ctl.step(0.1, &forward(), &mut env);
        }
        assert!(approx(ctl.state().planar_speed(), 4.0, 1e-4));

        // 75 m/s² ground deceleration stops 4 m/s within one 0.1 s frame
        ctl.step(0.1, &FrameInput::new(), &mut env);
        assert_eq!(ctl.state().planar_speed(), 0.0);
    }

    #[test]
    fn test_air_deceleration_is_gentler() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..10 {
            ctl.step(0.1, &forward(), &mut env);
        }
        env.grounded = false;
        env.ground_distance = 2.0;
        ctl.step(0.1, &FrameInput::new(), &mut env);
        assert!(approx(ctl.state().planar_speed(), 3.0, 1e-4));
    }

    #[test]
    fn test_reversal_brakes_with_ground_deceleration() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..10 {
            ctl.step(0.1, &forward(), &mut env);
        }
        // Velocity is (0,0,-4); reversing picks the 75 m/s² braking rate
        ctl.step(0.02, &FrameInput::new().with_move(0.0, -1.0), &mut env);
        assert!(approx(ctl.state().planar_velocity.z, -2.5, 1e-4));
    }

    #[test]
    fn test_air_control_uses_air_acceleration() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::airborne(3.0);
        ctl.step(0.1, &forward(), &mut env);
        assert!(approx(ctl.state().planar_speed(), 1.5, 1e-4));
    }

    #[test]
    fn test_move_follows_yaw() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        // 900 units of look at 0.1 sensitivity is a 90 degree turn right
        ctl.step(0.1, &forward().with_look(900.0, 0.0), &mut env);
        let v = ctl.state().planar_velocity;
        assert!(approx(ctl.state().yaw, 90.0, 1e-4));
        assert!(approx(v.x, 3.0, 1e-3));
        assert!(approx(v.z, 0.0, 1e-3));
    }

    #[test]
    fn test_pitch_clamped_and_yaw_unbounded() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..10 {
            ctl.step(0.016, &FrameInput::new().with_look(1000.0, -1000.0), &mut env);
        }
        assert_eq!(ctl.state().pitch, 90.0);
        assert!(approx(ctl.state().yaw, 1000.0, 1e-2));

        ctl.step(0.016, &FrameInput::new().with_look(0.0, 5000.0), &mut env);
        assert_eq!(ctl.state().pitch, -90.0);
    }

    #[test]
    fn test_jump_launch_speed() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        ctl.step(0.016, &FrameInput::new().with_jump(true), &mut env);
        assert!(approx(ctl.state().vertical_velocity, 4.429, 1e-3));
        assert!(!ctl.state().jump_latched);
    }

    #[test]
    fn test_jump_latch_survives_until_landing() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::airborne(0.1);
        ctl.step(0.016, &FrameInput::new().with_jump(true), &mut env);
        assert!(ctl.state().jump_latched);

        env.grounded = true;
        env.ground_distance = 0.0;
        ctl.step(0.016, &FrameInput::new(), &mut env);
        assert!(!ctl.state().jump_latched);
        assert!(approx(ctl.state().vertical_velocity, 4.429, 1e-3));
    }

    #[test]
    fn test_jump_latch_dropped_high_above_ground() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::airborne(2.0);
        ctl.step(0.016, &FrameInput::new().with_jump(true), &mut env);
        assert!(!ctl.state().jump_latched);

        env.grounded = true;
        ctl.step(0.016, &FrameInput::new(), &mut env);
        assert!(ctl.state().vertical_velocity < 0.0);
    }

    #[test]
    fn test_jump_latch_dropped_when_no_ground_in_range() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::airborne(f32::INFINITY);
        ctl.step(0.016, &FrameInput::new().with_jump(true), &mut env);
        assert!(!ctl.state().jump_latched);
    }

    #[test]
    fn test_grounded_fall_speed_resets() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..100 {
            ctl.step(0.05, &FrameInput::new(), &mut env);
        }
        let expected = GROUNDED_VERTICAL_VELOCITY + -9.81 * 0.05;
        assert!(approx(ctl.state().vertical_velocity, expected, 1e-4));
    }

    #[test]
    fn test_airborne_accumulates_gravity() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::airborne(10.0);
        for _ in 0..10 {
            ctl.step(0.1, &FrameInput::new(), &mut env);
        }
        assert!(approx(ctl.state().vertical_velocity, -9.81, 1e-3));
        let report = ctl.step(0.1, &FrameInput::new(), &mut env);
        assert!(report.flags.jumping);
    }

    #[test]
    fn test_move_delta_combines_planar_and_vertical() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        ctl.step(0.1, &forward(), &mut env);
        let delta = env.moves[0];
        assert!(approx(delta.z, -0.3, 1e-4));
        assert!(approx(delta.y, 0.0, 1e-6));

        ctl.step(0.1, &forward(), &mut env);
        // After the first frame the vertical velocity is 0 + g * dt
        assert!(approx(env.moves[1].y, -0.0981, 1e-4));
    }

    #[test]
    fn test_sprint_blocked_while_crouching() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let input = forward().with_sprint(true).with_crouch(true);
        for _ in 0..20 {
            let report = ctl.step(0.05, &input, &mut env);
            assert!(!ctl.state().is_sprinting);
            assert!(!report.flags.running);
            assert!(report.flags.crouch_walking);
        }
        assert!(approx(ctl.state().planar_speed(), 1.5, 1e-4));
    }

    #[test]
    fn test_crouch_cancels_sprint_in_progress() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        ctl.step(0.05, &forward().with_sprint(true), &mut env);
        assert!(ctl.state().is_sprinting);

        ctl.step(0.05, &forward().with_sprint(true).with_crouch(true), &mut env);
        assert!(ctl.state().is_crouching);
        assert!(!ctl.state().is_sprinting);
    }

    #[test]
    fn test_sprint_requires_ground_to_start() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::airborne(1.0);
        ctl.step(0.05, &forward().with_sprint(true), &mut env);
        assert!(!ctl.state().is_sprinting);
    }

    #[test]
    fn test_sprint_continues_in_air() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        ctl.step(0.05, &forward().with_sprint(true), &mut env);
        env.grounded = false;
        env.ground_distance = 1.0;
        ctl.step(0.05, &forward().with_sprint(true), &mut env);
        assert!(ctl.state().is_sprinting);
    }

    #[test]
    fn test_sprint_release_stops_sprint() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        ctl.step(0.05, &forward().with_sprint(true), &mut env);
        ctl.step(0.05, &forward(), &mut env);
        assert!(!ctl.state().is_sprinting);
    }

    #[test]
    fn test_stamina_exhaustion_ends_sprint() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let input = forward().with_sprint(true);
        ctl.step(0.1, &input, &mut env);
        assert!(ctl.state().is_sprinting);

        ctl.state.stamina = 0.05;
        ctl.step(0.1, &input, &mut env);
        assert_eq!(ctl.state().stamina, 0.0);
        assert!(!ctl.state().is_sprinting);

        // Empty tank: sprint stays off while stamina regenerates
        ctl.step(0.1, &input, &mut env);
        assert!(!ctl.state().is_sprinting);
        assert!(ctl.state().stamina > 0.0);
    }

    #[test]
    fn test_sprint_needs_stamina_to_start() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let input = forward().with_sprint(true);
        ctl.state.stamina = 0.0;

        ctl.step(0.1, &input, &mut env);
        assert!(!ctl.state().is_sprinting);
        assert!(approx(ctl.state().stamina, 0.25, 1e-5));

        // Short frame so the drain does not empty the tank again
        ctl.step(0.01, &input, &mut env);
        assert!(ctl.state().is_sprinting);
        assert!(ctl.state().stamina > 0.0);
    }

    #[test]
    fn test_stamina_not_drained_against_wall() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        env.blocked = true;
        let input = forward().with_sprint(true);
        ctl.step(0.1, &input, &mut env);
        assert!(ctl.state().is_sprinting);
        assert_eq!(ctl.state().stamina, ctl.profile().max_stamina);
    }

    #[test]
    fn test_stamina_drains_then_regenerates() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..10 {
            ctl.step(0.1, &forward().with_sprint(true), &mut env);
        }
        assert!(approx(ctl.state().stamina, 85.0, 1e-3));

        ctl.step(0.1, &forward(), &mut env);
        assert!(approx(ctl.state().stamina, 85.25, 1e-3));
    }

    #[test]
    fn test_stamina_stays_in_range() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let frames = [
            (0.5, forward().with_sprint(true)),
            (3.0, forward().with_sprint(true)),
            (10.0, forward()),
            (0.0, forward().with_sprint(true)),
            (100.0, FrameInput::new()),
            (7.5, forward().with_sprint(true)),
        ];
        for _ in 0..5 {
            for (dt, input) in &frames {
                ctl.step(*dt, input, &mut env);
                let stamina = ctl.state().stamina;
                assert!((0.0..=ctl.profile().max_stamina).contains(&stamina));
            }
        }
    }

    #[test]
    fn test_crouch_is_immediate_and_height_blends() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        let report = ctl.step(0.05, &FrameInput::new().with_crouch(true), &mut env);
        assert!(ctl.state().is_crouching);
        assert!(report.flags.crouching);
        // Blended, not snapped
        assert!(report.body_height < 1.8 && report.body_height > 1.0);
        assert_eq!(env.last_height, Some(report.body_height));

        for _ in 0..200 {
            ctl.step(0.05, &FrameInput::new().with_crouch(true), &mut env);
        }
        assert!(approx(ctl.state().body_height, 1.0, 1e-3));
        assert!(approx(ctl.state().camera_height, 0.9, 1e-3));
    }

    #[test]
    fn test_crouch_blend_is_resumable() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        ctl.step(0.05, &FrameInput::new().with_crouch(true), &mut env);
        let mid = ctl.state().body_height;
        ctl.step(0.05, &FrameInput::new(), &mut env);
        let back = ctl.state().body_height;
        assert!(back > mid && back < 1.8);
    }

    #[test]
    fn test_crouch_release_waits_for_headroom() {
        let mut ctl = controller();
        let mut env = ScriptedEnvironment::grounded();
        env.headroom = false;
        ctl.step(0.05, &FrameInput::new().with_crouch(true), &mut env);
        for _ in 0..500 {
            ctl.step(0.05, &FrameInput::new(), &mut env);
            assert!(ctl.state().is_crouching);
        }
        assert_eq!(env.headroom_probes.get(), 500);

        env.headroom = true;
        ctl.step(0.05, &FrameInput::new(), &mut env);
        assert!(!ctl.state().is_crouching);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut ctl = controller().with_spine(SpineRig::from_names(["a", "b"]));
        let mut env = ScriptedEnvironment::grounded();
        for _ in 0..5 {
            ctl.step(0.1, &forward().with_sprint(true), &mut env);
        }
        let before = ctl.state().clone();
        let input = FrameInput::new()
            .with_move(1.0, 0.0)
            .with_look(50.0, 50.0)
            .with_jump(true)
            .with_crouch(true);
        let report = ctl.step(0.0, &input, &mut env);
        assert_eq!(ctl.state(), &before);
        assert_eq!(report.translation, Vec3::ZERO);
        assert_eq!(env.moves.len(), 5);

        ctl.step(f32::NAN, &input, &mut env);
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn test_report_publishes_to_sink() {
        let mut ctl = controller().with_spine(SpineRig::from_names(["a", "b", "c"]));
        let mut env = ScriptedEnvironment::grounded();
        let report = ctl.step(0.1, &forward().with_look(0.0, -450.0), &mut env);
        assert!(approx(report.pitch, 45.0, 1e-4));

        let mut sink = RecordingSink::default();
        report.publish(&mut sink);
        assert_eq!(sink.flags, Some(report.flags));
        let (height, rotation) = sink.camera.unwrap();
        assert_eq!(height, report.camera_height);
        assert_eq!(rotation, ctl.state().camera_rotation());
        assert_eq!(sink.body, Some(ctl.state().body_rotation()));
        assert_eq!(sink.spine.len(), 3);
    }

    #[test]
    fn test_set_profile_reclamps_stamina() {
        let mut ctl = controller();
        let mut profile = Profile::default();
        profile.max_stamina = 40.0;
        ctl.set_profile(profile);
        assert_eq!(ctl.state().stamina, 40.0);
    }
}
