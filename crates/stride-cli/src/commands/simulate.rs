//! Scenario simulation command

use crate::scenario::Scenario;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use stride_core::{Quat, Vec3};
use stride_locomotion::{AnimationFlags, AnimationSink, Profile, StepReport};
use stride_physics::PlayerSystem;
use stride_runtime::{GameClock, RuntimeSystem};

/// Profile picked up from the working directory when `--profile` is omitted
pub const DEFAULT_PROFILE: &str = "stride.toml";

pub struct SimulateArgs {
    pub scenario: String,
    pub profile: Option<String>,
    pub format: String,
    pub every: u32,
    pub max_dt: f64,
}

/// One sampled frame
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub frame: u64,
    pub time: f64,
    pub segment: String,
    pub position: [f32; 3],
    pub planar_speed: f32,
    pub vertical_velocity: f32,
    pub stamina: f32,
    pub body_height: f32,
    pub camera_height: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub grounded: bool,
    pub sprinting: bool,
    pub crouching: bool,
    pub flags: AnimationFlags,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spine: Vec<[f32; 4]>,
}

/// Frames spent in each animation state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagFrames {
    pub walking: u64,
    pub running: u64,
    pub jumping: u64,
    pub crouching: u64,
    pub crouch_walking: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub scenario: String,
    pub frames: u64,
    pub time: f64,
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub distance: f32,
    pub max_planar_speed: f32,
    pub min_stamina: f32,
    pub peak_height: f32,
    pub flag_frames: FlagFrames,
}

#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub samples: Vec<Sample>,
    pub summary: Summary,
}

/// Animation sink that tallies flag frames and logs state changes
#[derive(Default)]
struct FlagTracker {
    current: Option<AnimationFlags>,
    frames: FlagFrames,
}

impl AnimationSink for FlagTracker {
    fn set_flags(&mut self, flags: AnimationFlags) {
        if self.current != Some(flags) {
            log::debug!("animation flags changed: {:?}", flags);
            self.current = Some(flags);
        }
        self.frames.walking += flags.walking as u64;
        self.frames.running += flags.running as u64;
        self.frames.jumping += flags.jumping as u64;
        self.frames.crouching += flags.crouching as u64;
        self.frames.crouch_walking += flags.crouch_walking as u64;
    }

    fn set_camera(&mut self, _height: f32, _rotation: Quat) {}
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.every == 0 {
        bail!("--every must be at least 1");
    }

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario {}", args.scenario))?;
    let profile = match &args.profile {
        Some(path) => {
            Profile::load(path).with_context(|| format!("Failed to load profile {}", path))?
        }
        None => Profile::load_or_default(DEFAULT_PROFILE)
            .with_context(|| format!("Failed to load profile {}", DEFAULT_PROFILE))?,
    };

    let simulation = simulate(&scenario, profile, args.every, args.max_dt)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&simulation)?),
        _ => print_text(&simulation),
    }
    Ok(())
}

/// Run every segment of a scenario and collect samples plus a summary
pub fn simulate(scenario: &Scenario, profile: Profile, every: u32, max_dt: f64) -> Result<Simulation> {
    let every = every.max(1) as u64;
    let mut system = PlayerSystem::new(scenario.build_world(), profile, scenario.spawn());
    if let Some(rig) = scenario.spine_rig() {
        system = system.with_spine(rig);
    }
    system.initialize()?;

    let mut clock = GameClock::with_max_delta(max_dt);
    let mut tracker = FlagTracker::default();
    let mut samples = Vec::new();

    let start = system.position();
    let mut max_planar_speed: f32 = 0.0;
    let mut min_stamina = system.controller.state().stamina;
    let mut peak_height = start.y;

    log::info!(
        "Simulating '{}': {} segment(s), {} frame(s)",
        scenario.name,
        scenario.segments.len(),
        scenario.total_frames()
    );

    for segment in &scenario.segments {
        log::debug!("segment '{}' for {} frame(s)", segment.label, segment.frames);
        let dt = scenario.segment_dt(segment);
        for index in 0..segment.frames {
            clock.advance(dt);
            system.set_input(segment.input(index));
            system.update(clock.delta_time)?;

            let position = system.position();
            let Some(report) = system.last_report() else {
                continue;
            };
            report.publish(&mut tracker);

            max_planar_speed = max_planar_speed.max(report.planar_speed);
            min_stamina = min_stamina.min(report.stamina);
            peak_height = peak_height.max(position.y);

            if clock.frame % every == 0 {
                let state = system.controller.state();
                samples.push(sample(
                    clock.frame,
                    clock.total_time,
                    &segment.label,
                    position,
                    report,
                    state.is_sprinting,
                    state.is_crouching,
                ));
            }
        }
    }

    system.shutdown()?;

    let end = system.position();
    let summary = Summary {
        scenario: scenario.name.clone(),
        frames: clock.frame,
        time: clock.total_time,
        start: start.to_array(),
        end: end.to_array(),
        distance: (end - start).length(),
        max_planar_speed,
        min_stamina,
        peak_height,
        flag_frames: tracker.frames,
    };

    Ok(Simulation { samples, summary })
}

fn sample(
    frame: u64,
    time: f64,
    segment: &str,
    position: Vec3,
    report: &StepReport,
    sprinting: bool,
    crouching: bool,
) -> Sample {
    Sample {
        frame,
        time,
        segment: segment.to_string(),
        position: position.to_array(),
        planar_speed: report.planar_speed,
        vertical_velocity: report.vertical_velocity,
        stamina: report.stamina,
        body_height: report.body_height,
        camera_height: report.camera_height,
        pitch: report.pitch,
        yaw: report.yaw,
        grounded: report.grounded,
        sprinting,
        crouching,
        flags: report.flags,
        spine: report.spine.iter().map(|q| q.to_array()).collect(),
    }
}

fn print_text(simulation: &Simulation) {
    println!(
        "{:>6} {:>7}  {:<10} {:>24} {:>6} {:>7} {:>6} {:>5}  state",
        "frame", "time", "segment", "position", "speed", "vert", "stam", "h"
    );
    for s in &simulation.samples {
        let position = format!(
            "({:.2}, {:.2}, {:.2})",
            s.position[0], s.position[1], s.position[2]
        );
        println!(
            "{:>6} {:>7.3}  {:<10} {:>24} {:>6.2} {:>7.2} {:>6.1} {:>5.2}  {}",
            s.frame,
            s.time,
            s.segment,
            position,
            s.planar_speed,
            s.vertical_velocity,
            s.stamina,
            s.body_height,
            state_label(s)
        );
    }

    let summary = &simulation.summary;
    println!();
    println!("Scenario '{}'", summary.scenario);
    println!("  Frames:        {} ({:.2}s)", summary.frames, summary.time);
    println!(
        "  Moved:         {:.2}m to ({:.2}, {:.2}, {:.2})",
        summary.distance, summary.end[0], summary.end[1], summary.end[2]
    );
    println!("  Top speed:     {:.2} m/s", summary.max_planar_speed);
    println!("  Peak height:   {:.2} m", summary.peak_height);
    println!("  Min stamina:   {:.1}", summary.min_stamina);
    let f = &summary.flag_frames;
    println!(
        "  Flag frames:   walk {} / run {} / air {} / crouch {} / crouch-walk {}",
        f.walking, f.running, f.jumping, f.crouching, f.crouch_walking
    );
}

fn state_label(s: &Sample) -> String {
    let mut parts = Vec::new();
    if !s.grounded {
        parts.push("air");
    }
    if s.sprinting {
        parts.push("sprint");
    }
    if s.crouching {
        parts.push("crouch");
    }
    if parts.is_empty() {
        "ground".to_string()
    } else {
        parts.join(",")
    }
}
