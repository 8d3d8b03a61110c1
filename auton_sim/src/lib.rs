//! Deterministic simulated collaborators.
//!
//! These stand in for the real path follower, vision loop, and actuators so
//! a full mission can run on a desk. They are deliberately simple models —
//! scripted convergence, fixed segment durations — not physics; the point is
//! exercising the sequencer's stage logic end to end with repeatable timing.

use std::cell::Cell;

use auton_traits::{
    AlignmentOracle, Drivetrain, HeadingSensor, Indexer, Intake, PathDescriptor, PathExecutor,
    Shooter,
};

/// Logs every command and remembers the last one.
#[derive(Debug, Default)]
pub struct SimDrivetrain {
    last_command: (f64, f64),
    ramp_limit: f64,
}

impl SimDrivetrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_command(&self) -> (f64, f64) {
        self.last_command
    }

    pub fn ramp_limit(&self) -> f64 {
        self.ramp_limit
    }
}

impl Drivetrain for SimDrivetrain {
    fn drive(&mut self, rotation: f64, forward: f64) {
        self.last_command = (rotation, forward);
        tracing::trace!(rotation, forward, "sim drive");
    }

    fn set_ramp_limit(&mut self, rate: f64) {
        self.ramp_limit = rate;
        tracing::trace!(rate, "sim ramp limit");
    }
}

/// Heading that closes on a target first-order: each read moves 20% of the
/// remaining error, so the reading settles inside any reasonable tolerance
/// after a few dozen ticks.
#[derive(Debug)]
pub struct SimHeadingSensor {
    heading: f64,
    target_deg: f64,
}

impl SimHeadingSensor {
    /// `target_deg` is where the simulated turn ends up (the routine's
    /// relative turn amount).
    pub fn new(target_deg: f64) -> Self {
        Self {
            heading: 0.0,
            target_deg,
        }
    }
}

impl HeadingSensor for SimHeadingSensor {
    fn heading_degrees(&mut self) -> f64 {
        self.heading += (self.target_deg - self.heading) * 0.2;
        self.heading
    }

    fn reset(&mut self) {
        self.heading = 0.0;
    }
}

/// Vision loop that hits tolerance on most frames once warmed up; every
/// fourth frame misses, which exercises the cumulative-count gate policy.
#[derive(Debug, Default)]
pub struct SimAlignmentOracle {
    frame: u32,
}

impl SimAlignmentOracle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlignmentOracle for SimAlignmentOracle {
    fn step(&mut self) -> bool {
        self.frame += 1;
        let hit = self.frame % 4 != 0;
        tracing::trace!(frame = self.frame, hit, "sim vision frame");
        hit
    }
}

/// Path follower that stays active for a fixed number of ticks per segment.
/// Activity is decremented on each `is_active` query, which the sequencer
/// issues exactly once per tick while a segment is outstanding.
#[derive(Debug)]
pub struct SimPathExecutor {
    segment_ticks: u32,
    remaining: Cell<u32>,
    segments_run: u32,
    resets: u32,
}

impl SimPathExecutor {
    pub fn new(segment_ticks: u32) -> Self {
        Self {
            segment_ticks,
            remaining: Cell::new(0),
            segments_run: 0,
            resets: 0,
        }
    }

    pub fn segments_run(&self) -> u32 {
        self.segments_run
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl PathExecutor for SimPathExecutor {
    fn submit(&mut self, path: &PathDescriptor) {
        self.segments_run += 1;
        self.remaining.set(self.segment_ticks);
        tracing::debug!(
            end_x = path.end_pose.x,
            inverted = path.inverted,
            waypoints = path.waypoints.len(),
            "sim path submitted"
        );
    }

    fn is_active(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return false;
        }
        self.remaining.set(left - 1);
        true
    }

    fn reset_state(&mut self) {
        self.resets += 1;
        tracing::debug!("sim dead reckoning cleared");
    }
}

#[derive(Debug, Default)]
pub struct SimIntake {
    extended: bool,
    running: bool,
}

impl SimIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Intake for SimIntake {
    fn extend(&mut self) {
        self.extended = true;
        tracing::debug!("sim intake extended");
    }
    fn retract(&mut self) {
        self.extended = false;
        tracing::debug!("sim intake retracted");
    }
    fn run(&mut self) {
        self.running = true;
    }
    fn stop(&mut self) {
        self.running = false;
    }
}

#[derive(Debug, Default)]
pub struct SimIndexer {
    running: bool,
}

impl SimIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Indexer for SimIndexer {
    fn start(&mut self) {
        self.running = true;
        tracing::debug!("sim indexer started");
    }
    fn stop(&mut self) {
        self.running = false;
    }
}

/// Flywheel that spools up over `spinup_ticks` maintenance ticks while
/// enabled, and bleeds off instantly when stopped.
#[derive(Debug)]
pub struct SimShooter {
    spinup_ticks: u32,
    spool: u32,
    enabled: bool,
}

impl SimShooter {
    pub fn new(spinup_ticks: u32) -> Self {
        Self {
            spinup_ticks,
            spool: 0,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Shooter for SimShooter {
    fn enable(&mut self) {
        self.enabled = true;
        tracing::debug!("sim shooter enabled");
    }

    fn stop(&mut self) {
        self.enabled = false;
        self.spool = 0;
        tracing::debug!("sim shooter stopped");
    }

    fn maintain(&mut self) {
        if self.enabled && self.spool < self.spinup_ticks {
            self.spool += 1;
        }
    }

    fn at_target_speed(&mut self) -> bool {
        self.spool >= self.spinup_ticks
    }
}
