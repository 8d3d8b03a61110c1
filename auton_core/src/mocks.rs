//! Inert collaborators for driving the core without hardware.
//!
//! These are the always-safe variants; scripted spies with assertions live
//! in the integration tests that need them.

use auton_traits::{
    AlignmentOracle, Drivetrain, HeadingSensor, Indexer, Intake, PathDescriptor, PathExecutor,
    Shooter,
};

/// Swallows every drive command.
pub struct NoopDrivetrain;

impl Drivetrain for NoopDrivetrain {
    fn drive(&mut self, _rotation: f64, _forward: f64) {}
    fn set_ramp_limit(&mut self, _rate: f64) {}
}

/// Reports a fixed heading forever.
pub struct FixedHeading(pub f64);

impl HeadingSensor for FixedHeading {
    fn heading_degrees(&mut self) -> f64 {
        self.0
    }
    fn reset(&mut self) {}
}

/// Never reports an in-tolerance frame; parks the routine in alignment.
pub struct NeverAligned;

impl AlignmentOracle for NeverAligned {
    fn step(&mut self) -> bool {
        false
    }
}

/// Accepts submissions and reports them finished immediately.
pub struct InstantExecutor;

impl PathExecutor for InstantExecutor {
    fn submit(&mut self, _path: &PathDescriptor) {}
    fn is_active(&self) -> bool {
        false
    }
    fn reset_state(&mut self) {}
}

/// Intake that ignores every command.
pub struct InertIntake;

impl Intake for InertIntake {
    fn extend(&mut self) {}
    fn retract(&mut self) {}
    fn run(&mut self) {}
    fn stop(&mut self) {}
}

/// Indexer that ignores every command.
pub struct InertIndexer;

impl Indexer for InertIndexer {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

/// Shooter that is always at target speed once enabled.
#[derive(Default)]
pub struct ReadyShooter {
    enabled: bool,
}

impl Shooter for ReadyShooter {
    fn enable(&mut self) {
        self.enabled = true;
    }
    fn stop(&mut self) {
        self.enabled = false;
    }
    fn maintain(&mut self) {}
    fn at_target_speed(&mut self) -> bool {
        self.enabled
    }
}
