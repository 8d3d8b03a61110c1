//! Collaborator traits for the autonomous mission core.
//!
//! Every trait here sits at the boundary spelled out in the sequencer design:
//! the core owns *when* a collaborator is commanded, the collaborator owns
//! *how*. All tick-path methods are non-blocking and infallible — hardware
//! faults are the collaborator's problem (return a last-known/sentinel
//! value); no error type crosses the sequencer boundary.

pub mod clock;
pub mod path;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use path::{PathDescriptor, Pose, Waypoint};

/// Differential drivetrain, commanded once per tick at most.
pub trait Drivetrain {
    /// Immediate arcade-style command: `rotation` spins in place when
    /// `forward` is zero. Both channels are unitless motor fractions.
    fn drive(&mut self, rotation: f64, forward: f64);

    /// Limit open-loop acceleration (seconds from 0 to full output).
    /// A rate of `0.0` disables ramp limiting.
    fn set_ramp_limit(&mut self, rate: f64);
}

/// Yaw sensor. Heading is monotonic within a session (no wraparound until
/// `reset`), in degrees, positive in the turn direction.
pub trait HeadingSensor {
    fn heading_degrees(&mut self) -> f64;
    fn reset(&mut self);
}

/// Vision alignment loop. While the owning stage is active the oracle steers
/// the robot itself; the core only consumes its per-frame verdict.
pub trait AlignmentOracle {
    /// Run one frame of the alignment loop. True iff this frame's vision
    /// error is within tolerance.
    fn step(&mut self) -> bool;
}

/// Asynchronous follower of pre-authored path segments. "Asynchronous" only
/// in the sense that completion is observed on a later tick of the same
/// single-threaded cadence.
pub trait PathExecutor {
    /// Begin following `path` across future ticks. A new submission replaces
    /// any path still in flight.
    fn submit(&mut self, path: &PathDescriptor);

    /// True while a submitted path is still being followed. Once this reads
    /// false the executor has stopped commanding the drivetrain.
    fn is_active(&self) -> bool;

    /// Clear dead-reckoning state (encoders, odometry pose). Must be called
    /// before submitting a path that assumes a known start pose.
    fn reset_state(&mut self);
}

/// Ball intake arm. All commands idempotent.
pub trait Intake {
    fn extend(&mut self);
    fn retract(&mut self);
    fn run(&mut self);
    fn stop(&mut self);
}

/// Ball indexing belts. Commands idempotent.
pub trait Indexer {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Flywheel shooter with its own speed regulation loop.
pub trait Shooter {
    fn enable(&mut self);
    fn stop(&mut self);

    /// Keep the regulation loop alive; must be called every tick the shooter
    /// should continue regulating, whether or not it is enabled.
    fn maintain(&mut self);

    fn at_target_speed(&mut self) -> bool;
}
