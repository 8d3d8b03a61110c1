//! Stage machine driving the autonomous routine.

use crate::config::{AlignmentCfg, MissionVariant, TurnCfg};
use crate::convergence::ConvergenceGate;
use crate::dispatch::{CompletionDispatcher, StageCompletion};
use crate::error::{BuildError, Result};
use crate::paths::MissionPaths;
use crate::status::TickStatus;
use crate::turn::{TurnController, TurnStep};
use auton_traits::{
    AlignmentOracle, Drivetrain, HeadingSensor, Indexer, Intake, PathExecutor, Shooter,
};

/// Current phase of the routine. Single source of truth: every per-tick
/// guard is derived from this plus sub-controller status, never from loose
/// boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening path and, once tracking is enabled, alignment convergence.
    AlignAndTrack,
    /// Aligned: spin the shooter up to speed.
    Shoot,
    /// In-place relative turn toward the ball group.
    Turn180,
    /// Intake deployed, pickup segment in flight. `submitted` guards the
    /// one-time entry actions.
    PickupPath { submitted: bool },
    /// Drive back to the shooting position. Submitted exactly once.
    ReturnPath { submitted: bool },
    /// Routine over; only shooter maintenance runs.
    Done,
}

/// Autonomous mission sequencer.
///
/// The host scheduler calls [`init`](Self::init) once, then
/// [`tick`](Self::tick) every control period until `TickStatus::Done`.
/// Per tick, exactly one stage owns the drivetrain; the shooter's regulation
/// loop is serviced on every tick regardless of stage.
///
/// Failure semantics are fail-stationary: a sub-controller that never
/// reports completion parks the routine in its stage with the drivetrain's
/// last commanded output (zero), with no retry and no escalation.
pub struct MissionSequencer {
    drivetrain: Box<dyn Drivetrain>,
    heading: Box<dyn HeadingSensor>,
    oracle: Box<dyn AlignmentOracle>,
    executor: Box<dyn PathExecutor>,
    intake: Box<dyn Intake>,
    indexer: Box<dyn Indexer>,
    shooter: Box<dyn Shooter>,

    turn_cfg: TurnCfg,
    align_cfg: AlignmentCfg,
    mission: MissionVariant,
    paths: MissionPaths,

    stage: Stage,
    /// Set by the opening path's completion; gates the alignment loop.
    tracking: bool,
    gate: ConvergenceGate,
    /// Live only while `Stage::Turn180` is active.
    turn: Option<TurnController>,
    dispatcher: CompletionDispatcher,
    shooter_running: bool,
}

impl core::fmt::Debug for MissionSequencer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MissionSequencer")
            .field("mission", &self.mission)
            .field("stage", &self.stage)
            .field("tracking", &self.tracking)
            .field("aligned_frames", &self.gate.count())
            .finish()
    }
}

impl MissionSequencer {
    /// Start building a sequencer.
    pub fn builder() -> SequencerBuilder {
        SequencerBuilder::default()
    }

    /// Choose the authored routine. Call before `init()`; the selection is
    /// immutable during a run.
    pub fn select_mission(&mut self, variant: MissionVariant) {
        self.mission = variant;
        self.paths = MissionPaths::for_variant(variant);
    }

    /// Reset all per-run state and submit the opening path. Safe to call at
    /// any time; calling it twice in a row leaves identical state.
    pub fn init(&mut self) {
        self.stage = Stage::AlignAndTrack;
        self.tracking = false;
        self.shooter_running = false;
        self.gate = ConvergenceGate::new(self.align_cfg.success_threshold);
        self.turn = None;
        self.dispatcher.clear();

        self.indexer.stop();
        self.shooter.stop();
        self.executor.reset_state();
        self.heading.reset();

        self.dispatcher.submit(
            self.executor.as_mut(),
            &self.paths.opening,
            StageCompletion::OpeningFinished,
        );
        tracing::debug!(mission = ?self.mission, "mission initialized");
    }

    /// Advance one control period. Never blocks; infallible.
    pub fn tick(&mut self) -> TickStatus {
        // Path completions are observed first so a segment that finished
        // between ticks hands off before any stage logic runs.
        if let Some(done) = self
            .dispatcher
            .poll(self.executor.as_ref(), self.drivetrain.as_mut())
        {
            self.apply_completion(done);
        }

        match self.stage {
            Stage::AlignAndTrack => {
                if self.tracking {
                    self.align_tick();
                }
                // Not tracking: the opening path still owns the drivetrain.
            }
            Stage::Shoot => self.shoot_tick(),
            Stage::Turn180 => self.turn_tick(),
            Stage::PickupPath { submitted: false } => self.enter_pickup(),
            Stage::ReturnPath { submitted: false } => self.enter_return(),
            Stage::PickupPath { submitted: true }
            | Stage::ReturnPath { submitted: true }
            | Stage::Done => {}
        }

        // Keep the flywheel regulation loop alive on every tick, active
        // shooting stage or not.
        self.shooter.maintain();

        if self.stage == Stage::Done {
            TickStatus::Done
        } else {
            TickStatus::Running
        }
    }

    /// Current stage, for hosts and tests.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the alignment loop is enabled this tick.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Successful alignment frames observed so far this run.
    pub fn aligned_frames(&self) -> u32 {
        self.gate.count()
    }

    fn apply_completion(&mut self, done: StageCompletion) {
        tracing::debug!(stage = ?self.stage, completion = ?done, "path segment finished");
        match done {
            StageCompletion::OpeningFinished => {
                debug_assert_eq!(self.stage, Stage::AlignAndTrack);
                self.tracking = true;
            }
            StageCompletion::PickupFinished => {
                debug_assert_eq!(self.stage, Stage::PickupPath { submitted: true });
                self.intake.stop();
                self.intake.retract();
                self.stage = Stage::ReturnPath { submitted: false };
            }
            StageCompletion::ReturnFinished => {
                debug_assert_eq!(self.stage, Stage::ReturnPath { submitted: true });
                self.stage = Stage::Done;
                tracing::debug!("mission done");
            }
        }
    }

    fn align_tick(&mut self) {
        debug_assert!(!self.dispatcher.has_outstanding());
        // The oracle steers while it converges; the core only consumes the
        // per-frame verdict.
        if self.gate.observe(self.oracle.step()) {
            tracing::debug!(frames = self.gate.count(), "alignment latched");
            self.stage = Stage::Shoot;
        }
    }

    fn shoot_tick(&mut self) {
        debug_assert!(!self.dispatcher.has_outstanding());
        if !self.shooter_running {
            self.shooter.enable();
            self.shooter_running = true;
        }
        if self.shooter.at_target_speed() {
            self.feed_on_ready();
            self.shooter.stop();
            self.shooter_running = false;
            self.tracking = false;
            self.turn = Some(TurnController::new(self.turn_cfg));
            self.stage = Stage::Turn180;
            tracing::debug!("shooter at speed; turning");
        }
    }

    /// Feed step once aligned and at speed. Intentionally disabled in this
    /// revision of the routine; the indexer stays wired here so re-enabling
    /// is a one-line change (`self.indexer.start()`).
    fn feed_on_ready(&mut self) {}

    fn turn_tick(&mut self) {
        debug_assert!(!self.dispatcher.has_outstanding());
        let Some(turn) = self.turn.as_mut() else {
            debug_assert!(false, "Turn180 stage without a live turn session");
            return;
        };
        let heading = self.heading.heading_degrees();
        match turn.update(heading) {
            TurnStep::Armed => {
                self.drivetrain.set_ramp_limit(self.turn_cfg.ramp_rate);
            }
            TurnStep::Correct { output } => {
                // In-place turn: translation held at zero.
                self.drivetrain.drive(output, 0.0);
            }
            TurnStep::Hold => {
                self.drivetrain.drive(0.0, 0.0);
                self.drivetrain.set_ramp_limit(0.0);
            }
            TurnStep::Complete => {
                self.drivetrain.drive(0.0, 0.0);
                self.drivetrain.set_ramp_limit(0.0);
                self.turn = None;
                self.stage = Stage::PickupPath { submitted: false };
                tracing::debug!(heading, "turn complete");
            }
        }
    }

    /// One-time pickup entry: deploy the intake, clear dead reckoning, and
    /// submit the pickup segment.
    fn enter_pickup(&mut self) {
        self.intake.extend();
        self.intake.run();
        self.executor.reset_state();
        self.heading.reset();
        self.dispatcher.submit(
            self.executor.as_mut(),
            &self.paths.pickup,
            StageCompletion::PickupFinished,
        );
        self.stage = Stage::PickupPath { submitted: true };
        tracing::debug!("pickup path submitted");
    }

    /// One-time return entry. The reference routine resubmitted this path
    /// every tick; here it goes out once and its completion ends the run.
    fn enter_return(&mut self) {
        self.dispatcher.submit(
            self.executor.as_mut(),
            &self.paths.return_home,
            StageCompletion::ReturnFinished,
        );
        self.stage = Stage::ReturnPath { submitted: true };
        tracing::debug!("return path submitted");
    }
}

/// Builder for [`MissionSequencer`]. All collaborators are mandatory and
/// validated on `build()` with typed errors.
#[derive(Default)]
pub struct SequencerBuilder {
    drivetrain: Option<Box<dyn Drivetrain>>,
    heading: Option<Box<dyn HeadingSensor>>,
    oracle: Option<Box<dyn AlignmentOracle>>,
    executor: Option<Box<dyn PathExecutor>>,
    intake: Option<Box<dyn Intake>>,
    indexer: Option<Box<dyn Indexer>>,
    shooter: Option<Box<dyn Shooter>>,
    turn: Option<TurnCfg>,
    alignment: Option<AlignmentCfg>,
    mission: MissionVariant,
}

impl SequencerBuilder {
    pub fn with_drivetrain(mut self, d: impl Drivetrain + 'static) -> Self {
        self.drivetrain = Some(Box::new(d));
        self
    }
    pub fn with_heading_sensor(mut self, h: impl HeadingSensor + 'static) -> Self {
        self.heading = Some(Box::new(h));
        self
    }
    pub fn with_alignment_oracle(mut self, o: impl AlignmentOracle + 'static) -> Self {
        self.oracle = Some(Box::new(o));
        self
    }
    pub fn with_path_executor(mut self, p: impl PathExecutor + 'static) -> Self {
        self.executor = Some(Box::new(p));
        self
    }
    pub fn with_intake(mut self, i: impl Intake + 'static) -> Self {
        self.intake = Some(Box::new(i));
        self
    }
    pub fn with_indexer(mut self, i: impl Indexer + 'static) -> Self {
        self.indexer = Some(Box::new(i));
        self
    }
    pub fn with_shooter(mut self, s: impl Shooter + 'static) -> Self {
        self.shooter = Some(Box::new(s));
        self
    }
    pub fn with_turn_cfg(mut self, cfg: TurnCfg) -> Self {
        self.turn = Some(cfg);
        self
    }
    pub fn with_alignment_cfg(mut self, cfg: AlignmentCfg) -> Self {
        self.alignment = Some(cfg);
        self
    }
    pub fn with_mission(mut self, variant: MissionVariant) -> Self {
        self.mission = variant;
        self
    }

    /// Validate and build. Missing collaborators and out-of-range config are
    /// typed `BuildError`s.
    pub fn build(self) -> Result<MissionSequencer> {
        let drivetrain = self
            .drivetrain
            .ok_or_else(|| eyre::Report::new(BuildError::MissingDrivetrain))?;
        let heading = self
            .heading
            .ok_or_else(|| eyre::Report::new(BuildError::MissingHeadingSensor))?;
        let oracle = self
            .oracle
            .ok_or_else(|| eyre::Report::new(BuildError::MissingAlignmentOracle))?;
        let executor = self
            .executor
            .ok_or_else(|| eyre::Report::new(BuildError::MissingPathExecutor))?;
        let intake = self
            .intake
            .ok_or_else(|| eyre::Report::new(BuildError::MissingIntake))?;
        let indexer = self
            .indexer
            .ok_or_else(|| eyre::Report::new(BuildError::MissingIndexer))?;
        let shooter = self
            .shooter
            .ok_or_else(|| eyre::Report::new(BuildError::MissingShooter))?;

        let turn_cfg = self.turn.unwrap_or_default();
        let align_cfg = self.alignment.unwrap_or_default();

        if !(turn_cfg.kp.is_finite() && turn_cfg.ki.is_finite()) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "turn gains must be finite",
            )));
        }
        if !turn_cfg.setpoint_deg.is_finite() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "setpoint_deg must be finite",
            )));
        }
        if !(turn_cfg.tolerance_deg.is_finite() && turn_cfg.tolerance_deg >= 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "tolerance_deg must be >= 0",
            )));
        }
        if !(turn_cfg.max_output.is_finite() && turn_cfg.max_output > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "max_output must be > 0",
            )));
        }
        if !(0.0..=1.0).contains(&turn_cfg.deadband_frac) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "deadband_frac must be within [0, 1]",
            )));
        }
        if !(0.0..=1.0).contains(&turn_cfg.boost_frac) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "boost_frac must be within [0, 1]",
            )));
        }
        if turn_cfg.dwell_ticks == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "dwell_ticks must be >= 1",
            )));
        }
        if !(turn_cfg.ramp_rate.is_finite() && turn_cfg.ramp_rate >= 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "ramp_rate must be >= 0",
            )));
        }
        if align_cfg.success_threshold == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "success_threshold must be >= 1",
            )));
        }

        Ok(MissionSequencer {
            drivetrain,
            heading,
            oracle,
            executor,
            intake,
            indexer,
            shooter,
            gate: ConvergenceGate::new(align_cfg.success_threshold),
            turn_cfg,
            align_cfg,
            mission: self.mission,
            paths: MissionPaths::for_variant(self.mission),
            stage: Stage::AlignAndTrack,
            tracking: false,
            turn: None,
            dispatcher: CompletionDispatcher::new(),
            shooter_running: false,
        })
    }
}
