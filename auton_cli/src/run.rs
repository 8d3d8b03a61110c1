//! Mission execution: config mapping, collaborator assembly, paced run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use auton_core::{MissionOutcome, MissionSequencer, RunnerCfg, run_mission};
use auton_sim::{
    SimAlignmentOracle, SimDrivetrain, SimHeadingSensor, SimIndexer, SimIntake, SimPathExecutor,
    SimShooter,
};
use auton_traits::MonotonicClock;
use eyre::Result;

/// Ticks each simulated path segment stays active.
const SIM_SEGMENT_TICKS: u32 = 25;
/// Maintenance ticks the simulated flywheel needs to reach speed.
const SIM_SPINUP_TICKS: u32 = 15;

pub fn assemble_sim_sequencer(cfg: &auton_config::Config) -> Result<MissionSequencer> {
    MissionSequencer::builder()
        .with_drivetrain(SimDrivetrain::new())
        .with_heading_sensor(SimHeadingSensor::new(cfg.turn.setpoint_deg))
        .with_alignment_oracle(SimAlignmentOracle::new())
        .with_path_executor(SimPathExecutor::new(SIM_SEGMENT_TICKS))
        .with_intake(SimIntake::new())
        .with_indexer(SimIndexer::new())
        .with_shooter(SimShooter::new(SIM_SPINUP_TICKS))
        .with_turn_cfg(cfg.turn.into())
        .with_alignment_cfg(cfg.alignment.into())
        .with_mission(cfg.mission.variant.into())
        .build()
}

pub fn run(
    cfg: &auton_config::Config,
    max_ticks_override: Option<u64>,
    control_period_override: Option<u64>,
    shutdown: Arc<AtomicBool>,
) -> Result<MissionOutcome> {
    let runner = RunnerCfg {
        control_period_ms: control_period_override.unwrap_or(cfg.mission.control_period_ms),
        max_ticks: max_ticks_override.unwrap_or(cfg.mission.max_ticks),
    };
    let mut seq = assemble_sim_sequencer(cfg)?;
    let clock = MonotonicClock;
    tracing::info!(
        variant = ?cfg.mission.variant,
        period_ms = runner.control_period_ms,
        max_ticks = runner.max_ticks,
        "starting mission"
    );
    Ok(run_mission(&mut seq, &clock, &runner, || {
        shutdown.load(Ordering::SeqCst)
    }))
}
