//! Clock-paced host loop around `init()`/`tick()`.
//!
//! Stage logic never sees the clock; this module is the one place real time
//! enters. Hosts that own their own scheduler (robot frameworks, SITL) can
//! ignore it and call `tick()` themselves.

use crate::sequencer::{MissionSequencer, Stage};
use crate::status::TickStatus;
use auton_traits::Clock;
use std::time::Duration;

/// Pacing configuration for [`run_mission`].
#[derive(Debug, Clone, Copy)]
pub struct RunnerCfg {
    /// Control period between ticks.
    pub control_period_ms: u64,
    /// Hard cap on ticks; 0 means unbounded. The routine is fail-stationary,
    /// so an unbounded run can spin forever on a stage that never converges.
    pub max_ticks: u64,
}

impl Default for RunnerCfg {
    fn default() -> Self {
        Self {
            control_period_ms: 20,
            max_ticks: 0,
        }
    }
}

/// How a paced run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    /// Routine reached `Done`.
    Done { ticks: u64 },
    /// `should_stop` returned true (operator abort).
    Interrupted { ticks: u64, stage: Stage },
    /// Tick cap hit before the routine finished.
    TickBudgetExhausted { ticks: u64, stage: Stage },
}

/// Run `init()` then `tick()` at the configured cadence until done, stopped,
/// or out of budget. `should_stop` is polled once per tick before stepping.
pub fn run_mission(
    seq: &mut MissionSequencer,
    clock: &dyn Clock,
    cfg: &RunnerCfg,
    should_stop: impl Fn() -> bool,
) -> MissionOutcome {
    let period = Duration::from_millis(cfg.control_period_ms);
    seq.init();
    let mut ticks: u64 = 0;
    loop {
        if should_stop() {
            tracing::info!(ticks, stage = ?seq.stage(), "mission interrupted");
            return MissionOutcome::Interrupted {
                ticks,
                stage: seq.stage(),
            };
        }
        ticks += 1;
        if seq.tick() == TickStatus::Done {
            tracing::info!(ticks, "mission complete");
            return MissionOutcome::Done { ticks };
        }
        if cfg.max_ticks > 0 && ticks >= cfg.max_ticks {
            tracing::warn!(ticks, stage = ?seq.stage(), "tick budget exhausted");
            return MissionOutcome::TickBudgetExhausted {
                ticks,
                stage: seq.stage(),
            };
        }
        clock.sleep(period);
    }
}
