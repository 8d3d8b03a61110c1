//! Runtime configuration for the mission core.
//!
//! These are the structs the sequencer actually consumes. They are separate
//! from the TOML-deserialized schema in `auton_config`; the `From` impls
//! below bridge the two.

/// Which authored routine to run. Selected once before `init()`; immutable
/// during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissionVariant {
    #[default]
    EightBall,
}

/// Heading turn controller tuning.
///
/// `deadband_frac` and `boost_frac` are fractions of `max_output`: a clamped
/// correction below the deadband gets the boost added in the same sign to
/// overcome static friction, and is deliberately not re-clamped afterwards.
#[derive(Debug, Clone, Copy)]
pub struct TurnCfg {
    pub kp: f64,
    pub ki: f64,
    /// Relative turn amount latched on the arm tick.
    pub setpoint_deg: f64,
    /// Acceptable heading error band.
    pub tolerance_deg: f64,
    pub max_output: f64,
    pub deadband_frac: f64,
    pub boost_frac: f64,
    /// Consecutive in-range ticks required before the turn reports terminal
    /// completion; filters noise/overshoot near the setpoint.
    pub dwell_ticks: u32,
    /// Drivetrain ramp limit engaged while turning (seconds to full output).
    pub ramp_rate: f64,
}

impl Default for TurnCfg {
    fn default() -> Self {
        Self {
            kp: 0.016,
            ki: 0.0,
            setpoint_deg: 180.0,
            tolerance_deg: 0.25,
            max_output: 0.2,
            deadband_frac: 0.26,
            boost_frac: 0.3,
            dwell_ticks: 5,
            ramp_rate: 1.0,
        }
    }
}

/// Alignment convergence tuning.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentCfg {
    /// Cumulative successful frames required to trust a lock. Cumulative, not
    /// consecutive: a missed frame leaves the count unchanged.
    pub success_threshold: u32,
}

impl Default for AlignmentCfg {
    fn default() -> Self {
        Self {
            success_threshold: 10,
        }
    }
}

impl From<auton_config::MissionVariant> for MissionVariant {
    fn from(v: auton_config::MissionVariant) -> Self {
        match v {
            auton_config::MissionVariant::EightBall => Self::EightBall,
        }
    }
}

impl From<auton_config::TurnCfg> for TurnCfg {
    fn from(t: auton_config::TurnCfg) -> Self {
        Self {
            kp: t.kp,
            ki: t.ki,
            setpoint_deg: t.setpoint_deg,
            tolerance_deg: t.tolerance_deg,
            max_output: t.max_output,
            deadband_frac: t.deadband_frac,
            boost_frac: t.boost_frac,
            dwell_ticks: t.dwell_ticks,
            ramp_rate: t.ramp_rate,
        }
    }
}

impl From<auton_config::AlignmentCfg> for AlignmentCfg {
    fn from(a: auton_config::AlignmentCfg) -> Self {
        Self {
            success_threshold: a.success_threshold,
        }
    }
}
