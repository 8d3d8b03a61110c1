#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the autonomous routine.
//!
//! Deserialized from TOML and validated before the core ever sees it. These
//! structs mirror — but are distinct from — the runtime config in
//! `auton_core::config`; the CLI converts between the two.

use serde::Deserialize;

/// Which authored routine to run. Exactly one routine exists today; the enum
/// is the seam for adding more.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissionVariant {
    #[default]
    EightBall,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MissionCfg {
    pub variant: MissionVariant,
    /// Control period the host scheduler holds between ticks.
    pub control_period_ms: u64,
    /// Hard cap on ticks for the paced runner; 0 means unbounded.
    pub max_ticks: u64,
}

impl Default for MissionCfg {
    fn default() -> Self {
        Self {
            variant: MissionVariant::EightBall,
            control_period_ms: 20,
            max_ticks: 0,
        }
    }
}

/// Heading turn controller tuning. All shaping constants are fractions of
/// `max_output`, not absolute motor power.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct TurnCfg {
    pub kp: f64,
    pub ki: f64,
    /// Relative turn amount latched at arm time.
    pub setpoint_deg: f64,
    /// Acceptable heading error band.
    pub tolerance_deg: f64,
    pub max_output: f64,
    /// Below `deadband_frac * max_output` the static-friction boost applies.
    pub deadband_frac: f64,
    /// Boost magnitude as a fraction of `max_output`.
    pub boost_frac: f64,
    /// Consecutive in-range ticks required before the turn is trusted.
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

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct AlignmentCfg {
    /// Cumulative (not consecutive) successful frames required to trust an
    /// alignment lock. Missed frames leave the count unchanged.
    pub success_threshold: u32,
}

impl Default for AlignmentCfg {
    fn default() -> Self {
        Self {
            success_threshold: 10,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    /// Path to a JSON-lines log file; console-only when absent.
    pub file: Option<String>,
    /// "error" | "warn" | "info" | "debug" | "trace"
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub mission: MissionCfg,
    pub turn: TurnCfg,
    pub alignment: AlignmentCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Range/sanity checks the schema itself cannot express.
pub fn validate(cfg: &Config) -> eyre::Result<()> {
    let t = &cfg.turn;
    for (name, v) in [
        ("turn.kp", t.kp),
        ("turn.ki", t.ki),
        ("turn.setpoint_deg", t.setpoint_deg),
        ("turn.tolerance_deg", t.tolerance_deg),
        ("turn.max_output", t.max_output),
        ("turn.deadband_frac", t.deadband_frac),
        ("turn.boost_frac", t.boost_frac),
        ("turn.ramp_rate", t.ramp_rate),
    ] {
        if !v.is_finite() {
            eyre::bail!("{name} must be finite, got {v}");
        }
    }
    if t.tolerance_deg < 0.0 {
        eyre::bail!("turn.tolerance_deg must be >= 0");
    }
    if t.max_output <= 0.0 {
        eyre::bail!("turn.max_output must be > 0");
    }
    if !(0.0..=1.0).contains(&t.deadband_frac) {
        eyre::bail!("turn.deadband_frac must be within [0, 1]");
    }
    if !(0.0..=1.0).contains(&t.boost_frac) {
        eyre::bail!("turn.boost_frac must be within [0, 1]");
    }
    if t.dwell_ticks == 0 {
        eyre::bail!("turn.dwell_ticks must be >= 1");
    }
    if t.ramp_rate < 0.0 {
        eyre::bail!("turn.ramp_rate must be >= 0");
    }
    if cfg.alignment.success_threshold == 0 {
        eyre::bail!("alignment.success_threshold must be >= 1");
    }
    if cfg.mission.control_period_ms == 0 {
        eyre::bail!("mission.control_period_ms must be >= 1");
    }
    Ok(())
}
