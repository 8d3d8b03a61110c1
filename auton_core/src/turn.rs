//! Closed-loop in-place heading turn.

use crate::config::TurnCfg;

/// What the sequencer should do with the drivetrain this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnStep {
    /// Arm tick: engage the acceleration ramp limit; no correction yet.
    Armed,
    /// Apply `output` on the rotational channel, translation held at zero.
    Correct { output: f64 },
    /// In range this tick: hold at zero output while the dwell accrues.
    Hold,
    /// Dwell satisfied; the turn is terminally complete.
    Complete,
}

/// One turn session: created on stage entry, discarded on exit.
///
/// Two operating phases. The first `update` call arms the session (latches
/// the setpoint, asks for ramp limiting) without producing a correction;
/// every later call runs the PI loop against the current heading.
#[derive(Debug, Clone)]
pub struct TurnController {
    cfg: TurnCfg,
    setpoint_deg: f64,
    integral: f64,
    dwell: u32,
    armed: bool,
}

impl TurnController {
    pub fn new(cfg: TurnCfg) -> Self {
        Self {
            cfg,
            setpoint_deg: 0.0,
            integral: 0.0,
            dwell: 0,
            armed: false,
        }
    }

    /// Advance one tick against the current heading (degrees).
    pub fn update(&mut self, heading_deg: f64) -> TurnStep {
        if !self.armed {
            self.armed = true;
            self.setpoint_deg = self.cfg.setpoint_deg;
            return TurnStep::Armed;
        }

        if self.dwell >= self.cfg.dwell_ticks {
            return TurnStep::Complete;
        }

        let error = self.setpoint_deg - heading_deg;
        if error.abs() <= self.cfg.tolerance_deg {
            self.dwell += 1;
            if self.dwell >= self.cfg.dwell_ticks {
                return TurnStep::Complete;
            }
            return TurnStep::Hold;
        }

        // Out of range: the dwell requirement is consecutive ticks.
        self.dwell = 0;
        self.integral += error;

        let max = self.cfg.max_output;
        let raw = self.cfg.kp * error + self.cfg.ki * self.integral;
        let mut output = raw.clamp(-max, max);
        // Static-friction boost: small corrections stall the drivetrain, so
        // anything under the deadband gets a fixed kick in the same sign.
        // Intentionally not re-clamped.
        if output.abs() < self.cfg.deadband_frac * max {
            output += (self.cfg.boost_frac * max).copysign(output);
        }
        TurnStep::Correct { output }
    }

    /// Consecutive in-range ticks accrued so far.
    pub fn dwell(&self) -> u32 {
        self.dwell
    }

    pub fn is_complete(&self) -> bool {
        self.dwell >= self.cfg.dwell_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TurnCfg {
        TurnCfg::default()
    }

    #[test]
    fn first_update_arms_without_correcting() {
        let mut turn = TurnController::new(cfg());
        assert_eq!(turn.update(0.0), TurnStep::Armed);
        // Second tick actually corrects.
        match turn.update(0.0) {
            TurnStep::Correct { output } => assert!(output > 0.0),
            other => panic!("expected Correct, got {other:?}"),
        }
    }

    #[test]
    fn large_error_saturates_at_max_output() {
        let mut turn = TurnController::new(cfg());
        turn.update(0.0);
        // error = 180 deg, kp * 180 = 2.88 >> max_output
        match turn.update(0.0) {
            TurnStep::Correct { output } => assert_eq!(output, cfg().max_output),
            other => panic!("expected Correct, got {other:?}"),
        }
    }

    #[test]
    fn small_correction_gets_friction_boost_without_reclamp() {
        let c = cfg();
        let mut turn = TurnController::new(c);
        turn.update(0.0);
        // error = 1 deg -> raw = 0.016, below deadband 0.26 * 0.2 = 0.052
        match turn.update(179.0) {
            TurnStep::Correct { output } => {
                let expected = 0.016 + c.boost_frac * c.max_output;
                assert!((output - expected).abs() < 1e-12, "output = {output}");
                assert!(output > c.deadband_frac * c.max_output);
            }
            other => panic!("expected Correct, got {other:?}"),
        }
    }

    #[test]
    fn boost_keeps_the_sign_of_the_correction() {
        let c = cfg();
        let mut turn = TurnController::new(c);
        turn.update(0.0);
        // Overshoot: heading past setpoint, error negative.
        match turn.update(181.0) {
            TurnStep::Correct { output } => {
                assert!(output < 0.0, "output = {output}");
            }
            other => panic!("expected Correct, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_tick_resets_the_dwell() {
        let mut turn = TurnController::new(cfg());
        turn.update(0.0);
        for _ in 0..3 {
            assert_eq!(turn.update(179.9), TurnStep::Hold);
        }
        assert_eq!(turn.dwell(), 3);
        // Drifts out of the band: dwell starts over.
        assert!(matches!(turn.update(178.0), TurnStep::Correct { .. }));
        assert_eq!(turn.dwell(), 0);
    }

    #[test]
    fn integral_term_accumulates_error() {
        let mut c = cfg();
        c.kp = 0.0;
        c.ki = 0.001;
        c.deadband_frac = 0.0; // isolate the I term
        let mut turn = TurnController::new(c);
        turn.update(0.0);
        let first = match turn.update(170.0) {
            TurnStep::Correct { output } => output,
            other => panic!("{other:?}"),
        };
        let second = match turn.update(170.0) {
            TurnStep::Correct { output } => output,
            other => panic!("{other:?}"),
        };
        assert!(second > first, "integral should wind up: {first} {second}");
    }
}
