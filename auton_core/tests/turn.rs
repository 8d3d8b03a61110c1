use auton_core::{TurnCfg, TurnController, TurnStep};
use rstest::rstest;

fn tuned_cfg() -> TurnCfg {
    TurnCfg {
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

/// Feed a heading trace through a fresh controller; returns, per update
/// call, whether the controller reported terminal completion.
fn completions(cfg: TurnCfg, trace: &[f64]) -> Vec<bool> {
    let mut turn = TurnController::new(cfg);
    trace
        .iter()
        .map(|&h| turn.update(h) == TurnStep::Complete)
        .collect()
}

#[test]
fn settling_trace_completes_exactly_on_fifth_in_range_tick() {
    // First sample is consumed by the arm tick; the five trailing 179.9
    // readings are the only in-range ticks (error 0.1 <= 0.25).
    let trace = [
        0.0, 40.0, 95.0, 150.0, 178.0, 179.0, 179.9, 179.9, 179.9, 179.9, 179.9,
    ];
    let done = completions(tuned_cfg(), &trace);
    let expected = {
        let mut v = vec![false; trace.len()];
        v[trace.len() - 1] = true;
        v
    };
    assert_eq!(done, expected, "completion only on the final tick");
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
fn never_completes_before_dwell_ticks_in_range(#[case] in_range_ticks: u32) {
    let cfg = tuned_cfg();
    let mut turn = TurnController::new(cfg);
    turn.update(0.0); // arm
    turn.update(90.0); // out of range
    for _ in 0..in_range_ticks {
        assert_ne!(
            turn.update(179.9),
            TurnStep::Complete,
            "completed after only {in_range_ticks} in-range ticks"
        );
    }
}

#[test]
fn interrupted_dwell_starts_the_count_over() {
    let cfg = tuned_cfg();
    let mut turn = TurnController::new(cfg);
    turn.update(0.0);
    for _ in 0..4 {
        assert_eq!(turn.update(180.0), TurnStep::Hold);
    }
    // A single noisy tick discards the accrued dwell.
    assert!(matches!(turn.update(170.0), TurnStep::Correct { .. }));
    for _ in 0..4 {
        assert_eq!(turn.update(180.0), TurnStep::Hold);
    }
    assert_eq!(turn.update(180.0), TurnStep::Complete);
}

#[test]
fn corrections_hold_translation_semantics_and_max_output() {
    let cfg = tuned_cfg();
    let mut turn = TurnController::new(cfg);
    turn.update(0.0);
    let mut headings = [0.0, 40.0, 95.0, 150.0];
    headings.reverse(); // approach from far out, large errors first
    for h in headings {
        match turn.update(h) {
            TurnStep::Correct { output } => {
                assert!(
                    output.abs() <= cfg.max_output + cfg.boost_frac * cfg.max_output,
                    "output {output} beyond clamp-plus-boost envelope"
                );
                assert!(output > 0.0, "turn direction must match the error sign");
            }
            other => panic!("expected Correct, got {other:?}"),
        }
    }
}

#[rstest]
#[case(179.0, 1.0)] // small positive error
#[case(181.0, -1.0)] // small negative error (overshoot)
fn deadband_boost_applies_in_the_error_sign(#[case] heading: f64, #[case] sign: f64) {
    let cfg = tuned_cfg();
    let mut turn = TurnController::new(cfg);
    turn.update(0.0);
    match turn.update(heading) {
        TurnStep::Correct { output } => {
            let boosted_floor = cfg.boost_frac * cfg.max_output;
            assert!(
                output * sign >= boosted_floor,
                "boost missing or wrong sign: {output}"
            );
        }
        other => panic!("expected Correct, got {other:?}"),
    }
}
