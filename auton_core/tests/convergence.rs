use auton_core::ConvergenceGate;
use rstest::rstest;

#[test]
fn dropped_frame_sequence_latches_on_tick_eleven() {
    // Cumulative policy: the false frame at tick 3 does not reset the count,
    // so the tenth success lands on tick 11 and latches there.
    let script = [
        true, true, false, true, true, true, true, true, true, true, true,
    ];
    let mut gate = ConvergenceGate::new(10);
    let mut latched_at = None;
    for (i, s) in script.iter().enumerate() {
        if gate.observe(*s) && latched_at.is_none() {
            latched_at = Some(i + 1);
        }
    }
    assert_eq!(latched_at, Some(11));
    assert_eq!(gate.count(), 10);
}

#[test]
fn cumulative_not_consecutive() {
    // A consecutive debounce would never latch on this script.
    let mut gate = ConvergenceGate::new(4);
    for s in [true, false, true, false, true, false] {
        assert!(!gate.observe(s));
    }
    assert!(gate.observe(true), "fourth cumulative success must latch");
}

#[rstest]
#[case(1)]
#[case(10)]
#[case(100)]
fn latch_requires_exactly_threshold_successes(#[case] threshold: u32) {
    let mut gate = ConvergenceGate::new(threshold);
    for _ in 0..threshold - 1 {
        assert!(!gate.observe(true));
    }
    assert!(gate.observe(true));
}

#[test]
fn reset_restores_the_initial_state() {
    let mut gate = ConvergenceGate::new(2);
    gate.observe(true);
    gate.observe(true);
    assert!(gate.is_latched());
    gate.reset();
    assert!(!gate.is_latched());
    assert_eq!(gate.count(), 0);
    assert!(!gate.observe(true));
}
