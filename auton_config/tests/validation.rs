use auton_config::{Config, MissionVariant, load_toml, validate};
use rstest::rstest;

#[test]
fn empty_toml_yields_defaults_and_validates() {
    let cfg = load_toml("").expect("empty config parses");
    assert_eq!(cfg.mission.variant, MissionVariant::EightBall);
    assert_eq!(cfg.mission.control_period_ms, 20);
    assert_eq!(cfg.turn.dwell_ticks, 5);
    assert_eq!(cfg.alignment.success_threshold, 10);
    validate(&cfg).expect("defaults validate");
}

#[test]
fn full_toml_round_trips_values() {
    let s = r#"
        [mission]
        variant = "eight-ball"
        control_period_ms = 10
        max_ticks = 5000

        [turn]
        kp = 0.02
        ki = 0.001
        setpoint_deg = 180.0
        tolerance_deg = 0.5
        max_output = 0.25
        deadband_frac = 0.2
        boost_frac = 0.25
        dwell_ticks = 3
        ramp_rate = 0.5

        [alignment]
        success_threshold = 8

        [logging]
        level = "debug"
    "#;
    let cfg = load_toml(s).expect("parses");
    assert_eq!(cfg.mission.control_period_ms, 10);
    assert_eq!(cfg.turn.dwell_ticks, 3);
    assert_eq!(cfg.turn.tolerance_deg, 0.5);
    assert_eq!(cfg.alignment.success_threshold, 8);
    assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
    validate(&cfg).expect("validates");
}

#[test]
fn unknown_variant_is_rejected_at_parse_time() {
    let err = load_toml("[mission]\nvariant = \"ten-ball\"\n").unwrap_err();
    assert!(err.to_string().contains("variant"), "got: {err}");
}

#[rstest]
#[case("[turn]\nmax_output = 0.0\n", "max_output")]
#[case("[turn]\nmax_output = -0.2\n", "max_output")]
#[case("[turn]\ntolerance_deg = -0.1\n", "tolerance_deg")]
#[case("[turn]\ndeadband_frac = 1.5\n", "deadband_frac")]
#[case("[turn]\nboost_frac = -0.1\n", "boost_frac")]
#[case("[turn]\ndwell_ticks = 0\n", "dwell_ticks")]
#[case("[turn]\nramp_rate = -1.0\n", "ramp_rate")]
#[case("[turn]\nkp = inf\n", "kp")]
#[case("[alignment]\nsuccess_threshold = 0\n", "success_threshold")]
#[case("[mission]\ncontrol_period_ms = 0\n", "control_period_ms")]
fn out_of_range_values_fail_validation(#[case] toml: &str, #[case] needle: &str) {
    let cfg: Config = load_toml(toml).expect("parses");
    let err = validate(&cfg).expect_err("should fail validation");
    assert!(
        err.to_string().contains(needle),
        "expected {needle} in: {err}"
    );
}
