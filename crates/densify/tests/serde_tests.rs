#![cfg(feature = "serde")]
//! Serialization of configuration and reports.

use chrono::{TimeDelta, TimeZone, Utc};
use serde_json::{Value, json};

use densify::prelude::*;

fn series() -> Series {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    Series::from_readings(
        [2.0, 3.0, 5.0, 4.0, 6.0, 7.0, 6.5, 8.0, 9.0, 8.5]
            .into_iter()
            .enumerate()
            .map(|(i, v)| (t0 + TimeDelta::hours(i as i64), Some(v))),
    )
}

/// Test a configuration written by hand.
///
/// Verifies string forms for step, method and policy, and defaults for the rest.
#[test]
fn test_config_from_json() {
    let config: DensifyConfig = serde_json::from_value(json!({
        "step": "15min",
        "method": "polynomial:3",
        "extrapolation": "linear",
        "methods": ["linear", "spline"],
    }))
    .unwrap();

    assert_eq!(config.step, Step::minutes(15).unwrap());
    assert_eq!(config.method, Method::Polynomial { order: 3 });
    assert_eq!(config.extrapolation, SplineExtrapolation::Linear);
    assert_eq!(config.methods.as_deref(), Some(&["linear".to_string(), "spline".to_string()][..]));
    assert_eq!(config.seed, DensifyConfig::default().seed);
    assert!(config.validate().is_ok());
}

/// Test that configuration survives a JSON round trip.
#[test]
fn test_config_round_trip() {
    let config = DensifyConfig {
        method: Method::Spline,
        rank_by_holdout: true,
        ..DensifyConfig::default()
    };
    let text = serde_json::to_string(&config).unwrap();
    let back: DensifyConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
}

/// Test that sub-millisecond steps survive serialization.
///
/// Verifies the string form picks a unit that keeps every nanosecond.
#[test]
fn test_fine_step_round_trip() {
    for (delta, text) in [
        (TimeDelta::microseconds(1_500), "1500us"),
        (TimeDelta::nanoseconds(500), "500ns"),
        (TimeDelta::minutes(90), "90min"),
    ] {
        let config = DensifyConfig {
            step: Step::new(delta).unwrap(),
            ..DensifyConfig::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["step"], text);
        let back: DensifyConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back.step.as_delta(), delta);
    }
}

/// Test rejection of unknown names in a configuration file.
#[test]
fn test_config_rejects_bad_strings() {
    assert!(serde_json::from_value::<DensifyConfig>(json!({ "method": "nearest" })).is_err());
    assert!(serde_json::from_value::<DensifyConfig>(json!({ "step": "0min" })).is_err());
}

/// Test the shape of a serialized run result.
///
/// Verifies that method and step appear in their string forms.
#[test]
fn test_result_serializes() {
    let result = Densify::new()
        .step_str("30min")
        .observer(NoopObserver)
        .build()
        .unwrap()
        .run(&series())
        .unwrap();

    let value: Value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["method"], "linear");
    assert_eq!(value["original_points"], 10);
    assert_eq!(value["quality"]["points"], 19);
    assert!(value["range_check"]["valid"].as_bool().unwrap());
}

/// Test that failures inside a comparison serialize next to successes.
#[test]
fn test_comparison_serializes_failures() {
    let report = Densify::new()
        .step_str("1h")
        .methods(["linear", "nearest"])
        .rank_by_holdout(true)
        .observer(NoopObserver)
        .build()
        .unwrap()
        .compare(&series())
        .unwrap();

    let value: Value = serde_json::to_value(&report).unwrap();
    assert!(value["methods"]["linear"].get("Ok").is_some());
    assert!(value["methods"]["nearest"].get("Err").is_some());
    assert_eq!(value["recommended"], "linear");
}
