//! End-to-end scenarios through the public builder API.
//!
//! These tests drive the full pipeline (clean, grid, interpolate, score) for:
//! - Reference inputs with hand-checked outputs
//! - Missing entries and degenerate inputs
//! - Method selection, including unknown names and the fallback flag
//!
//! ## Test Organization
//!
//! 1. **Reference Scenarios** - Known inputs with known outputs
//! 2. **Degenerate Input** - Too few points, bad axes
//! 3. **Method Selection** - Names, fallback, builder misuse
//! 4. **Fitted Models** - Direct evaluation, including outside the span

use approx::assert_relative_eq;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use densify::prelude::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
}

fn series_every(spacing: TimeDelta, vals: &[Option<f64>]) -> Series {
    let ts: Vec<DateTime<Utc>> = (0..vals.len() as i32).map(|i| t0() + spacing * i).collect();
    Series::new(ts, vals.to_vec()).unwrap()
}

fn quiet() -> Densify {
    Densify::new().observer(NoopObserver)
}

// ============================================================================
// Reference Scenarios
// ============================================================================

/// Test the two-hourly reference series densified to hourly.
///
/// Verifies point count and the midpoint between the first two readings.
#[test]
fn test_two_hourly_to_hourly_linear() {
    let vals = [0.0, 2.0, 5.0, 8.0, 10.0].map(Some);
    let series = series_every(TimeDelta::hours(2), &vals);

    let result = quiet()
        .step_str("1h")
        .method(Method::Linear)
        .build()
        .unwrap()
        .run(&series)
        .unwrap();

    assert_eq!(result.interpolated_points(), 9);
    assert_relative_eq!(result.series.values()[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(result.series.values()[3], 3.5, epsilon = 1e-12);
    assert_eq!(result.series.start(), Some(t0()));
    assert_eq!(result.series.end(), Some(t0() + TimeDelta::hours(8)));
}

/// Test that a gap in the middle is filled.
///
/// Verifies that no grid point is left missing and the gap is bridged linearly.
#[test]
fn test_missing_entry_is_not_reintroduced() {
    let series = series_every(
        TimeDelta::hours(1),
        &[Some(4.0), Some(6.0), None, Some(10.0), Some(12.0)],
    );

    for method in Method::all(2) {
        let result = quiet().method(method).step_str("10min").build().unwrap().run(&series).unwrap();
        assert_eq!(result.interpolated_points(), 25);
        assert!(result.series.values().iter().all(|v| v.is_finite()));
        assert_eq!(result.original_points, 4);
        assert_eq!(result.raw_points, 5);
    }

    let linear = quiet().step_str("1h").build().unwrap().run(&series).unwrap();
    assert_relative_eq!(linear.series.values()[2], 8.0, epsilon = 1e-12);
}

/// Test the human-readable summary.
///
/// Verifies that the summary carries method, counts and ratio.
#[test]
fn test_summary_display() {
    let series = series_every(TimeDelta::hours(1), &[Some(1.0), Some(3.0)]);
    let result = quiet().step_str("15min").build().unwrap().run(&series).unwrap();

    let text = result.to_string();
    assert!(text.lines().any(|l| l.trim_start().starts_with("Method:") && l.ends_with("linear")));
    assert!(text.contains("Interpolated points: 5"));
    assert!(text.contains("2.50x"));
    assert_eq!(result.improvement_ratio(), Some(2.5));
    assert_relative_eq!(result.original.mean, 2.0);
    assert_relative_eq!(result.interpolated().mean, 2.0, epsilon = 1e-12);
}

/// Test that non-UTC input is normalised.
///
/// Verifies that grid timestamps are UTC and aligned to the first reading.
#[test]
fn test_offset_timestamps_are_normalised() {
    let tz = FixedOffset::west_opt(5 * 3600).unwrap();
    let local = tz.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    let series = Series::from_readings([
        (local, Some(1.0)),
        (local + TimeDelta::hours(1), Some(2.0)),
    ]);

    let result = quiet().step_str("30T").build().unwrap().run(&series).unwrap();
    assert_eq!(
        result.series.start(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    );
    assert_eq!(result.interpolated_points(), 3);
}

/// Test readings spaced less than a second apart.
///
/// Verifies that every method keeps the middle observation.
#[test]
fn test_sub_second_readings_are_kept() {
    let series = series_every(TimeDelta::milliseconds(500), &[Some(0.0), Some(5.0), Some(0.0)]);

    for method in [Method::Linear, Method::TimeWeighted, Method::Spline] {
        let result = quiet().method(method).step_str("500ms").build().unwrap().run(&series).unwrap();
        assert_eq!(result.interpolated_points(), 3);
        for (got, want) in result.series.values().iter().zip([0.0, 5.0, 0.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
    }

    let finer = quiet().step_str("250ms").build().unwrap().run(&series).unwrap();
    assert_relative_eq!(finer.series.values()[1], 2.5, epsilon = 1e-12);
}

// ============================================================================
// Degenerate Input
// ============================================================================

/// Test a single valid reading.
///
/// Verifies that every method fails with InsufficientData.
#[test]
fn test_single_valid_point_fails_for_every_method() {
    let series = series_every(TimeDelta::hours(1), &[None, Some(3.0), None]);

    for method in Method::all(2) {
        let err = quiet().method(method).build().unwrap().run(&series).unwrap_err();
        assert_eq!(err, DensifyError::InsufficientData { got: 1, min: 2 });
    }
}

/// Test an integer-indexed series.
///
/// Verifies that an ordinal axis is rejected as not temporal.
#[test]
fn test_ordinal_axis_is_rejected() {
    let series = Series::ordinal(vec![0, 1, 2], vec![Some(1.0), Some(2.0), Some(3.0)]).unwrap();
    assert!(!series.axis().is_temporal());

    let err = quiet().build().unwrap().run(&series).unwrap_err();
    assert!(matches!(err, DensifyError::InvalidAxis(ref msg) if msg.contains("not temporal")));
}

/// Test decreasing timestamps.
///
/// Verifies that unordered input is rejected rather than sorted.
#[test]
fn test_unordered_timestamps_are_rejected() {
    let ts = vec![t0() + TimeDelta::hours(1), t0()];
    let series = Series::new(ts, vec![Some(1.0), Some(2.0)]).unwrap();
    let err = quiet().build().unwrap().run(&series).unwrap_err();
    assert!(matches!(err, DensifyError::InvalidAxis(_)));
}

/// Test a polynomial order the data cannot support.
///
/// Verifies that the run fails with NumericFailure rather than returning garbage.
#[test]
fn test_polynomial_with_too_few_points() {
    let series = series_every(TimeDelta::hours(1), &[Some(1.0), Some(2.0), Some(4.0)]);
    let err = quiet()
        .method(Method::Polynomial { order: 4 })
        .build()
        .unwrap()
        .run(&series)
        .unwrap_err();
    assert!(matches!(err, DensifyError::NumericFailure { ref method, .. } if method == "polynomial"));
}

// ============================================================================
// Method Selection
// ============================================================================

/// Test an unknown method name.
///
/// Verifies that the builder fails loudly instead of substituting linear.
#[test]
fn test_unknown_method_name_fails() {
    let err = quiet().method_name("bogus").build().unwrap_err();
    assert_eq!(err, DensifyError::UnsupportedMethod("bogus".into()));
}

/// Test the explicit compatibility flag.
///
/// Verifies that an unknown name becomes linear and the substitution is reported.
#[test]
fn test_fallback_flag_substitutes_linear_and_reports_it() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer = FnObserver::new(move |event| {
        if let DensifyEvent::FallbackApplied { requested } = event {
            sink.lock().unwrap().push(requested.to_string());
        }
    });

    let densifier = Densify::new()
        .method_name("bogus")
        .fallback_to_linear(true)
        .observer(observer)
        .build()
        .unwrap();

    assert_eq!(densifier.config().method, Method::Linear);
    assert_eq!(*seen.lock().unwrap(), vec!["bogus".to_string()]);
}

/// Test method names with aliases and explicit orders.
///
/// Verifies that names resolve to the expected variants.
#[test]
fn test_method_names_resolve() {
    let resolve = |name: &str| quiet().method_name(name).build().unwrap().config().method;
    assert_eq!(resolve("time"), Method::TimeWeighted);
    assert_eq!(resolve("cubic"), Method::Spline);
    assert_eq!(resolve("polynomial:4"), Method::Polynomial { order: 4 });

    let bare = quiet().method_name("polynomial").polynomial_order(3).build().unwrap();
    assert_eq!(bare.config().method, Method::Polynomial { order: 3 });
}

/// Test builder misuse.
///
/// Verifies duplicate, out-of-range and unparsable parameters.
#[test]
fn test_builder_rejects_bad_configuration() {
    assert_eq!(
        quiet().step_str("5min").step_str("10min").build().unwrap_err(),
        DensifyError::DuplicateParameter { parameter: "step" }
    );
    assert_eq!(
        quiet().method(Method::Spline).method_name("linear").build().unwrap_err(),
        DensifyError::DuplicateParameter { parameter: "method" }
    );
    assert!(matches!(
        quiet().step_str("fortnight").build(),
        Err(DensifyError::InvalidStep(_))
    ));
    assert!(matches!(
        quiet().holdout_fraction(1.5).build(),
        Err(DensifyError::InvalidParameter { name: "holdout_fraction", .. })
    ));
    assert!(matches!(
        quiet().polynomial_order(MAX_POLYNOMIAL_ORDER + 1).build(),
        Err(DensifyError::InvalidParameter { name: "polynomial_order", .. })
    ));
}

// ============================================================================
// Fitted Models
// ============================================================================

/// Test spline evaluation beyond the observed span.
///
/// Verifies both extrapolation policies on a straight line.
#[test]
fn test_spline_extrapolation_policies() {
    let series = series_every(TimeDelta::hours(1), &[Some(1.0), Some(3.0), Some(5.0), Some(7.0)])
        .clean()
        .unwrap();
    let before = t0() - TimeDelta::hours(2);
    let after = t0() + TimeDelta::hours(5);

    let clamp = CubicSpline::fit(&series, SplineExtrapolation::Clamp).unwrap();
    assert_relative_eq!(clamp.evaluate(before), 1.0, epsilon = 1e-9);
    assert_relative_eq!(clamp.evaluate(after), 7.0, epsilon = 1e-9);

    let linear = CubicSpline::fit(&series, SplineExtrapolation::Linear).unwrap();
    assert_relative_eq!(linear.evaluate(before), -3.0, epsilon = 1e-9);
    assert_relative_eq!(linear.evaluate(after), 11.0, epsilon = 1e-9);
    assert!(linear.second_derivatives().iter().all(|m| m.abs() < 1e-9));
}

/// Test a polynomial model against the grid pipeline.
///
/// Verifies that the densified series is the fitted model sampled on the grid.
#[test]
fn test_polynomial_model_matches_pipeline() {
    let vals = [2.0, 2.5, 4.0, 6.5, 10.0].map(Some);
    let series = series_every(TimeDelta::hours(1), &vals);

    let fit = PolynomialFit::fit(&series.clean().unwrap(), 2).unwrap();
    assert_eq!(fit.coefficients().len(), 3);

    let result = quiet()
        .method(Method::POLYNOMIAL)
        .step_str("20min")
        .build()
        .unwrap()
        .run(&series)
        .unwrap();
    for (t, v) in result.series.iter() {
        assert_relative_eq!(v, fit.evaluate(t), epsilon = 1e-12);
    }
    assert_relative_eq!(result.series.value_at(t0() + TimeDelta::hours(2)).unwrap(), 4.0, epsilon = 1e-9);
}
