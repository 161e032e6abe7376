#![cfg(feature = "dev")]
//! Tests for the numeric building blocks behind the reports and the spline.
//!
//! These tests exercise the math layer directly through `densify::internals`:
//! - Descriptive statistics used by quality and holdout reports
//! - Unit-interval scaling used by the polynomial fit
//! - The tridiagonal solver used by the cubic spline
//!
//! ## Test Organization
//!
//! 1. **Statistics** - Moments, extrema and first differences
//! 2. **Scaling** - Fitting and applying a unit scale
//! 3. **Tridiagonal** - Solutions, singular pivots and malformed systems

use approx::assert_relative_eq;

use densify::internals::math::scaling::UnitScale;
use densify::internals::math::stats::{abs_diff_summary, mean, min_max, sample_std};
use densify::internals::math::tridiagonal::solve_tridiagonal;

// ============================================================================
// Statistics
// ============================================================================

/// Test moments of a textbook sample.
///
/// Verifies the mean and the n-1 standard deviation.
#[test]
fn test_sample_moments() {
    let vals = [2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    assert_relative_eq!(mean(&vals).unwrap(), 5.0, epsilon = 1e-12);
    assert_relative_eq!(sample_std(&vals).unwrap(), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    assert_eq!(min_max(&vals), Some((2.0, 9.0)));
}

/// Test statistics on inputs too short to describe.
///
/// Verifies that a single value has a mean but no spread or differences.
#[test]
fn test_short_inputs() {
    assert_eq!(mean(&[3.5f64]), Some(3.5));
    assert_eq!(sample_std(&[3.5f64]), None);
    assert_eq!(abs_diff_summary(&[3.5f64]), None);
    assert_eq!(min_max::<f64>(&[]), None);
}

/// Test the first-difference summary.
///
/// Verifies mean and maximum of absolute steps, independent of sign.
#[test]
fn test_abs_diff_summary() {
    let (mean_step, max_step) = abs_diff_summary(&[1.0f64, 3.0, 2.0, 6.0]).unwrap();

    assert_relative_eq!(mean_step, 7.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(max_step, 4.0, epsilon = 1e-12);
}

// ============================================================================
// Scaling
// ============================================================================

/// Test mapping an extent onto the unit interval.
#[test]
fn test_unit_scale_maps_extent() {
    let scale = UnitScale::fit(&[30.0f64, 10.0, 20.0]).unwrap();

    assert_relative_eq!(scale.apply(10.0), 0.0, epsilon = 1e-12);
    assert_relative_eq!(scale.apply(20.0), 0.5, epsilon = 1e-12);
    assert_relative_eq!(scale.apply(30.0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(scale.apply(40.0), 1.5, epsilon = 1e-12);
}

/// Test that a degenerate extent has no scale.
#[test]
fn test_unit_scale_rejects_zero_width() {
    assert!(UnitScale::fit(&[5.0f64, 5.0]).is_none());
    assert!(UnitScale::<f64>::fit(&[]).is_none());
}

// ============================================================================
// Tridiagonal
// ============================================================================

/// Test a diagonally dominant system with a known solution.
///
/// Verifies x = [1, 2, 3] for diag 2 and off-diagonals 1, in f64 and f32.
#[test]
fn test_tridiagonal_known_solution() {
    let x = solve_tridiagonal(&[1.0f64, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0], &[4.0, 8.0, 8.0])
        .unwrap();
    for (got, want) in x.iter().zip([1.0, 2.0, 3.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }

    let x = solve_tridiagonal(&[1.0f32, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0], &[4.0, 8.0, 8.0])
        .unwrap();
    assert_relative_eq!(x[2], 3.0f32, epsilon = 1e-5);
}

/// Test a one-equation system.
#[test]
fn test_tridiagonal_single_row() {
    assert_eq!(solve_tridiagonal(&[], &[4.0f64], &[], &[2.0]), Some(vec![0.5]));
}

/// Test refusal of singular and malformed systems.
///
/// Verifies a zero leading pivot and mismatched band lengths both give `None`.
#[test]
fn test_tridiagonal_rejects_bad_systems() {
    assert!(solve_tridiagonal(&[1.0f64], &[0.0, 1.0], &[1.0], &[1.0, 1.0]).is_none());
    assert!(solve_tridiagonal(&[1.0f64], &[2.0, 2.0], &[1.0, 1.0], &[1.0, 1.0]).is_none());
    assert!(solve_tridiagonal::<f64>(&[], &[], &[], &[]).is_none());
}
