//! High-level API for densification.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring the grid step, the interpolation method and
//! the evaluation parameters, ending in a [`Densifier`] that runs, compares
//! or validates.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Deferred errors**: Parsing failures while chaining (`step_str`) are
//!   recorded and surfaced by `build()`.
//! * **Validated**: Setting a parameter twice, or out of bounds, fails in `build()`.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DensifyBuilder`] via `Densify::new()`.
//! 2. Chain configuration methods (`.step_str()`, `.method()`, etc.).
//! 3. Call `.build()` to obtain a [`Densifier`].
//! 4. Call `.run()`, `.compare()` or `.validate()` on a raw [`Series`].

// External dependencies
use std::sync::Arc;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::observer::{Event, default_observer};

// Publicly re-exported types
pub use crate::algorithms::grid::ResampleGrid;
pub use crate::algorithms::interpolation::{
    DEFAULT_POLYNOMIAL_ORDER, MAX_POLYNOMIAL_ORDER, Method,
};
pub use crate::algorithms::polynomial::PolynomialFit;
pub use crate::algorithms::spline::{CubicSpline, SplineExtrapolation};
pub use crate::engine::executor::{DensifyConfig, Densifier};
pub use crate::engine::output::{DensifyResult, ValueSummary};
pub use crate::evaluation::comparison::{ComparisonReport, MethodComparator, MethodRun};
pub use crate::evaluation::holdout::{HoldoutReport, HoldoutValidator, ValidationReport};
pub use crate::evaluation::plausibility::RangeCheck;
pub use crate::evaluation::quality::{QualityReport, Smoothness};
pub use crate::primitives::errors::DensifyError;
pub use crate::primitives::observer::{
    Event as DensifyEvent, FnObserver, NoopObserver, Observer, SharedObserver, TracingObserver,
};
pub use crate::primitives::series::{Axis, Series, TimeSeries};
pub use crate::primitives::step::Step;

/// Fluent builder for densification runs.
#[derive(Debug, Clone, Default)]
pub struct DensifyBuilder {
    /// Grid spacing.
    pub step: Option<Step>,

    /// Strategy for single runs.
    pub method: Option<Method>,

    /// Strategy given by name, resolved in `build()`.
    pub method_name: Option<String>,

    /// Order for polynomial entries named without an order.
    pub polynomial_order: Option<usize>,

    /// Spline behaviour outside the observed span.
    pub extrapolation: Option<SplineExtrapolation>,

    /// Replace unknown method names with linear.
    pub fallback_to_linear: Option<bool>,

    /// Fraction of points held out during validation.
    pub holdout_fraction: Option<f64>,

    /// Holdout split seed.
    pub seed: Option<u64>,

    /// Range-check tolerance fraction.
    pub range_tolerance: Option<f64>,

    /// Method subset for comparison and validation.
    pub methods: Option<Vec<String>>,

    /// Recommend the comparison winner by holdout RMSE.
    pub rank_by_holdout: Option<bool>,

    /// Event sink.
    pub observer: Option<SharedObserver>,

    /// Error recorded while chaining.
    #[doc(hidden)]
    pub deferred_error: Option<DensifyError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl DensifyBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid step.
    pub fn step(mut self, step: Step) -> Self {
        if self.step.is_some() {
            self.duplicate_param = Some("step");
        }
        self.step = Some(step);
        self
    }

    /// Set the grid step from a frequency string such as `"5min"` or `"30T"`.
    pub fn step_str(self, freq: &str) -> Self {
        match freq.parse::<Step>() {
            Ok(step) => self.step(step),
            Err(err) => {
                let mut this = self;
                if this.step.is_some() {
                    this.duplicate_param = Some("step");
                }
                this.deferred_error.get_or_insert(err);
                this
            }
        }
    }

    /// Set the interpolation method.
    pub fn method(mut self, method: Method) -> Self {
        if self.method.is_some() || self.method_name.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method = Some(method);
        self
    }

    /// Set the interpolation method by name (`"linear"`, `"time"`,
    /// `"polynomial"`, `"polynomial:3"`, `"spline"`, ...).
    pub fn method_name(mut self, name: impl Into<String>) -> Self {
        if self.method.is_some() || self.method_name.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method_name = Some(name.into());
        self
    }

    /// Set the polynomial order.
    pub fn polynomial_order(mut self, order: usize) -> Self {
        if self.polynomial_order.is_some() {
            self.duplicate_param = Some("polynomial_order");
        }
        self.polynomial_order = Some(order);
        self
    }

    /// Set the spline extrapolation policy.
    pub fn spline_extrapolation(mut self, policy: SplineExtrapolation) -> Self {
        if self.extrapolation.is_some() {
            self.duplicate_param = Some("spline_extrapolation");
        }
        self.extrapolation = Some(policy);
        self
    }

    /// Replace an unknown method name with linear interpolation instead of
    /// failing. Off by default.
    pub fn fallback_to_linear(mut self, enabled: bool) -> Self {
        if self.fallback_to_linear.is_some() {
            self.duplicate_param = Some("fallback_to_linear");
        }
        self.fallback_to_linear = Some(enabled);
        self
    }

    /// Set the holdout fraction, in (0, 1).
    pub fn holdout_fraction(mut self, fraction: f64) -> Self {
        if self.holdout_fraction.is_some() {
            self.duplicate_param = Some("holdout_fraction");
        }
        self.holdout_fraction = Some(fraction);
        self
    }

    /// Set the holdout split seed.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the range-check tolerance fraction.
    pub fn range_tolerance(mut self, tolerance: f64) -> Self {
        if self.range_tolerance.is_some() {
            self.duplicate_param = Some("range_tolerance");
        }
        self.range_tolerance = Some(tolerance);
        self
    }

    /// Restrict comparison and validation to the named methods.
    pub fn methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.methods.is_some() {
            self.duplicate_param = Some("methods");
        }
        self.methods = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Pick the comparison recommendation by holdout RMSE.
    pub fn rank_by_holdout(mut self, enabled: bool) -> Self {
        if self.rank_by_holdout.is_some() {
            self.duplicate_param = Some("rank_by_holdout");
        }
        self.rank_by_holdout = Some(enabled);
        self
    }

    /// Send pipeline events to `observer` instead of `tracing`.
    pub fn observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        if self.observer.is_some() {
            self.duplicate_param = Some("observer");
        }
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Validate the configuration and build a [`Densifier`].
    pub fn build(self) -> Result<Densifier, DensifyError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let observer = self.observer.unwrap_or_else(default_observer);
        let defaults = DensifyConfig::default();
        let polynomial_order = self.polynomial_order.unwrap_or(defaults.polynomial_order);
        let fallback_to_linear = self.fallback_to_linear.unwrap_or(false);

        let method = match (self.method, self.method_name) {
            (Some(method), _) => method,
            (None, Some(name)) => match name.parse::<Method>() {
                Ok(Method::Polynomial { .. }) if !name.contains(':') => {
                    Method::Polynomial {
                        order: polynomial_order,
                    }
                }
                Ok(method) => method,
                Err(DensifyError::UnsupportedMethod(_)) if fallback_to_linear => {
                    observer.observe(&Event::FallbackApplied { requested: &name });
                    Method::Linear
                }
                Err(err) => return Err(err),
            },
            (None, None) => defaults.method,
        };

        let config = DensifyConfig {
            step: self.step.unwrap_or(defaults.step),
            method,
            polynomial_order,
            extrapolation: self.extrapolation.unwrap_or(defaults.extrapolation),
            fallback_to_linear,
            holdout_fraction: self.holdout_fraction.unwrap_or(defaults.holdout_fraction),
            seed: self.seed.unwrap_or(defaults.seed),
            range_tolerance: self.range_tolerance.unwrap_or(defaults.range_tolerance),
            methods: self.methods,
            rank_by_holdout: self.rank_by_holdout.unwrap_or(false),
        };
        Densifier::with_observer(config, observer)
    }
}
