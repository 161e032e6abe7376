//! # densify: temperature time-series densification
//!
//! Turns sparse, possibly irregular temperature readings into a regular,
//! gap-free series at a finer step, and measures how trustworthy the result is.
//!
//! ## What does it do?
//!
//! Given `(timestamp, reading)` pairs with missing entries, `densify`
//! drops the gaps, lays a regular grid over the observed span and fills it
//! with one of four strategies:
//!
//! | Method         | Name            | Bounded by neighbours |
//! |----------------|-----------------|-----------------------|
//! | Linear         | `linear`        | yes                   |
//! | Time-weighted  | `time`          | yes                   |
//! | Polynomial(k)  | `polynomial:k`  | no                    |
//! | Cubic spline   | `spline`        | no                    |
//!
//! Each run reports summary statistics, a smoothness proxy, a density ratio
//! and a range plausibility check. Methods can be compared side by side and
//! validated against held-out observations.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use densify::prelude::*;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let series = Series::from_readings([
//!     (t0, Some(10.0)),
//!     (t0 + TimeDelta::hours(1), None),
//!     (t0 + TimeDelta::hours(2), Some(12.0)),
//! ]);
//!
//! let densifier = Densify::new()
//!     .step_str("30min")
//!     .method(Method::Linear)
//!     .build()?;
//!
//! let result = densifier.run(&series)?;
//! assert_eq!(result.series.values(), &[10.0, 10.5, 11.0, 11.5, 12.0]);
//! println!("{}", result);
//! # Result::<(), DensifyError>::Ok(())
//! ```
//!
//! ## Comparing methods
//!
//! ```rust
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use densify::prelude::*;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let readings = (0..12).map(|h| (t0 + TimeDelta::hours(h), Some(5.0 + (h as f64 * 0.5).sin())));
//! let series = Series::from_readings(readings);
//!
//! let report = Densify::new()
//!     .step_str("15min")
//!     .rank_by_holdout(true)
//!     .build()?
//!     .compare(&series)?;
//!
//! assert_eq!(report.methods.len(), 4);
//! println!("{}", report);
//! # Result::<(), DensifyError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! Pipeline stages emit `tracing` events through the default
//! [`TracingObserver`](prelude::TracingObserver); nothing is printed unless the
//! application installs a subscriber. Pass `.observer(NoopObserver)` to
//! silence them, or any [`Observer`](prelude::Observer) to capture them.
//!
//! ## Features
//!
//! * `parallel`: run the method comparator on the `rayon` pool.
//! * `serde`: `Serialize` for reports, `Serialize`/`Deserialize` for
//!   [`DensifyConfig`](prelude::DensifyConfig).
//! * `dev`: expose internal modules under `densify::internals`.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - grid and interpolation strategies.
mod algorithms;

// Layer 4: Evaluation - quality, plausibility, holdout and comparison.
mod evaluation;

// Layer 5: Engine - validation, orchestration and output.
mod engine;

// High-level fluent API.
mod api;

// Standard densify prelude.
pub mod prelude {
    pub use crate::api::{
        Axis, ComparisonReport, CubicSpline, DEFAULT_POLYNOMIAL_ORDER, DensifyBuilder as Densify,
        DensifyConfig, DensifyError, DensifyEvent, DensifyResult, Densifier, FnObserver,
        HoldoutReport, HoldoutValidator, MAX_POLYNOMIAL_ORDER, Method, MethodComparator,
        MethodRun, NoopObserver, Observer, PolynomialFit, QualityReport, RangeCheck,
        ResampleGrid, Series, SharedObserver, Smoothness, SplineExtrapolation, Step, TimeSeries,
        TracingObserver, ValidationReport, ValueSummary,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
