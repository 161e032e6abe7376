//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the strategies
//! and reports:
//! - Descriptive statistics (mean, standard deviation, extrema, differences)
//! - Unit-interval axis scaling
//! - Tridiagonal solver for spline systems
//!
//! These are reusable building blocks with no time-series logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Descriptive statistics.
pub mod stats;

/// Unit-interval scaling.
pub mod scaling;

/// Tridiagonal linear systems.
pub mod tridiagonal;
