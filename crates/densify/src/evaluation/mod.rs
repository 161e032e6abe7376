//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer judges densified output:
//! - Summary statistics and smoothness of an interpolated series
//! - Range plausibility against the observed values
//! - Seeded holdout validation
//! - Multi-method comparison
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Quality metrics.
pub mod quality;

/// Range plausibility check.
pub mod plausibility;

/// Holdout validation.
pub mod holdout;

/// Method comparison.
pub mod comparison;
