//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer turns a cleaned series into a densified one:
//! - Resampling grid construction and nearest-point lookup
//! - Interpolation strategy selection and dispatch
//! - Linear, time-weighted, polynomial and cubic-spline kernels
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Resampling grid.
pub mod grid;

/// Strategy enum and dispatch.
pub mod interpolation;

/// Piecewise linear kernels.
pub mod linear;

/// Least-squares polynomial.
pub mod polynomial;

/// Not-a-knot cubic spline.
pub mod spline;
