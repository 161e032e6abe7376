//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data types and shared utilities used throughout
//! the crate. It has zero internal dependencies within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Raw and cleaned time-value series.
pub mod series;

/// Resampling step and frequency parsing.
pub mod step;

/// Shared error types.
pub mod errors;

/// Diagnostics observer seam.
pub mod observer;
