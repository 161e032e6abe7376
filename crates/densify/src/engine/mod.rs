//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates complete runs:
//! - Parameter and input validation
//! - Pipeline execution with observer reporting
//! - Result and summary types
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Validation.
pub mod validator;

/// Configuration and pipeline execution.
pub mod executor;

/// Run output.
pub mod output;
