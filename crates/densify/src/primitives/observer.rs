//! Injectable diagnostics observer.
//!
//! ## Purpose
//!
//! The engine never initialises global logging. Instead every pipeline stage
//! reports an [`Event`] to an [`Observer`] supplied by the caller. The default
//! [`TracingObserver`] forwards events to `tracing`, which drops them unless
//! the application installed a subscriber.
//!
//! ## Key concepts
//!
//! * **Events**: Cleaning, grid construction, interpolation, per-method failures,
//!   compatibility fallbacks and holdout splits.
//! * **Observers**: `TracingObserver` (default), `NoopObserver`, or any closure
//!   wrapped in `FnObserver`.

// External dependencies
use core::fmt::Debug;
use std::sync::Arc;

// Internal dependencies
use crate::primitives::errors::DensifyError;

// ============================================================================
// Events
// ============================================================================

/// Something the engine did that a caller may want to log.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// Missing entries were dropped from a raw series.
    Cleaned {
        /// Entries in the raw series.
        raw: usize,
        /// Valid entries kept.
        valid: usize,
    },

    /// A resampling grid was built.
    GridBuilt {
        /// Number of grid points.
        points: usize,
        /// Step used, formatted.
        step: &'a str,
    },

    /// A strategy produced a densified series.
    Interpolated {
        /// Method name.
        method: &'a str,
        /// Points in the cleaned input.
        input: usize,
        /// Points in the output.
        output: usize,
    },

    /// A single method failed inside a batch (comparison or holdout).
    MethodFailed {
        /// Method name as requested.
        method: &'a str,
        /// The failure.
        error: &'a DensifyError,
    },

    /// An unknown method name was replaced by linear interpolation.
    FallbackApplied {
        /// The rejected name.
        requested: &'a str,
    },

    /// A holdout split was drawn.
    HoldoutSplit {
        /// Points kept for training.
        train: usize,
        /// Points held out.
        test: usize,
        /// Seed used.
        seed: u64,
    },
}

// ============================================================================
// Observer Trait
// ============================================================================

/// Receiver of engine events.
pub trait Observer: Send + Sync + Debug {
    /// Handle one event.
    fn observe(&self, event: &Event<'_>);
}

/// Shared observer handle stored in configurations.
pub type SharedObserver = Arc<dyn Observer>;

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &Event<'_>) {
        match *event {
            Event::Cleaned { raw, valid } => {
                tracing::debug!(raw, valid, dropped = raw - valid, "cleaned series");
            }
            Event::GridBuilt { points, step } => {
                tracing::debug!(points, step, "built resampling grid");
            }
            Event::Interpolated {
                method,
                input,
                output,
            } => {
                tracing::info!(method, input, output, "interpolation done");
            }
            Event::MethodFailed { method, error } => {
                tracing::warn!(method, %error, "interpolation method failed");
            }
            Event::FallbackApplied { requested } => {
                tracing::warn!(requested, "unsupported method, falling back to linear");
            }
            Event::HoldoutSplit { train, test, seed } => {
                tracing::debug!(train, test, seed, "drew holdout split");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&self, _event: &Event<'_>) {}
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F>(pub F);

impl<F> FnObserver<F>
where
    F: Fn(&Event<'_>) + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Debug for FnObserver<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnObserver")
    }
}

impl<F> Observer for FnObserver<F>
where
    F: Fn(&Event<'_>) + Send + Sync,
{
    fn observe(&self, event: &Event<'_>) {
        (self.0)(event)
    }
}

/// The observer used when none is configured.
pub fn default_observer() -> SharedObserver {
    Arc::new(TracingObserver)
}
