//! Resampling step (target interval).
//!
//! ## Purpose
//!
//! This module defines [`Step`], a strictly positive duration used as the
//! spacing of the resampling grid, and its parser for short frequency
//! strings (`"5min"`, `"30T"`, `"2H"`, ...).
//!
//! ## Key concepts
//!
//! * **Multiplier**: Optional leading integer; `"H"` means one hour.
//! * **Units**: `ns`/`N`, `us`/`U`, `ms`/`L`, `s`/`S`, `min`/`T`, `h`/`H`, `D`/`d`.
//!
//! ## Invariants
//!
//! * A `Step` is always strictly positive.
//! * `Display` uses the largest unit that divides the step exactly, so the
//!   printed form parses back to the same step.

// External dependencies
use chrono::TimeDelta;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

// Internal dependencies
use crate::primitives::errors::DensifyError;

/// Default resampling step: five minutes.
pub const DEFAULT_STEP_MINUTES: i64 = 5;

// ============================================================================
// Step
// ============================================================================

/// Strictly positive spacing of a resampling grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(TimeDelta);

impl Step {
    /// Wrap a duration, rejecting zero and negative values.
    pub fn new(delta: TimeDelta) -> Result<Self, DensifyError> {
        if delta <= TimeDelta::zero() {
            return Err(DensifyError::InvalidStep(format!(
                "step must be a positive duration, got {delta}"
            )));
        }
        Ok(Self(delta))
    }

    /// Step of `n` seconds.
    pub fn seconds(n: i64) -> Result<Self, DensifyError> {
        Self::from_units(n, "s")
    }

    /// Step of `n` minutes.
    pub fn minutes(n: i64) -> Result<Self, DensifyError> {
        Self::from_units(n, "min")
    }

    /// Step of `n` hours.
    pub fn hours(n: i64) -> Result<Self, DensifyError> {
        Self::from_units(n, "h")
    }

    /// The underlying duration.
    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }

    /// Step length in whole nanoseconds.
    fn total_nanos(&self) -> i128 {
        i128::from(self.0.num_seconds()) * 1_000_000_000 + i128::from(self.0.subsec_nanos())
    }

    fn from_units(n: i64, unit: &str) -> Result<Self, DensifyError> {
        let delta = match unit {
            "ns" | "N" => Some(TimeDelta::nanoseconds(n)),
            "us" | "U" => Some(TimeDelta::microseconds(n)),
            "ms" | "L" => TimeDelta::try_milliseconds(n),
            "s" | "S" => TimeDelta::try_seconds(n),
            "min" | "T" => TimeDelta::try_minutes(n),
            "h" | "H" => TimeDelta::try_hours(n),
            "D" | "d" => TimeDelta::try_days(n),
            other => {
                return Err(DensifyError::InvalidStep(format!(
                    "unknown frequency unit '{other}'"
                )));
            }
        };
        let delta = delta
            .ok_or_else(|| DensifyError::InvalidStep(format!("{n}{unit} is out of range")))?;
        Self::new(delta)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self(TimeDelta::minutes(DEFAULT_STEP_MINUTES))
    }
}

impl TryFrom<TimeDelta> for Step {
    type Error = DensifyError;

    fn try_from(delta: TimeDelta) -> Result<Self, Self::Error> {
        Self::new(delta)
    }
}

impl FromStr for Step {
    type Err = DensifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| DensifyError::InvalidStep(format!("'{s}' has no unit")))?;
        let (count, unit) = s.split_at(split);

        let n = if count.is_empty() {
            1
        } else {
            count
                .parse::<i64>()
                .map_err(|_| DensifyError::InvalidStep(format!("'{s}' has an invalid count")))?
        };
        Self::from_units(n, unit)
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        const UNITS: [(i128, &str); 6] = [
            (86_400_000_000_000, "D"),
            (3_600_000_000_000, "h"),
            (60_000_000_000, "min"),
            (1_000_000_000, "s"),
            (1_000_000, "ms"),
            (1_000, "us"),
        ];

        let ns = self.total_nanos();
        match UNITS.iter().find(|(size, _)| ns % size == 0) {
            Some((size, unit)) => write!(f, "{}{unit}", ns / size),
            None => write!(f, "{ns}ns"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Step {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
