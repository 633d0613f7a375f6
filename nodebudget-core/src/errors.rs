//! Error Types for Device Configuration
//!
//! ## Design Philosophy
//!
//! Budget calculations themselves never raise errors: a point that cannot be
//! satisfied by the physics is reported as
//! [`Feasibility::Infeasible`](crate::traits::Feasibility) and a sweep simply
//! skips it. Errors are reserved for configurations that can
//! never produce a meaningful number, and those are rejected *eagerly* at
//! construction time rather than surfacing later as NaN or infinity deep
//! inside a sweep.
//!
//! The error type follows the same constraints as the rest of the crate:
//!
//! 1. **Small Size**: one discriminant plus at most two `f32` fields, so it
//!    is cheap to return from constructors called in configuration loops.
//!
//! 2. **No Heap Allocation**: parameter names are `&'static str`, all other
//!    data is inline.
//!
//! 3. **Copy Semantics**: errors implement `Copy` so callers can store and
//!    re-report them without ownership gymnastics.
//!
//! ## What Gets Rejected
//!
//! - A storage voltage window with `v_max <= v_min` or `v_min <= 0`: the
//!   capacitance formula divides by `v_max^2 - v_min^2`.
//! - Non-positive bandwidth, datarate, timeslot duration or fragment payload:
//!   each appears as a divisor in a transmission-time model.
//! - Non-positive PMU efficiency factors: they scale every energy term.
//! - Zero hops: every latency model assumes at least the node itself.

use thiserror_no_std::Error;

/// Result type for model construction
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - rejected at construction, never mid-sweep
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Storage voltage window is empty or inverted
    #[error("Voltage window [{v_min}, {v_max}] V is not a valid operating range")]
    VoltageWindow {
        /// Lower PMU cutoff voltage [V]
        v_min: f32,
        /// Upper PMU cutoff voltage [V]
        v_max: f32,
    },

    /// A parameter that must be strictly positive is zero or negative
    #[error("Parameter {name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A parameter that must not be negative is negative
    #[error("Parameter {name} must not be negative, got {value}")]
    Negative {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::VoltageWindow { v_min, v_max } =>
                defmt::write!(fmt, "Voltage window [{}, {}] invalid", v_min, v_max),
            Self::NonPositive { name, value } =>
                defmt::write!(fmt, "{} must be positive, got {}", name, value),
            Self::Negative { name, value } =>
                defmt::write!(fmt, "{} must not be negative, got {}", name, value),
        }
    }
}

/// Check that a parameter is strictly positive
pub(crate) fn require_positive(name: &'static str, value: f32) -> ConfigResult<f32> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Check that a parameter is zero or positive
pub(crate) fn require_non_negative(name: &'static str, value: f32) -> ConfigResult<f32> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check() {
        assert!(require_positive("bandwidth", 125_000.0).is_ok());
        assert!(require_positive("bandwidth", 0.0).is_err());
        assert!(require_positive("bandwidth", -1.0).is_err());
        assert!(require_positive("bandwidth", f32::NAN).is_err());
    }

    #[test]
    fn non_negative_check() {
        assert!(require_non_negative("leak_power", 0.0).is_ok());
        assert!(require_non_negative("leak_power", 45e-6).is_ok());
        assert!(require_non_negative("leak_power", -1e-6).is_err());
    }
}
