//! Closed-form energy budgets for energy-harvesting wireless sensor nodes
//!
//! Answers the sizing questions of a batteryless node before any hardware
//! exists: given a radio's timing and power characteristics, a storage/PMU
//! configuration and a harvested-power level, how often can the node
//! report, how fast can a report arrive, and what must the capacitor
//! buffer per burst.
//!
//! Key constraints:
//! - Pure closed-form models, no time-domain simulation
//! - No heap allocation outside curve collection
//! - Infeasible operating points are values, not errors
//!
//! ```no_run
//! use nodebudget_core::{EnergyStore, LoraClassA, Scenario};
//! use nodebudget_core::sweep::min_interval_curve;
//!
//! let radio = LoraClassA::sodaq_explorer();
//! let store = EnergyStore::supercap();
//! let scenario = Scenario::new(20, 0.05, 0.01);
//!
//! // Minimum reporting interval across harvested power levels
//! let curve = min_interval_curve(&radio, &store, &scenario, 10..250_000);
//! match curve.first_feasible() {
//!     Some(boundary) => {} // node is viable from `boundary` uW upward
//!     None => {}           // harvesting cannot sustain this radio
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod constants;
pub mod errors;
pub mod radio;
pub mod storage;
pub mod sweep;
pub mod traits;

// Public API
pub use errors::{ConfigError, ConfigResult};
pub use radio::{BleLpn, LoraClassA, SixTischLeaf};
pub use storage::EnergyStore;
pub use sweep::{SweepCurve, SweepPoint};
pub use traits::{Feasibility, PeakDemand, RadioModel, Scenario};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
