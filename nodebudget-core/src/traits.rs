//! Core trait and value types for radio energy models
//!
//! These define the interface all radio technologies implement, plus the
//! value types that carry results between the radio model, the storage
//! model and the sweep drivers. All results are returned by value; nothing
//! here holds mutable state, so models can be shared freely between
//! concurrent sweeps.

use crate::storage::EnergyStore;

/// Per-report scenario constants
///
/// Describes one reporting cycle of the node: how many application bytes it
/// ships and what the sensing phase costs before the radio wakes up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// Application payload per report [B]
    pub payload: u32,
    /// Energy spent sampling the sensor [J]
    pub sense_energy: f32,
    /// Time spent sampling the sensor [s]
    pub sense_time: f32,
}

impl Scenario {
    /// Scenario with the given payload and sensing cost
    pub fn new(payload: u32, sense_energy: f32, sense_time: f32) -> Self {
        Self { payload, sense_energy, sense_time }
    }

    /// Same scenario with a different payload
    ///
    /// Used by payload sweeps to vary the control variable while keeping
    /// the sensing cost fixed.
    pub fn with_payload(self, payload: u32) -> Self {
        Self { payload, ..self }
    }
}

/// Peak demand of one reporting cycle
///
/// The energy the storage element must buffer and the time the burst lasts.
/// Recomputed in full by every [`RadioModel::peak_demand`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakDemand {
    /// Energy drawn during the burst, as seen by the storage element [J]
    pub energy: f32,
    /// Duration of the burst [s]
    pub duration: f32,
}

impl PeakDemand {
    /// Minimum achievable transmission interval for this demand
    ///
    /// The node can report again once the capacitor has recharged, so the
    /// interval is the recharge time plus the burst itself. Infeasible
    /// recharge makes the interval infeasible.
    pub fn min_interval(&self, charge_time: Feasibility) -> Feasibility {
        let duration = self.duration;
        charge_time.map(|t| t + duration)
    }

    /// True when both fields are finite
    ///
    /// A degenerate radio configuration propagates as NaN or infinity;
    /// downstream consumers treat such demands as infeasible.
    pub fn is_finite(&self) -> bool {
        self.energy.is_finite() && self.duration.is_finite()
    }
}

/// Outcome of a computation that may have no physical solution
///
/// Replaces the `-1` sentinel convention: a charge time, interval or
/// latency either exists as a positive number of seconds or it does not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feasibility {
    /// The quantity exists; value in seconds
    Feasible(f32),
    /// No solution under the given harvested power and configuration
    Infeasible,
}

impl Feasibility {
    /// True for `Feasible(_)`
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The value, if feasible
    pub fn value(&self) -> Option<f32> {
        match self {
            Self::Feasible(v) => Some(*v),
            Self::Infeasible => None,
        }
    }

    /// Apply `f` to a feasible value, passing infeasibility through
    pub fn map<F: FnOnce(f32) -> f32>(self, f: F) -> Self {
        match self {
            Self::Feasible(v) => Self::Feasible(f(v)),
            Self::Infeasible => Self::Infeasible,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Feasibility {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Feasible(v) => defmt::write!(fmt, "Feasible({} s)", v),
            Self::Infeasible => defmt::write!(fmt, "Infeasible"),
        }
    }
}

/// Closed-form energy model of a wireless technology
///
/// Implemented by each supported radio. The signature is uniform across
/// technologies: radios whose latency does not depend on recharge cycles
/// (LoRaWAN, BLE) simply ignore the storage model and harvested power.
pub trait RadioModel {
    /// Power drawn between bursts [W]
    ///
    /// This is what the harvester has to cover while the capacitor
    /// recharges, so it is the consumed-power input to
    /// [`EnergyStore::charge_time`].
    fn idle_power(&self) -> f32;

    /// Peak energy and duration of one reporting cycle
    ///
    /// The storage model contributes its PMU load factor; the scenario
    /// contributes payload and sensing cost.
    fn peak_demand(&self, store: &EnergyStore, scenario: &Scenario) -> PeakDemand;

    /// End-to-end latency of one report [s]
    ///
    /// For LoRaWAN and BLE this is a pure function of the payload and
    /// always feasible. For 6TiSCH it includes capacitor recharge cycles
    /// and becomes infeasible when the harvested power cannot recharge
    /// the store.
    fn latency(&self, store: &EnergyStore, scenario: &Scenario, harvested_power: f32)
        -> Feasibility;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasibility_accessors() {
        assert!(Feasibility::Feasible(1.0).is_feasible());
        assert!(!Feasibility::Infeasible.is_feasible());
        assert_eq!(Feasibility::Feasible(2.0).value(), Some(2.0));
        assert_eq!(Feasibility::Infeasible.value(), None);
    }

    #[test]
    fn feasibility_map_passes_infeasible_through() {
        assert_eq!(Feasibility::Feasible(2.0).map(|v| v + 1.0), Feasibility::Feasible(3.0));
        assert_eq!(Feasibility::Infeasible.map(|v| v + 1.0), Feasibility::Infeasible);
    }

    #[test]
    fn min_interval_adds_burst_duration() {
        let demand = PeakDemand { energy: 0.5, duration: 10.0 };
        assert_eq!(demand.min_interval(Feasibility::Feasible(90.0)), Feasibility::Feasible(100.0));
        assert_eq!(demand.min_interval(Feasibility::Infeasible), Feasibility::Infeasible);
    }

    #[test]
    fn scenario_payload_substitution() {
        let base = Scenario::new(20, 0.05, 0.01);
        let varied = base.with_payload(120);
        assert_eq!(varied.payload, 120);
        assert_eq!(varied.sense_energy, base.sense_energy);
    }
}
