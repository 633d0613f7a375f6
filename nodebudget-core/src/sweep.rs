//! Sweep drivers for budget curves
//!
//! ## Overview
//!
//! A budget question is rarely about one operating point: the interesting
//! output is a curve - minimum transmission interval against harvested
//! power, or latency against payload size - with the boundary of the
//! feasible region marked. This module drives the radio and storage models
//! across an integer control range and collects the feasible points.
//!
//! ## Control Variables
//!
//! - Harvested power, stepped in whole microwatts. Peak demand and the
//!   capacitance sized for it do not depend on harvested power, so they
//!   are computed once per sweep rather than once per step.
//! - Payload size, stepped in whole bytes, substituted into the scenario
//!   at each step.
//!
//! ## Feasibility Filtering
//!
//! Points whose result is infeasible are skipped, never recorded and never
//! abort the sweep. The first feasible control value is the left boundary
//! of the feasible region; presentation layers typically annotate it.
//!
//! ## Iterators vs Curves
//!
//! Each sweep exists as a lazy iterator (no allocation, suitable for
//! no_std consumers that stream points out over a wire) and as a
//! collected [`SweepCurve`] for callers that want the whole sequence.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::ops::Range;

use crate::{
    storage::EnergyStore,
    traits::{Feasibility, PeakDemand, RadioModel, Scenario},
};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! sweep_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! sweep_debug {
    ($($arg:tt)*) => {};
}

/// Harvested-power control steps are whole microwatts
const WATTS_PER_MICROWATT: f32 = 1e-6;

/// One feasible point of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    /// Control value: microwatts of harvested power, or payload bytes
    pub control: u32,
    /// Result at this control value [s]
    pub value: f32,
}

/// Collected result of one sweep
///
/// Feasible points only, in control order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepCurve {
    points: Vec<SweepPoint>,
}

impl SweepCurve {
    /// The feasible points, in control order
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Left boundary of the feasible region, if any point was feasible
    pub fn first_feasible(&self) -> Option<u32> {
        self.points.first().map(|p| p.control)
    }

    /// Number of feasible points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point in the range was feasible
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Minimum transmission interval against harvested power
///
/// At each whole-microwatt step: recharge time for the sweep-invariant
/// peak demand, plus the burst itself. Created by [`min_interval_sweep`].
pub struct IntervalSweep<'a> {
    store: &'a EnergyStore,
    demand: PeakDemand,
    capacitance: f32,
    idle_power: f32,
    microwatts: Range<u32>,
}

impl<'a> IntervalSweep<'a> {
    fn new<R: RadioModel + ?Sized>(
        radio: &R,
        store: &'a EnergyStore,
        scenario: &Scenario,
        microwatts: Range<u32>,
    ) -> Self {
        // Demand and capacitance do not vary with harvested power; size
        // them once for the whole sweep.
        let demand = radio.peak_demand(store, scenario);
        let capacitance = store.min_capacitance(&demand);
        Self {
            store,
            demand,
            capacitance,
            idle_power: radio.idle_power(),
            microwatts,
        }
    }
}

impl Iterator for IntervalSweep<'_> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        for ph in self.microwatts.by_ref() {
            let p = ph as f32 * WATTS_PER_MICROWATT;
            let charge = self.store.charge_time(self.capacitance, p, self.idle_power);
            if let Feasibility::Feasible(interval) = self.demand.min_interval(charge) {
                return Some(SweepPoint { control: ph, value: interval });
            }
        }
        None
    }
}

/// Latency against payload size
///
/// At each whole-byte step the payload is substituted into the scenario.
/// Created by [`latency_payload_sweep`].
pub struct LatencyPayloadSweep<'a, R: RadioModel + ?Sized> {
    radio: &'a R,
    store: &'a EnergyStore,
    scenario: Scenario,
    harvested_power: f32,
    bytes: Range<u32>,
}

impl<R: RadioModel + ?Sized> Iterator for LatencyPayloadSweep<'_, R> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        for pl in self.bytes.by_ref() {
            let scenario = self.scenario.with_payload(pl);
            if let Feasibility::Feasible(latency) =
                self.radio.latency(self.store, &scenario, self.harvested_power)
            {
                return Some(SweepPoint { control: pl, value: latency });
            }
        }
        None
    }
}

/// Latency against harvested power
///
/// Meaningful for radios whose latency includes recharge cycles; for the
/// others the curve is flat. Created by [`latency_power_sweep`].
pub struct LatencyPowerSweep<'a, R: RadioModel + ?Sized> {
    radio: &'a R,
    store: &'a EnergyStore,
    scenario: Scenario,
    microwatts: Range<u32>,
}

impl<R: RadioModel + ?Sized> Iterator for LatencyPowerSweep<'_, R> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        for ph in self.microwatts.by_ref() {
            let p = ph as f32 * WATTS_PER_MICROWATT;
            if let Feasibility::Feasible(latency) = self.radio.latency(self.store, &self.scenario, p)
            {
                return Some(SweepPoint { control: ph, value: latency });
            }
        }
        None
    }
}

/// Lazy minimum-interval sweep over harvested power [uW]
pub fn min_interval_sweep<'a, R: RadioModel + ?Sized>(
    radio: &R,
    store: &'a EnergyStore,
    scenario: &Scenario,
    microwatts: Range<u32>,
) -> IntervalSweep<'a> {
    IntervalSweep::new(radio, store, scenario, microwatts)
}

/// Lazy latency sweep over payload size [B]
pub fn latency_payload_sweep<'a, R: RadioModel + ?Sized>(
    radio: &'a R,
    store: &'a EnergyStore,
    scenario: &Scenario,
    harvested_power: f32,
    bytes: Range<u32>,
) -> LatencyPayloadSweep<'a, R> {
    LatencyPayloadSweep {
        radio,
        store,
        scenario: *scenario,
        harvested_power,
        bytes,
    }
}

/// Lazy latency sweep over harvested power [uW]
pub fn latency_power_sweep<'a, R: RadioModel + ?Sized>(
    radio: &'a R,
    store: &'a EnergyStore,
    scenario: &Scenario,
    microwatts: Range<u32>,
) -> LatencyPowerSweep<'a, R> {
    LatencyPowerSweep {
        radio,
        store,
        scenario: *scenario,
        microwatts,
    }
}

/// Collected minimum-interval curve over harvested power [uW]
pub fn min_interval_curve<R: RadioModel + ?Sized>(
    radio: &R,
    store: &EnergyStore,
    scenario: &Scenario,
    microwatts: Range<u32>,
) -> SweepCurve {
    let points: Vec<SweepPoint> =
        min_interval_sweep(radio, store, scenario, microwatts.clone()).collect();
    sweep_debug!(
        "interval sweep {}..{} uW: {} feasible points",
        microwatts.start,
        microwatts.end,
        points.len()
    );
    SweepCurve { points }
}

/// Collected latency curve over payload size [B]
pub fn latency_payload_curve<R: RadioModel + ?Sized>(
    radio: &R,
    store: &EnergyStore,
    scenario: &Scenario,
    harvested_power: f32,
    bytes: Range<u32>,
) -> SweepCurve {
    let points: Vec<SweepPoint> =
        latency_payload_sweep(radio, store, scenario, harvested_power, bytes.clone()).collect();
    sweep_debug!(
        "latency sweep {}..{} B: {} feasible points",
        bytes.start,
        bytes.end,
        points.len()
    );
    SweepCurve { points }
}

/// Collected latency curve over harvested power [uW]
pub fn latency_power_curve<R: RadioModel + ?Sized>(
    radio: &R,
    store: &EnergyStore,
    scenario: &Scenario,
    microwatts: Range<u32>,
) -> SweepCurve {
    let points: Vec<SweepPoint> =
        latency_power_sweep(radio, store, scenario, microwatts.clone()).collect();
    sweep_debug!(
        "latency sweep {}..{} uW: {} feasible points",
        microwatts.start,
        microwatts.end,
        points.len()
    );
    SweepCurve { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::{BleLpn, LoraClassA, SixTischLeaf};

    fn scenario() -> Scenario {
        Scenario::new(20, 0.05, 0.01)
    }

    #[test]
    fn interval_curve_is_non_increasing() {
        let radio = LoraClassA::sodaq_explorer();
        let store = EnergyStore::supercap();
        let curve = min_interval_curve(&radio, &store, &scenario(), 10..2_000);
        assert!(!curve.is_empty());
        for pair in curve.points().windows(2) {
            assert!(pair[1].value <= pair[0].value * 1.000_001);
        }
    }

    #[test]
    fn interval_sweep_tracks_first_feasible() {
        let radio = LoraClassA::sodaq_explorer();
        let store = EnergyStore::supercap();
        // This radio recharges even at the bottom of the range.
        let curve = min_interval_curve(&radio, &store, &scenario(), 10..100);
        assert_eq!(curve.first_feasible(), Some(10));
    }

    #[test]
    fn infeasible_region_is_skipped_not_fatal() {
        let radio = SixTischLeaf::cc1200();
        let store = EnergyStore::supercap();
        let curve = min_interval_curve(&radio, &store, &scenario(), 10..5_000);
        // The left edge of the range cannot recharge the store; the curve
        // starts strictly inside it.
        let first = curve.first_feasible().unwrap();
        assert!(first > 10);
        assert_eq!(curve.len(), (5_000 - first) as usize);
    }

    #[test]
    fn empty_range_yields_empty_curve() {
        let radio = BleLpn::nrf52840_devkit();
        let store = EnergyStore::supercap();
        let curve = min_interval_curve(&radio, &store, &scenario(), 10..10);
        assert!(curve.is_empty());
        assert_eq!(curve.first_feasible(), None);
    }

    #[test]
    fn payload_latency_is_non_decreasing() {
        let radio = BleLpn::nrf52840_devkit();
        let store = EnergyStore::supercap();
        let curve = latency_payload_curve(&radio, &store, &scenario(), 0.0, 0..200);
        assert_eq!(curve.len(), 200);
        for pair in curve.points().windows(2) {
            assert!(pair[1].value >= pair[0].value);
        }
    }

    #[test]
    fn lora_payload_latency_covers_every_byte() {
        let radio = LoraClassA::sodaq_explorer();
        let store = EnergyStore::supercap();
        let curve = latency_payload_curve(&radio, &store, &scenario(), 0.0, 0..200);
        // Always-feasible radio: one point per control step.
        assert_eq!(curve.len(), 200);
        assert_eq!(curve.first_feasible(), Some(0));
    }

    #[test]
    fn tsch_latency_power_curve_filters_and_descends() {
        let radio = SixTischLeaf::cc1200();
        let store = EnergyStore::supercap();
        let curve = latency_power_curve(&radio, &store, &scenario(), 10..10_000);
        let first = curve.first_feasible().unwrap();
        assert!(first > 10);
        for pair in curve.points().windows(2) {
            // Whole-slot rounding makes the curve a staircase; it must
            // never rise.
            assert!(pair[1].value <= pair[0].value + 1e-4);
        }
    }
}
