//! 6TiSCH leaf-node energy model
//!
//! Models a TSCH leaf under the 6TiSCH minimal schedule on a harvesting
//! power budget. One report occupies a five-slot peak; between frames the
//! node must sit through a full capacitor recharge, so latency is counted
//! in whole recharge-plus-burst cycles and depends on the storage model
//! and the harvested power.

use crate::{
    constants::tsch::{
        MAX_FRAME_BYTES, MULTI_HOP_OVERHEAD_BYTES, PEAK_SEQUENCE_SLOTS, SINGLE_HOP_OVERHEAD_BYTES,
    },
    errors::{require_non_negative, require_positive, ConfigError, ConfigResult},
    storage::EnergyStore,
    traits::{Feasibility, PeakDemand, RadioModel, Scenario},
};

/// Payload bytes that fit in the first frame before a report spills into
/// extra frames. The multi-hop test reclaims two bytes of the forwarding
/// overhead; kept as characterized.
const SINGLE_HOP_SPILL_BYTES: i32 = MAX_FRAME_BYTES - SINGLE_HOP_OVERHEAD_BYTES as i32;
const MULTI_HOP_SPILL_BYTES: i32 = MAX_FRAME_BYTES - MULTI_HOP_OVERHEAD_BYTES as i32 + 2;

/// Payload consumed by the first frame when testing for a second spill.
/// Swapped relative to the spill capacities above; kept as characterized
/// pending review of the measurement model.
const SINGLE_HOP_CARRIED_BYTES: i32 = 81;
const MULTI_HOP_CARRIED_BYTES: i32 = 89;

/// 6TiSCH leaf node
///
/// Schedule and measured energy constants of one device configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SixTischLeaf {
    /// Neighbour count in the minimal schedule
    neighbours: u32,
    /// Hops to the border router (>= 1)
    hops: u32,
    /// TSCH timeslot duration [s]
    timeslot: f32,
    /// DAO control message size [B]
    dao_payload: u32,
    /// Enhanced beacon size [B]
    eb_payload: u32,
    /// TX power draw [W]
    tx_power: f32,
    /// Fixed energy per occupied timeslot [J]
    timeslot_overhead_energy: f32,
    /// Fixed energy per peak sequence [J]
    peak_overhead_energy: f32,
    /// Idle power between reports [W]
    idle_power: f32,
}

impl SixTischLeaf {
    /// Radio model from schedule and energy constants
    ///
    /// - `neighbours`: neighbour count in the minimal schedule
    /// - `hops`: hops to the border router (>= 1)
    /// - `timeslot`: TSCH timeslot duration [s] (> 0)
    /// - `dao_payload`, `eb_payload`: control message sizes [B]
    /// - `tx_power`: TX power draw [W]
    /// - `timeslot_overhead_energy`: fixed energy per occupied slot [J]
    /// - `peak_overhead_energy`: fixed energy per peak sequence [J]
    /// - `idle_power`: draw between reports [W]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        neighbours: u32,
        hops: u32,
        timeslot: f32,
        dao_payload: u32,
        eb_payload: u32,
        tx_power: f32,
        timeslot_overhead_energy: f32,
        peak_overhead_energy: f32,
        idle_power: f32,
    ) -> ConfigResult<Self> {
        if hops == 0 {
            return Err(ConfigError::NonPositive { name: "hops", value: 0.0 });
        }
        Ok(Self {
            neighbours,
            hops,
            timeslot: require_positive("timeslot", timeslot)?,
            dao_payload,
            eb_payload,
            tx_power: require_non_negative("tx_power", tx_power)?,
            timeslot_overhead_energy: require_non_negative(
                "timeslot_overhead_energy",
                timeslot_overhead_energy,
            )?,
            peak_overhead_energy: require_non_negative("peak_overhead_energy", peak_overhead_energy)?,
            idle_power: require_non_negative("idle_power", idle_power)?,
        })
    }

    /// TI CC1200 sub-GHz transceiver, single hop, 15 ms slots
    pub fn cc1200() -> Self {
        // Constants validated by construction
        Self {
            neighbours: 1,
            hops: 1,
            timeslot: 0.015,
            dao_payload: 96,
            eb_payload: 16,
            tx_power: 0.000001873,
            timeslot_overhead_energy: 0.0006821,
            peak_overhead_energy: 0.001884,
            idle_power: 0.001076,
        }
    }

    /// TI CC2538 2.4 GHz SoC, single hop, 15 ms slots
    pub fn cc2538() -> Self {
        Self {
            neighbours: 1,
            hops: 1,
            timeslot: 0.015,
            dao_payload: 96,
            eb_payload: 16,
            tx_power: 0.000000174,
            timeslot_overhead_energy: 0.0003365,
            peak_overhead_energy: 0.0009706,
            idle_power: 0.000180,
        }
    }

    /// Same device placed deeper in the DODAG
    pub fn with_hops(self, hops: u32) -> ConfigResult<Self> {
        if hops == 0 {
            return Err(ConfigError::NonPositive { name: "hops", value: 0.0 });
        }
        Ok(Self { hops, ..self })
    }

    /// Hops to the border router
    pub fn hops(&self) -> u32 {
        self.hops
    }

    /// Neighbour count in the minimal schedule
    pub fn neighbours(&self) -> u32 {
        self.neighbours
    }

    /// Control message sizes: (DAO, enhanced beacon) [B]
    ///
    /// Not consumed by the peak model (the DAO energy path is a fixed
    /// shape); exposed for consumers that account control traffic.
    pub fn control_payloads(&self) -> (u32, u32) {
        (self.dao_payload, self.eb_payload)
    }

    /// True when `payload` does not fit the first frame of a report
    fn spills(&self, payload: i32) -> bool {
        (self.hops > 1 && payload > MULTI_HOP_SPILL_BYTES) || payload > SINGLE_HOP_SPILL_BYTES
    }
}

impl RadioModel for SixTischLeaf {
    fn idle_power(&self) -> f32 {
        self.idle_power
    }

    fn peak_demand(&self, store: &EnergyStore, scenario: &Scenario) -> PeakDemand {
        let overhead = if self.hops == 1 {
            SINGLE_HOP_OVERHEAD_BYTES
        } else {
            MULTI_HOP_OVERHEAD_BYTES
        };
        let e_data = scenario.sense_energy
            + self.timeslot_overhead_energy
            + self.tx_power * (scenario.payload + overhead) as f32;
        // The DAO term scales with TX power squared rather than with a
        // time-on-air product; kept as characterized pending review of the
        // measurement model.
        let e_dao = self.timeslot_overhead_energy + self.tx_power * self.tx_power;

        let energy = (self.peak_overhead_energy + e_data.max(e_dao)) * store.load_efficiency();
        // Sensing only stretches the peak when the data path dominates;
        // a DAO-dominated peak carries no fresh reading.
        let duration = PEAK_SEQUENCE_SLOTS * self.timeslot
            + if e_data > e_dao { scenario.sense_time } else { 0.0 };
        PeakDemand { energy, duration }
    }

    fn latency(
        &self,
        store: &EnergyStore,
        scenario: &Scenario,
        harvested_power: f32,
    ) -> Feasibility {
        let demand = self.peak_demand(store, scenario);
        let capacitance = store.min_capacitance(&demand);
        let t_charge = match store.charge_time(capacitance, harvested_power, self.idle_power) {
            Feasibility::Feasible(t) => t,
            Feasibility::Infeasible => return Feasibility::Infeasible,
        };

        // One recharge-plus-burst cycle, rounded up to whole timeslots.
        let peak_slots = libm::ceilf(demand.duration / self.timeslot);
        let charge_slots = libm::ceilf(t_charge / self.timeslot);
        let t_rbus = (peak_slots + charge_slots) * self.timeslot;

        let mut t_lat = t_rbus + self.timeslot + (self.hops - 1) as f32 * t_rbus;

        let payload = scenario.payload as i32;
        if self.spills(payload) {
            t_lat += t_rbus * self.hops as f32;
            let carried = if self.hops > 1 {
                MULTI_HOP_CARRIED_BYTES
            } else {
                SINGLE_HOP_CARRIED_BYTES
            };
            if self.spills(payload - carried) {
                t_lat += t_rbus * self.hops as f32;
            }
            // TODO: confirm whether payloads spilling past two extra frames
            // need a third recharge cycle; the model caps at two.
        }
        Feasibility::Feasible(t_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio() -> SixTischLeaf {
        SixTischLeaf::cc1200()
    }

    fn store() -> EnergyStore {
        EnergyStore::supercap()
    }

    #[test]
    fn data_path_dominates_with_sensing() {
        let scenario = Scenario::new(20, 0.05, 0.01);
        let demand = radio().peak_demand(&store(), &scenario);
        // Five 15 ms slots plus the sensing time.
        assert!((demand.duration - (5.0 * 0.015 + 0.01)).abs() < 1e-6);
        assert!(demand.energy > 0.0 && demand.energy.is_finite());
    }

    #[test]
    fn dao_path_dominates_without_sensing() {
        // No sensing energy and no payload: the DAO path wins and the
        // duration excludes the sensing time.
        let scenario = Scenario::new(0, 0.0, 0.01);
        let demand = radio().peak_demand(&store(), &scenario);
        assert!((demand.duration - 5.0 * 0.015).abs() < 1e-6);
    }

    #[test]
    fn latency_infeasible_exactly_when_charge_time_is() {
        let scenario = Scenario::new(20, 0.05, 0.01);
        let r = radio();
        let s = store();
        for ph_uw in [1u32, 10, 100, 1_000, 2_000, 10_000, 100_000] {
            let p = ph_uw as f32 / 1e6;
            let demand = r.peak_demand(&s, &scenario);
            let charge = s.charge_time(s.min_capacitance(&demand), p, 0.001076);
            let lat = r.latency(&s, &scenario, p);
            assert_eq!(lat.is_feasible(), charge.is_feasible(), "at {} uW", ph_uw);
        }
    }

    #[test]
    fn latency_counts_whole_cycles() {
        let scenario = Scenario::new(20, 0.05, 0.01);
        let r = radio();
        let s = store();
        let p = 0.01; // 10 mW, comfortably feasible
        let lat = r.latency(&s, &scenario, p).value().unwrap();
        // Latency is a whole number of timeslots: one cycle plus the
        // delivery slot for a single hop.
        let slots = lat / 0.015;
        assert!((slots - libm::roundf(slots)).abs() < 1e-3);
        assert!(lat > 0.0);
    }

    #[test]
    fn oversize_payload_adds_recharge_cycles() {
        let r = radio();
        let s = store();
        let p = 0.01;
        let small = r.latency(&s, &Scenario::new(20, 0.05, 0.01), p).value().unwrap();
        let spilled = r.latency(&s, &Scenario::new(100, 0.05, 0.01), p).value().unwrap();
        let double = r.latency(&s, &Scenario::new(180, 0.05, 0.01), p).value().unwrap();
        // 100 B exceeds the 89 B single-hop capacity once; 180 B exceeds
        // it again after the first frame's 81 B are carried.
        assert!(spilled > small);
        assert!(double > spilled);
    }

    #[test]
    fn presets_share_minimal_schedule_config() {
        for r in [SixTischLeaf::cc1200(), SixTischLeaf::cc2538()] {
            assert_eq!(r.hops(), 1);
            assert_eq!(r.neighbours(), 1);
            assert_eq!(r.control_payloads(), (96, 16));
        }
        assert_eq!(radio().with_hops(3).unwrap().hops(), 3);
    }

    #[test]
    fn multi_hop_spills_earlier() {
        let s = store();
        let p = 0.01;
        let single = radio();
        let multi = radio().with_hops(2).unwrap();
        // 85 B fits a single-hop frame (<= 89) but spills a multi-hop
        // frame (> 81).
        let scenario = Scenario::new(85, 0.05, 0.01);
        assert!(!single.spills(85));
        assert!(multi.spills(85));
        assert!(single.latency(&s, &scenario, p).is_feasible());
        assert!(multi.latency(&s, &scenario, p).is_feasible());
    }

    #[test]
    fn rejects_degenerate_config() {
        assert!(SixTischLeaf::new(1, 1, 0.0, 96, 16, 1.8e-6, 6.8e-4, 1.9e-3, 1.1e-3).is_err());
        assert!(SixTischLeaf::new(1, 0, 0.015, 96, 16, 1.8e-6, 6.8e-4, 1.9e-3, 1.1e-3).is_err());
    }
}
