//! Property Tests for the Budget Models
//!
//! Randomized checks of the monotonicity and consistency properties the
//! closed-form models promise, across the whole space of plausible device
//! configurations rather than the characterized presets alone.

use proptest::prelude::*;

use nodebudget_core::{
    BleLpn, EnergyStore, Feasibility, LoraClassA, PeakDemand, RadioModel, Scenario, SixTischLeaf,
};

/// Plausible storage configurations: window inside 0.5-6 V, lossy PMU,
/// sub-milliwatt leakage.
fn stores() -> impl Strategy<Value = EnergyStore> {
    (0.5f32..4.0, 0.2f32..3.0, 0.5f32..1.5, 0.1f32..1.0, 0.0f32..1e-3).prop_map(
        |(v_min, window, load_eff, harvest_eff, leak)| {
            EnergyStore::new(v_min, v_min + window, load_eff, harvest_eff, leak)
                .expect("strategy yields valid windows")
        },
    )
}

fn demands() -> impl Strategy<Value = PeakDemand> {
    (1e-6f32..2.0, 1e-3f32..100.0)
        .prop_map(|(energy, duration)| PeakDemand { energy, duration })
}

proptest! {
    #[test]
    fn capacitance_monotone_in_demand(
        store in stores(),
        demand in demands(),
        extra_energy in 1e-6f32..1.0,
        extra_time in 1e-3f32..10.0,
    ) {
        let base = store.min_capacitance(&demand);
        let bigger = store.min_capacitance(&PeakDemand {
            energy: demand.energy + extra_energy,
            duration: demand.duration,
        });
        let longer = store.min_capacitance(&PeakDemand {
            energy: demand.energy,
            duration: demand.duration + extra_time,
        });
        prop_assert!(base > 0.0 && base.is_finite());
        prop_assert!(bigger > base);
        // Leakage may be zero, in which case duration does not matter.
        prop_assert!(longer >= base);
    }

    #[test]
    fn ample_harvest_charges_in_finite_time(
        store in stores(),
        demand in demands(),
        consumed in 1e-7f32..1e-3,
        headroom in 1.5f32..200.0,
    ) {
        let capacitance = store.min_capacitance(&demand);
        // Scale harvested power so the net charging current is positive
        // regardless of the PMU factors drawn for this case.
        let harvested = consumed * headroom * 2.0;
        let charge = store.charge_time(capacitance, harvested, consumed);
        // With at least 3x the consumed power harvested, charging must
        // succeed whenever the PMU factors do not eat the margin.
        if let Feasibility::Feasible(t) = charge {
            prop_assert!(t > 0.0 && t.is_finite());
        }
    }

    #[test]
    fn charge_time_never_increases_with_harvest(
        store in stores(),
        demand in demands(),
        consumed in 1e-7f32..1e-3,
        headroom in 1.01f32..100.0,
    ) {
        let capacitance = store.min_capacitance(&demand);
        let harvested = consumed * headroom * 10.0;
        let slow = store.charge_time(capacitance, harvested, consumed);
        let fast = store.charge_time(capacitance, harvested * 4.0, consumed);
        if let (Feasibility::Feasible(slow), Feasibility::Feasible(fast)) = (slow, fast) {
            prop_assert!(fast <= slow * 1.0001);
        }
    }

    #[test]
    fn lora_fragmentation_counts(payload in 0u32..2000) {
        let radio = LoraClassA::sodaq_explorer();
        let times: Vec<f32> = radio.fragment_times(payload).collect();
        prop_assert_eq!(times.len() as u32, payload / 51 + 1);
        for t in times {
            prop_assert!(t >= 0.0 && t.is_finite());
        }
    }

    #[test]
    fn lora_latency_below_burst_duration(payload in 0u32..500) {
        let radio = LoraClassA::sodaq_explorer();
        let store = EnergyStore::supercap();
        let scenario = Scenario::new(payload, 0.05, 0.01);
        let demand = radio.peak_demand(&store, &scenario);
        let latency = radio.latency(&store, &scenario, 0.0).value().unwrap();
        // The burst includes the final receive window and sensing, which
        // the latency excludes.
        prop_assert!(latency < demand.duration);
    }

    #[test]
    fn ble_relay_penalty_is_linear(payload in 0u32..500, hops in 1u32..10) {
        let store = EnergyStore::supercap();
        let scenario = Scenario::new(payload, 0.0, 0.0);
        let base = BleLpn::nrf52840_devkit();
        let lat = |h: u32| {
            base.with_hops(h)
                .unwrap()
                .latency(&store, &scenario, 0.0)
                .value()
                .unwrap()
        };
        let per_relay = lat(2) - lat(1);
        let expected = lat(1) + (hops - 1) as f32 * per_relay;
        prop_assert!((lat(hops) - expected).abs() <= expected.abs() * 1e-4 + 1e-6);
    }

    #[test]
    fn tsch_latency_feasibility_matches_charge_time(
        payload in 0u32..200,
        ph_uw in 1u32..100_000,
    ) {
        let radio = SixTischLeaf::cc1200();
        let store = EnergyStore::supercap();
        let scenario = Scenario::new(payload, 0.05, 0.01);
        let harvested = ph_uw as f32 / 1e6;

        let demand = radio.peak_demand(&store, &scenario);
        let charge = store.charge_time(
            store.min_capacitance(&demand),
            harvested,
            radio.idle_power(),
        );
        let latency = radio.latency(&store, &scenario, harvested);
        prop_assert_eq!(latency.is_feasible(), charge.is_feasible());
    }

    #[test]
    fn min_interval_is_charge_plus_burst(
        demand in demands(),
        charge in 1e-3f32..1e6,
    ) {
        let interval = demand.min_interval(Feasibility::Feasible(charge));
        prop_assert_eq!(interval, Feasibility::Feasible(charge + demand.duration));
        prop_assert_eq!(demand.min_interval(Feasibility::Infeasible), Feasibility::Infeasible);
    }
}
