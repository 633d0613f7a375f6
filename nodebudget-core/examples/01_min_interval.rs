//! Minimum Transmission Interval Example
//!
//! This example demonstrates the core budget question: how often can each
//! characterized device report, as a function of harvested power?
//!
//! ## What You'll Learn
//!
//! - Pairing a radio model with a storage/PMU model
//! - Sweeping harvested power and reading the feasibility boundary
//! - Interpreting the interval curve endpoints
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_min_interval
//! ```

use nodebudget_core::{
    sweep::min_interval_curve, BleLpn, EnergyStore, LoraClassA, RadioModel, Scenario, SixTischLeaf,
};

fn main() {
    println!("nodebudget Minimum Interval Example");
    println!("===================================\n");

    // One report: 20 bytes of application payload, 50 mJ / 10 ms sensing.
    let scenario = Scenario::new(20, 0.05, 0.01);
    let store = EnergyStore::supercap();

    let devices: [(&str, &dyn RadioModel); 5] = [
        ("LoRaWAN Class A - SODAQ ExpLoRer, off idle", &LoraClassA::sodaq_explorer()),
        ("LoRaWAN Class A - SODAQ ExpLoRer, sleep idle", &LoraClassA::sodaq_explorer_sleep()),
        ("BLE LPN - nRF52840 devkit", &BleLpn::nrf52840_devkit()),
        ("6TiSCH leaf - CC1200", &SixTischLeaf::cc1200()),
        ("6TiSCH leaf - CC2538", &SixTischLeaf::cc2538()),
    ];

    for (name, radio) in devices {
        println!("{name}");

        let demand = radio.peak_demand(&store, &scenario);
        println!("  peak demand: {} over {}", print_energy(demand.energy), print_time(demand.duration));
        println!("  buffer: {:.1} mF", store.min_capacitance(&demand) * 1000.0);

        // Sweep harvested power from 10 uW to 250 mW.
        let curve = min_interval_curve(radio, &store, &scenario, 10..250_000);
        match curve.first_feasible() {
            Some(boundary) => {
                let first = curve.points().first().unwrap();
                let last = curve.points().last().unwrap();
                println!("  viable from {}: one report per {}", print_power(boundary), print_time(first.value));
                println!("  at {}: one report per {}", print_power(last.control), print_time(last.value));
            }
            None => println!("  not viable anywhere in the sweep range"),
        }
        println!();
    }
}

/// Human-readable time, coarsening with magnitude
fn print_time(seconds: f32) -> String {
    let s = seconds as u64;
    if s >= 3600 {
        format!("{}h {}min {}s", s / 3600, (s % 3600) / 60, s % 60)
    } else if s >= 60 {
        format!("{}min {}s", s / 60, s % 60)
    } else {
        format!("{:.3}s", seconds)
    }
}

/// Harvested power in the unit the sweep steps in
fn print_power(microwatts: u32) -> String {
    if microwatts > 1000 {
        format!("{:.3}mW", microwatts as f32 / 1000.0)
    } else {
        format!("{microwatts}uW")
    }
}

fn print_energy(joules: f32) -> String {
    if joules >= 1.0 {
        format!("{joules:.2}J")
    } else {
        format!("{:.2}mJ", joules * 1000.0)
    }
}
