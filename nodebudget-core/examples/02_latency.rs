//! Latency Curves Example
//!
//! This example walks the two latency questions the models answer:
//!
//! - For LoRaWAN and BLE, latency is set by the radio alone: sweep it
//!   against payload size.
//! - For a 6TiSCH leaf on a harvesting budget, latency is dominated by
//!   capacitor recharge cycles: sweep it against harvested power.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_latency
//! ```

use nodebudget_core::{
    sweep::{latency_payload_curve, latency_power_curve},
    BleLpn, EnergyStore, LoraClassA, RadioModel, Scenario, SixTischLeaf,
};

fn main() {
    println!("nodebudget Latency Example");
    println!("==========================\n");

    let store = EnergyStore::supercap();
    let scenario = Scenario::new(20, 0.05, 0.01);

    // Payload-bound radios: latency vs payload size, 0..200 B.
    println!("Latency vs payload size (0..200 B):");
    let direct: [(&str, &dyn RadioModel); 3] = [
        ("LoRaWAN off idle ", &LoraClassA::sodaq_explorer()),
        ("LoRaWAN sleep idle", &LoraClassA::sodaq_explorer_sleep()),
        ("BLE LPN 1 hop     ", &BleLpn::nrf52840_devkit()),
    ];
    for (name, radio) in direct {
        let curve = latency_payload_curve(radio, &store, &scenario, 0.0, 0..200);
        let first = curve.points().first().unwrap();
        let last = curve.points().last().unwrap();
        println!(
            "  {name}  [{} B, {:.3}s] .. [{} B, {:.3}s]",
            first.control, first.value, last.control, last.value
        );
    }

    // Recharge-bound radios: latency vs harvested power, 10 uW..250 mW.
    println!("\nLatency vs harvested power (10 uW..250 mW):");
    let leaves = [
        ("6TiSCH CC1200", SixTischLeaf::cc1200()),
        ("6TiSCH CC2538", SixTischLeaf::cc2538()),
    ];
    for (name, radio) in leaves {
        let curve = latency_power_curve(&radio, &store, &scenario, 10..250_000);
        match curve.first_feasible() {
            Some(boundary) => {
                let first = curve.points().first().unwrap();
                let last = curve.points().last().unwrap();
                println!(
                    "  {name}  viable from {boundary} uW at {:.2}s, down to {:.3}s at {} uW",
                    first.value, last.value, last.control
                );
            }
            None => println!("  {name}  not viable anywhere in the sweep range"),
        }
    }

    // Multi-hop: both mesh technologies pay per relay, differently.
    println!("\nMulti-hop (20 B payload):");
    for hops in [1u32, 2, 4, 8] {
        let ble = BleLpn::nrf52840_devkit().with_hops(hops).unwrap();
        let lat = ble.latency(&store, &scenario, 0.0).value().unwrap();
        println!("  BLE {hops} hop(s): {lat:.4}s");
    }
    for hops in [1u32, 2, 4] {
        let leaf = SixTischLeaf::cc1200().with_hops(hops).unwrap();
        // 10 mW harvested: comfortably above the recharge threshold.
        match leaf.latency(&store, &scenario, 0.01).value() {
            Some(lat) => println!("  6TiSCH {hops} hop(s): {lat:.3}s"),
            None => println!("  6TiSCH {hops} hop(s): infeasible"),
        }
    }
}
