//! Bluetooth mesh low-power-node energy model
//!
//! Models one reporting cycle of a mesh LPN with an established
//! friendship: the data PDU and the friend poll are each transmitted three
//! times (once per advertising channel), then the node waits out the
//! receive delay and listens during the receive window. Latency across the
//! mesh grows linearly with the relay hop count.

use crate::{
    constants::ble::{
        EXCHANGE_OVERHEAD_S, POLL_PAYLOAD_BYTES, REDUNDANT_TRANSMISSIONS, RELAY_HOP_BASE_S,
        SEGMENT_OVERHEAD_BYTES, SINGLE_HOP_BASE_S, TURNAROUND_S,
    },
    errors::{require_non_negative, require_positive, ConfigError, ConfigResult},
    storage::EnergyStore,
    traits::{Feasibility, PeakDemand, RadioModel, Scenario},
};

/// Bluetooth mesh low-power node
///
/// Friendship timing and measured power constants of one device
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BleLpn {
    /// Receive window after the receive delay [s]
    receive_window: f32,
    /// Friend poll interval [s]
    poll_interval: f32,
    /// Receive delay between poll and friend response [s]
    receive_delay: f32,
    /// PHY datarate [b/s]
    datarate: f32,
    /// Mesh hops to the destination (>= 1)
    hops: u32,
    /// TX power draw [W]
    tx_power: f32,
    /// RX power draw during the receive window [W]
    rx_power: f32,
    /// Power draw during the receive delay [W]
    receive_delay_power: f32,
    /// Fixed energy overhead of the data transmission [J]
    data_overhead_energy: f32,
    /// Fixed energy overhead of the poll transmission [J]
    poll_overhead_energy: f32,
    /// Idle power between reports [W]
    idle_power: f32,
}

impl BleLpn {
    /// Radio model from friendship timing and power constants
    ///
    /// - `receive_window`: friend response listening window [s]
    /// - `poll_interval`: configured poll interval [s]
    /// - `receive_delay`: gap between poll and friend response [s]
    /// - `datarate`: PHY datarate [b/s] (> 0)
    /// - `hops`: mesh hops to the destination (>= 1)
    /// - `tx_power`, `rx_power`, `receive_delay_power`: state power
    ///   draws [W]
    /// - `data_overhead_energy`, `poll_overhead_energy`: fixed per-exchange
    ///   energy overheads [J]
    /// - `idle_power`: draw between reports [W]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        receive_window: f32,
        poll_interval: f32,
        receive_delay: f32,
        datarate: f32,
        hops: u32,
        tx_power: f32,
        rx_power: f32,
        receive_delay_power: f32,
        data_overhead_energy: f32,
        poll_overhead_energy: f32,
        idle_power: f32,
    ) -> ConfigResult<Self> {
        if hops == 0 {
            return Err(ConfigError::NonPositive { name: "hops", value: 0.0 });
        }
        Ok(Self {
            receive_window: require_non_negative("receive_window", receive_window)?,
            poll_interval: require_non_negative("poll_interval", poll_interval)?,
            receive_delay: require_non_negative("receive_delay", receive_delay)?,
            datarate: require_positive("datarate", datarate)?,
            hops,
            tx_power: require_non_negative("tx_power", tx_power)?,
            rx_power: require_non_negative("rx_power", rx_power)?,
            receive_delay_power: require_non_negative("receive_delay_power", receive_delay_power)?,
            data_overhead_energy: require_non_negative("data_overhead_energy", data_overhead_energy)?,
            poll_overhead_energy: require_non_negative("poll_overhead_energy", poll_overhead_energy)?,
            idle_power: require_non_negative("idle_power", idle_power)?,
        })
    }

    /// nRF52840 development kit, single hop
    ///
    /// 255 ms receive delay and window, 100 kb/s application datarate,
    /// measured power and per-exchange overhead figures.
    pub fn nrf52840_devkit() -> Self {
        // Constants validated by construction
        Self {
            receive_window: 0.255,
            poll_interval: 345_600.0,
            receive_delay: 0.255,
            datarate: 100_000.0,
            hops: 1,
            tx_power: 0.0164,
            rx_power: 0.0156,
            receive_delay_power: 0.0000161,
            data_overhead_energy: 0.0000062,
            poll_overhead_energy: 0.000282,
            idle_power: 0.000016128,
        }
    }

    /// Same device with a different hop count
    pub fn with_hops(self, hops: u32) -> ConfigResult<Self> {
        if hops == 0 {
            return Err(ConfigError::NonPositive { name: "hops", value: 0.0 });
        }
        Ok(Self { hops, ..self })
    }

    /// Mesh hops to the destination
    pub fn hops(&self) -> u32 {
        self.hops
    }

    /// Configured friend poll interval [s]
    ///
    /// Not consumed by the per-report models (one report is one poll);
    /// exposed for consumers that account duty cycles.
    pub fn poll_interval(&self) -> f32 {
        self.poll_interval
    }

    /// On-air time of one PDU carrying `payload` bytes [s]
    pub fn transmission_time(&self, payload: u32) -> f32 {
        8.0 * (payload + SEGMENT_OVERHEAD_BYTES) as f32 / self.datarate
    }
}

impl RadioModel for BleLpn {
    fn idle_power(&self) -> f32 {
        self.idle_power
    }

    fn peak_demand(&self, store: &EnergyStore, scenario: &Scenario) -> PeakDemand {
        let t_data = self.transmission_time(scenario.payload);
        let t_poll = self.transmission_time(POLL_PAYLOAD_BYTES);

        let energy = (scenario.sense_energy
            + self.data_overhead_energy
            + self.tx_power * REDUNDANT_TRANSMISSIONS * t_data
            + self.poll_overhead_energy
            + self.tx_power * REDUNDANT_TRANSMISSIONS * t_poll
            + self.receive_delay_power * self.receive_delay
            + self.rx_power * self.receive_window)
            * store.load_efficiency();

        let duration = scenario.sense_time
            + EXCHANGE_OVERHEAD_S
            + REDUNDANT_TRANSMISSIONS * t_data
            + REDUNDANT_TRANSMISSIONS * t_poll
            + self.receive_delay
            + self.receive_window;

        PeakDemand { energy, duration }
    }

    fn latency(
        &self,
        _store: &EnergyStore,
        scenario: &Scenario,
        _harvested_power: f32,
    ) -> Feasibility {
        let t_tx = self.transmission_time(scenario.payload);
        // Final hop: scan base cost, three repetitions, two turnarounds in
        // each direction of the exchange.
        let final_hop = SINGLE_HOP_BASE_S + REDUNDANT_TRANSMISSIONS * t_tx + 2.0 * TURNAROUND_S * 2.0;
        let relays = (self.hops - 1) as f32 * (RELAY_HOP_BASE_S + REDUNDANT_TRANSMISSIONS * t_tx);
        Feasibility::Feasible(final_hop + relays)
    }
}
