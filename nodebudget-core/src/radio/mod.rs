//! Radio Energy Models
//!
//! ## Overview
//!
//! This module contains the closed-form energy and latency models for the
//! supported wireless technologies. Each model turns a device's datasheet
//! and measured constants into the two numbers the storage model needs -
//! peak energy and peak duration of one reporting burst - plus an
//! end-to-end latency figure.
//!
//! ## Supported Technologies
//!
//! ### LoRaWAN Class A ([`LoraClassA`])
//!
//! Long-range, low-rate uplinks. Payloads beyond the regional maximum are
//! fragmented; every uplink is followed by two idle receive windows. The
//! time-on-air model is the LoRa symbol-count equation.
//!
//! ### Bluetooth Mesh Low-Power Node ([`BleLpn`])
//!
//! Short-range mesh with friendship: the node transmits each PDU three
//! times, polls its friend, then listens during a receive window. Latency
//! grows linearly with the relay hop count.
//!
//! ### 6TiSCH Leaf ([`SixTischLeaf`])
//!
//! Time-slotted channel hopping under the 6TiSCH minimal schedule. A
//! harvesting leaf spends whole recharge-plus-burst cycles per frame, so
//! its latency depends on the storage model and the harvested power, not
//! just the radio.
//!
//! ## Model Shape
//!
//! All three implement [`RadioModel`](crate::traits::RadioModel) with a
//! uniform signature. Results are plain values; the models hold only
//! device constants and are freely shareable.
//!
//! ## Customization
//!
//! Each model offers named presets for the devices it was characterized
//! on, and a checked constructor for custom device parameters:
//!
//! ```rust
//! use nodebudget_core::radio::LoraClassA;
//!
//! // Same radio, different idle strategy
//! let off_idle = LoraClassA::sodaq_explorer();
//! let sleep_idle = LoraClassA::sodaq_explorer_sleep();
//! ```

mod lora;
mod ble;
mod tsch;

pub use lora::{FragmentTimes, LoraClassA};
pub use ble::BleLpn;
pub use tsch::SixTischLeaf;
