//! Protocol Constants for Radio Energy Models
//!
//! This module provides centralized, well-documented constants used by the
//! radio energy models. All protocol-fixed numeric values are defined here
//! with clear explanations of their purpose and source.
//!
//! ## Organization
//!
//! Constants are grouped by radio technology:
//! - **LoRa**: LoRaWAN PHY frame structure parameters
//! - **BLE**: Bluetooth mesh low-power-node timing and framing
//! - **TSCH**: IEEE 802.15.4 TSCH slotframe parameters
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, include comprehensive documentation
//! 3. Reference the protocol specification or measurement source
//! 4. Use descriptive names that include units

/// LoRaWAN PHY frame structure parameters.
pub mod lora;

/// Bluetooth mesh low-power-node timing and framing parameters.
pub mod ble;

/// IEEE 802.15.4 TSCH slotframe parameters.
pub mod tsch;

// Re-export commonly used constants for convenience
pub use lora::{
    PREAMBLE_SYNC_SYMBOLS, PHY_HEADER_SYMBOLS,
    FRAME_OVERHEAD_BITS, IMPLICIT_HEADER_SAVED_BITS,
};

pub use ble::{
    SEGMENT_OVERHEAD_BYTES, POLL_PAYLOAD_BYTES, REDUNDANT_TRANSMISSIONS,
};

pub use tsch::{
    MAX_FRAME_BYTES, SINGLE_HOP_OVERHEAD_BYTES, MULTI_HOP_OVERHEAD_BYTES,
    PEAK_SEQUENCE_SLOTS,
};
