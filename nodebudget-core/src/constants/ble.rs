//! Bluetooth Mesh Low-Power-Node Constants
//!
//! Framing and timing parameters of the friendship protocol between a
//! low-power node (LPN) and its friend node. Energy and latency models use
//! these together with per-device power figures.

// ===== FRAMING =====

/// Protocol bytes wrapped around every application payload [B].
///
/// Access-layer, upper/lower transport and network headers plus
/// advertising-bearer framing for one unsegmented mesh message.
///
/// Source: Bluetooth Mesh Profile 1.0.1, section 3.4
pub const SEGMENT_OVERHEAD_BYTES: u32 = 18;

/// Application payload of a friend-poll message [B].
///
/// The poll exchange that opens the receive window carries a fixed-size
/// transport PDU; its on-air cost is modeled like a 19-byte data payload.
///
/// Source: Bluetooth Mesh Profile 1.0.1, section 3.6.5.3
pub const POLL_PAYLOAD_BYTES: u32 = 19;

/// Times every advertising PDU is repeated on the three channels.
///
/// Mesh advertising bearers transmit each PDU on channels 37, 38 and 39,
/// tripling the on-air time and TX energy.
///
/// Source: Bluetooth Core 5.0, Vol 6 Part B, section 4.4.2
pub const REDUNDANT_TRANSMISSIONS: f32 = 3.0;

// ===== TIMING =====

/// Fixed protocol time in one poll-plus-data exchange [s].
///
/// Measured gap between the start of the poll and the end of the data
/// exchange that is not accounted for by on-air time, receive delay or
/// receive window on the nRF52840 reference firmware.
pub const EXCHANGE_OVERHEAD_S: f32 = 0.050039;

/// Base latency of a single-hop delivery [s].
///
/// Scanning and stack traversal cost on the final receiver, measured on
/// the nRF52840 reference firmware.
pub const SINGLE_HOP_BASE_S: f32 = 0.00294;

/// Per-relay forwarding cost excluding on-air time [s].
///
/// Measured store-and-forward turnaround of one mesh relay.
pub const RELAY_HOP_BASE_S: f32 = 0.024272;

/// Radio turnaround time between PDU repetitions [s].
///
/// Counted twice per direction of the final-hop exchange.
pub const TURNAROUND_S: f32 = 0.000029;
