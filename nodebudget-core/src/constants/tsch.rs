//! IEEE 802.15.4 TSCH Slotframe Constants
//!
//! Frame-capacity and scheduling parameters of a time-slotted
//! channel-hopping (TSCH) leaf node running the 6TiSCH minimal schedule.

// ===== FRAMING =====

/// Maximum PHY frame size [B].
///
/// IEEE 802.15.4 limits one frame, headers included, to 127 bytes; payload
/// beyond the per-hop overhead has to spill into additional frames, each
/// costing a further recharge cycle on a harvesting node.
///
/// Source: IEEE 802.15.4-2015, section 7.2
pub const MAX_FRAME_BYTES: i32 = 127;

/// Header overhead of a single-hop data frame [B].
///
/// MAC, 6LoWPAN and RPL headers for a frame delivered directly to the
/// border router.
pub const SINGLE_HOP_OVERHEAD_BYTES: u32 = 38;

/// Header overhead of a multi-hop data frame [B].
///
/// As single-hop plus the source-routing header carried on forwarded
/// frames.
pub const MULTI_HOP_OVERHEAD_BYTES: u32 = 48;

// ===== SCHEDULING =====

/// Timeslots occupied by one transmission peak.
///
/// One reporting burst spans the sensing slot, the TX slot, the ACK slot
/// and the guard slots around them in the minimal schedule.
pub const PEAK_SEQUENCE_SLOTS: f32 = 5.0;
