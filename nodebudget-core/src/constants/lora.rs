//! LoRaWAN PHY Frame Constants
//!
//! Parameters of the LoRa symbol-count formula. The time-on-air of one
//! uplink is `n_symbols * 2^SF / bandwidth`, where the symbol count follows
//! the payload-symbol equation of the transceiver datasheet.

// ===== PREAMBLE AND HEADER =====

/// Fixed symbol contribution of the preamble beyond the programmed length.
///
/// A LoRa preamble of `n` programmed symbols occupies `n + 4.25` symbol
/// times on air: 2 sync-word symbols plus 2.25 chirps of start-of-frame
/// delimiter.
///
/// Source: Semtech SX1276 datasheet, section 4.1.1.6
pub const PREAMBLE_SYNC_SYMBOLS: f32 = 4.25;

/// Symbol count of the PHY header block preceding the payload symbols.
///
/// The payload-symbol equation adds a fixed block of 8 symbols that carries
/// the start of the (optionally coded) physical header.
///
/// Source: Semtech SX1276 datasheet, payload symbol equation
pub const PHY_HEADER_SYMBOLS: f32 = 8.0;

// ===== PAYLOAD SYMBOL EQUATION =====

/// Fixed bit overhead inside the payload symbol count.
///
/// 28 header/sync bits plus 16 CRC bits (CRC enabled for uplinks), as they
/// appear in the numerator of the payload symbol equation.
///
/// Source: Semtech SX1276 datasheet, payload symbol equation
pub const FRAME_OVERHEAD_BITS: f32 = 44.0;

/// Bits saved when the explicit PHY header is omitted.
///
/// Implicit-header mode drops 20 bits from the numerator of the payload
/// symbol equation.
///
/// Source: Semtech SX1276 datasheet, payload symbol equation
pub const IMPLICIT_HEADER_SAVED_BITS: f32 = 20.0;

/// Bits carried per symbol block divisor: `4 * (SF - 2 * DE)`.
///
/// Multiplier on the spreading factor in the payload symbol equation
/// denominator. Kept here for documentation; the models inline the
/// expression because SF and DE are per-device.
pub const SYMBOL_BITS_FACTOR: f32 = 4.0;

/// Coding-rate divisor offset: a coded block spans `CR + 4` symbols.
///
/// LoRa forward error correction expands every 4 data symbols to `4 + CR`
/// on-air symbols for coding rate `4/(4+CR)`, `CR` in 1..=4.
pub const CODING_RATE_BASE: f32 = 4.0;
