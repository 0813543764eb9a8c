//! Lux conversion and display formatting for BH1750 readings.
//!
//! The sensor returns a 16-bit big-endian register pair; dividing by the
//! datasheet calibration factor 1.2 yields lux. The division is done in
//! integer math (`raw * 10 / 12`), which is an exact floor of `raw / 1.2`
//! for every 16-bit input.

use core::fmt::Write;

use heapless::String;

/// Display-string capacity in characters. Matches the 8-byte `snprintf`
/// buffer of the original board code (7 characters plus terminator), so
/// oversized values truncate instead of widening the layout.
pub const LUX_TEXT_LEN: usize = 7;

/// Convert a raw BH1750 register value to lux (floor of raw / 1.2).
#[inline]
pub const fn raw_to_lux(raw: u16) -> u16 { ((raw as u32) * 10 / 12) as u16 }

/// Convert the sensor's big-endian register pair to lux.
#[inline]
pub const fn lux_from_bytes(bytes: [u8; 2]) -> u16 { raw_to_lux(u16::from_be_bytes(bytes)) }

/// Format a reading as `"<lux> LUX"`, truncated to [`LUX_TEXT_LEN`] characters.
pub fn format_lux(lux: u16) -> String<LUX_TEXT_LEN> {
    // Format into a scratch buffer wide enough for the worst case
    // ("54612 LUX", 9 chars), then copy per character: heapless write_str
    // rejects a piece that does not fit wholesale, which would drop the
    // unit suffix instead of truncating it.
    let mut scratch: String<9> = String::new();
    let _ = write!(scratch, "{} LUX", lux);

    let mut text: String<LUX_TEXT_LEN> = String::new();
    for c in scratch.chars().take(LUX_TEXT_LEN) {
        text.push(c).ok();
    }
    text
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_to_lux_reference_values() {
        // 0x01F4 = 500 raw -> 416 lux
        assert_eq!(raw_to_lux(0x01F4), 416);
        // 0x0384 = 900 raw -> 750 lux
        assert_eq!(raw_to_lux(0x0384), 750);
        assert_eq!(raw_to_lux(0), 0);
        assert_eq!(raw_to_lux(1), 0, "sub-calibration readings floor to zero");
        assert_eq!(raw_to_lux(12), 10);
        assert_eq!(raw_to_lux(u16::MAX), 54612);
    }

    #[test]
    fn test_raw_to_lux_matches_float_floor_for_all_inputs() {
        for raw in 0..=u16::MAX {
            let expected = (f64::from(raw) / 1.2).floor() as u16;
            assert_eq!(raw_to_lux(raw), expected, "mismatch at raw={}", raw);
        }
    }

    #[test]
    fn test_lux_from_bytes_is_big_endian() {
        assert_eq!(lux_from_bytes([0x01, 0xF4]), 416);
        assert_eq!(lux_from_bytes([0x03, 0x84]), 750);
        assert_eq!(lux_from_bytes([0x00, 0x00]), 0);
    }

    #[test]
    fn test_format_lux() {
        assert_eq!(format_lux(416).as_str(), "416 LUX");
        assert_eq!(format_lux(0).as_str(), "0 LUX");
    }

    #[test]
    fn test_format_lux_truncates_at_capacity() {
        // Five digits leave no room for the full suffix
        assert_eq!(format_lux(54612).as_str(), "54612 L");
        assert_eq!(format_lux(54612).len(), LUX_TEXT_LEN);
        // Four digits keep one more character of the suffix
        assert_eq!(format_lux(9999).as_str(), "9999 LU");
    }

    #[test]
    fn test_format_lux_widest_untruncated_value() {
        assert_eq!(format_lux(999).as_str(), "999 LUX");
    }
}
