//! Servo target selection and ramp planning.
//!
//! A lux reading selects one of four discrete compare levels via a strict
//! descending threshold ladder, and the ramp iterator walks the PWM compare
//! level linearly from the baseline up to that target. The ramp always starts
//! from the baseline - the driver keeps no last-position state, so a lower
//! target after a higher one produces the characteristic hold-then-reset
//! motion rather than a smooth downward sweep.

use crate::config::{SERVO_LEVEL_HIGH, SERVO_LEVEL_LOW, SERVO_LEVEL_MAX, SERVO_LEVEL_MID, SERVO_RAMP_STEP};

/// Select the target compare level for a lux reading.
///
/// Strict `>` comparisons: a reading exactly on a threshold maps to the next
/// lower bucket.
#[inline]
pub const fn target_level(lux: u16) -> u16 {
    if lux > SERVO_LEVEL_MAX {
        SERVO_LEVEL_MAX
    } else if lux > SERVO_LEVEL_HIGH {
        SERVO_LEVEL_HIGH
    } else if lux > SERVO_LEVEL_MID {
        SERVO_LEVEL_MID
    } else {
        SERVO_LEVEL_LOW
    }
}

/// Compare levels for a ramp from the baseline to `target`, inclusive,
/// in [`SERVO_RAMP_STEP`] increments. Yields (target - baseline) / step + 1
/// levels; a baseline target yields the single baseline level.
pub fn levels(target: u16) -> impl Iterator<Item = u16> {
    (SERVO_LEVEL_LOW..=target).step_by(SERVO_RAMP_STEP as usize)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_level_buckets() {
        assert_eq!(target_level(0), 500);
        assert_eq!(target_level(300), 500);
        assert_eq!(target_level(561), 560);
        assert_eq!(target_level(600), 560);
        assert_eq!(target_level(621), 620);
        assert_eq!(target_level(700), 620);
        assert_eq!(target_level(721), 720);
        assert_eq!(target_level(u16::MAX), 720);
    }

    #[test]
    fn test_threshold_values_map_to_lower_bucket() {
        // Strict greater-than: exact threshold values fall through
        assert_eq!(target_level(560), 500, "560 lux should stay in the low bucket");
        assert_eq!(target_level(620), 560, "620 lux should stay in the mid bucket");
        assert_eq!(target_level(720), 620, "720 lux should stay in the high bucket");
    }

    #[test]
    fn test_end_to_end_reference_readings() {
        use crate::lux::lux_from_bytes;

        // Raw 0x01F4 (500) -> 416 lux -> baseline bucket
        assert_eq!(target_level(lux_from_bytes([0x01, 0xF4])), 500);
        // Raw 0x0384 (900) -> 750 lux -> top bucket
        assert_eq!(target_level(lux_from_bytes([0x03, 0x84])), 720);
    }

    #[test]
    fn test_ramp_sequence_bounds_and_step() {
        let seq: Vec<u16> = levels(720).collect();
        assert_eq!(seq.first(), Some(&500));
        assert_eq!(seq.last(), Some(&720));
        for pair in seq.windows(2) {
            assert_eq!(pair[1] - pair[0], SERVO_RAMP_STEP);
        }
    }

    #[test]
    fn test_ramp_step_counts() {
        // (target - 500) / 10 + 1 steps for each bucket
        assert_eq!(levels(500).count(), 1);
        assert_eq!(levels(560).count(), 7);
        assert_eq!(levels(620).count(), 13);
        assert_eq!(levels(720).count(), 23);
    }

    #[test]
    fn test_every_bucket_is_a_valid_ramp_target() {
        for lux in [0u16, 560, 561, 620, 621, 720, 721, u16::MAX] {
            let target = target_level(lux);
            let seq: Vec<u16> = levels(target).collect();
            assert_eq!(seq.last(), Some(&target), "ramp for {} lux must end at its target", lux);
        }
    }
}
