//! Hardware configuration and calibration constants.
//!
//! All wiring is fixed at build time - the board has no runtime configuration
//! surface. Pin numbers live next to the peripheral setup in `main.rs`; the
//! constants here are the ones shared between the hardware modules and the
//! pure logic (and its host tests).
//!
//! # Compile-Time Validation
//!
//! The servo level ladder includes `const` assertions that verify ordering
//! and ramp divisibility at compile time. If the levels are configured
//! incorrectly (e.g., `MID < LOW`), compilation will fail.

// =============================================================================
// BH1750 Light Sensor (I2C0)
// =============================================================================

/// I2C bus speed for the sensor (fast mode).
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// BH1750 bus address with the ADDR pin tied to GND.
pub const BH1750_ADDRESS: u8 = 0x23;

/// Continuous high-resolution mode 2 command byte (0.5 lx resolution).
pub const BH1750_CONTINUOUS_HIGH_RES_2: u8 = 0x11;

/// Worst-case time for the first measurement cycle in high-resolution mode.
/// The datasheet lists 120 ms typical; 180 ms leaves margin.
pub const BH1750_MEASUREMENT_DELAY_MS: u64 = 180;

// =============================================================================
// ST7789 Display (SPI0, portrait)
// =============================================================================

/// Panel width in pixels (portrait orientation).
pub const DISPLAY_WIDTH: usize = 240;

/// Panel height in pixels (portrait orientation).
pub const DISPLAY_HEIGHT: usize = 320;

/// SPI clock for the display. The ST7789 supports up to 62.5 MHz.
pub const DISPLAY_SPI_FREQUENCY_HZ: u32 = 62_500_000;

/// Caption anchor point on the panel.
pub const CAPTION_X: i32 = 12;
pub const CAPTION_Y: i32 = 120;

/// Value-string anchor point on the panel.
pub const VALUE_X: i32 = 50;
pub const VALUE_Y: i32 = 175;

// =============================================================================
// Servo PWM (GPIO2, slice 1 channel A)
// =============================================================================

/// PWM counter tick rate. 1.25 MHz over a 25000-count frame gives the 50 Hz
/// period hobby servos expect.
pub const PWM_TICK_HZ: u32 = 1_250_000;

/// PWM wrap value (25000 counts per frame).
pub const PWM_TOP: u16 = 24_999;

/// Servo level ladder. The compare levels double as the lux thresholds the
/// bucketing compares against, as calibrated on the original board: readings
/// above a level's value select that level, anything at or below the lowest
/// threshold parks at the baseline.
pub const SERVO_LEVEL_LOW: u16 = 500;
pub const SERVO_LEVEL_MID: u16 = 560;
pub const SERVO_LEVEL_HIGH: u16 = 620;
pub const SERVO_LEVEL_MAX: u16 = 720;

/// Compare-level increment per ramp step.
pub const SERVO_RAMP_STEP: u16 = 10;

/// Delay between ramp steps.
pub const SERVO_RAMP_STEP_DELAY_MS: u64 = 20;

// Compile-time validation: ladder must be ascending and reachable by the ramp
const _: () = assert!(SERVO_LEVEL_LOW < SERVO_LEVEL_MID);
const _: () = assert!(SERVO_LEVEL_MID < SERVO_LEVEL_HIGH);
const _: () = assert!(SERVO_LEVEL_HIGH < SERVO_LEVEL_MAX);
const _: () = assert!((SERVO_LEVEL_MID - SERVO_LEVEL_LOW) % SERVO_RAMP_STEP == 0);
const _: () = assert!((SERVO_LEVEL_HIGH - SERVO_LEVEL_LOW) % SERVO_RAMP_STEP == 0);
const _: () = assert!((SERVO_LEVEL_MAX - SERVO_LEVEL_LOW) % SERVO_RAMP_STEP == 0);
const _: () = assert!(SERVO_LEVEL_MAX <= PWM_TOP);

// =============================================================================
// Main Loop
// =============================================================================

/// Pause between loop iterations.
pub const SENSOR_POLL_INTERVAL_MS: u64 = 1_000;

/// Settle pause between display and sensor bring-up at boot.
pub const BOOT_SETTLE_MS: u64 = 4_000;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)] // Intentional re-validation of compile-time ordering
mod tests {
    use super::*;

    #[test]
    fn test_servo_ladder_ordering() {
        assert!(SERVO_LEVEL_LOW < SERVO_LEVEL_MID);
        assert!(SERVO_LEVEL_MID < SERVO_LEVEL_HIGH);
        assert!(SERVO_LEVEL_HIGH < SERVO_LEVEL_MAX);
    }

    #[test]
    fn test_servo_levels_reachable_by_ramp() {
        for level in [SERVO_LEVEL_MID, SERVO_LEVEL_HIGH, SERVO_LEVEL_MAX] {
            assert_eq!(
                (level - SERVO_LEVEL_LOW) % SERVO_RAMP_STEP,
                0,
                "level {} must be a whole number of ramp steps above baseline",
                level
            );
        }
    }

    #[test]
    fn test_pwm_frame_is_50_hz() {
        // 1.25 MHz / 25000 counts = 50 frames per second
        assert_eq!(PWM_TICK_HZ / (PWM_TOP as u32 + 1), 50);
    }

    #[test]
    fn test_levels_fit_in_pwm_frame() {
        assert!(SERVO_LEVEL_MAX <= PWM_TOP);
    }
}
