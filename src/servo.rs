//! PWM servo driver.
//!
//! Wraps an `embassy_rp::pwm::Pwm` channel configured for a 50 Hz hobby-servo
//! frame (1.25 MHz tick, 25000-count wrap). A move enables the output, walks
//! the compare level from the baseline up to the bucket target, then forces
//! the level to zero and disables the output again - the servo is only ever
//! driven for the duration of a ramp.

use defmt::debug;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Timer;
use luxmeter_servo::config::{PWM_TICK_HZ, PWM_TOP, SERVO_RAMP_STEP_DELAY_MS};
use luxmeter_servo::ramp;

pub struct Servo<'d> {
    pwm: Pwm<'d>,
    // Stored so compare/enable updates reapply the divider instead of
    // resetting it through Config::default()
    cfg: Config,
}

impl<'d> Servo<'d> {
    /// Configure the PWM slice for servo timing. The output starts disabled.
    ///
    /// Expects a `Pwm` created with `Pwm::new_output_a` on the servo pin.
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        // Divide the system clock down to the 1.25 MHz counter tick
        let divider = (clk_sys_freq() / PWM_TICK_HZ).clamp(1, 255) as u8;

        let mut cfg = Config::default();
        cfg.top = PWM_TOP;
        cfg.divider = divider.into();
        cfg.compare_a = 0;
        cfg.enable = false;
        pwm.set_config(&cfg);

        debug!("servo pwm: clk={}Hz div={} top={}", clk_sys_freq(), divider, PWM_TOP);

        Self { pwm, cfg }
    }

    /// Move the servo to the position for a lux reading.
    ///
    /// Ramps the compare level from the baseline to the bucket target in
    /// fixed increments with a fixed delay between steps, then zeroes the
    /// level and disables the output regardless of target.
    pub async fn move_to(
        &mut self,
        lux: u16,
    ) {
        let target = ramp::target_level(lux);
        debug!("servo ramp: {} lx -> level {}", lux, target);

        self.set_enabled(true);

        for level in ramp::levels(target) {
            self.set_level(level);
            Timer::after_millis(SERVO_RAMP_STEP_DELAY_MS).await;
        }

        self.set_level(0);
        self.set_enabled(false);
    }

    fn set_level(
        &mut self,
        level: u16,
    ) {
        self.cfg.compare_a = level;
        self.pwm.set_config(&self.cfg);
    }

    fn set_enabled(
        &mut self,
        enable: bool,
    ) {
        self.cfg.enable = enable;
        self.pwm.set_config(&self.cfg);
    }
}
