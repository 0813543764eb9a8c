//! BH1750 lux meter firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Reads ambient light over I2C once per second, shows the value on an
//! ST7789 panel, and sweeps a servo to a position selected by lux-level
//! thresholds.
//!
//! # Wiring
//!
//! - BH1750: SDA=GPIO0, SCL=GPIO1 (I2C0, 400 kHz), address 0x23
//! - ST7789: CLK=GPIO18, MOSI=GPIO19 (SPI0 TX-only), DC=GPIO4, RST=GPIO20,
//!   chip-select strapped low on the board
//! - Servo: GPIO2 (PWM slice 1, channel A)

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod bh1750;
mod screen;
mod servo;
mod st7789;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::Spi;
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use luxmeter_servo::config::{BOOT_SETTLE_MS, I2C_FREQUENCY_HZ, SENSOR_POLL_INTERVAL_MS};
use {defmt_rtt as _, panic_probe as _};

use crate::bh1750::Bh1750;
use crate::servo::Servo;
use crate::st7789::{St7789Flusher, St7789Renderer, display_spi_config};

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"luxmeter"),
    embassy_rp::binary_info::rp_program_description!(c"BH1750 lux meter with ST7789 display and servo indicator"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lux meter starting...");

    let p = embassy_rp::init(Default::default());

    // Display pins: DC=GPIO4, RST=GPIO20; panel CS is strapped low
    let dc = Output::new(p.PIN_4, Level::Low);
    let rst = Output::new(p.PIN_20, Level::High);

    // Async SPI with DMA (TX-only, the display has no MISO)
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());

    let mut flusher = St7789Flusher::new(spi, dc, rst);
    flusher.init().await;

    // Blank the panel, then let the board settle before touching the sensor
    {
        // SAFETY: renders and flushes never overlap in this single-task loop
        let mut display = St7789Renderer::new(unsafe { st7789::framebuffer_mut() });
        display.clear(Rgb565::BLACK).ok();
    }
    flusher.flush_buffer(unsafe { st7789::framebuffer() }).await;
    Timer::after_millis(BOOT_SETTLE_MS).await;

    info!("Display initialized");

    // I2C0 for the sensor: SDA=GPIO0, SCL=GPIO1, fast mode
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_1, p.PIN_0, Irqs, i2c_config);

    let mut sensor = Bh1750::new(i2c);
    if let Err(e) = sensor.init().await {
        // Init failure is not fatal; reads below will keep reporting errors
        error!("BH1750 init failed: {}", e);
    }

    // Servo on GPIO2 (PWM slice 1, channel A)
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, PwmConfig::default());
    let mut servo = Servo::new(pwm);

    info!("Main loop starting");

    loop {
        let mut lux: u16 = 0;

        match sensor.read().await {
            Ok(value) => {
                lux = value;
                info!("Luminosity: {} lx", lux);

                {
                    // SAFETY: renders and flushes never overlap in this single-task loop
                    let mut display = St7789Renderer::new(unsafe { st7789::framebuffer_mut() });
                    screen::draw_reading(&mut display, lux);
                }
                flusher.flush_buffer(unsafe { st7789::framebuffer() }).await;
            }
            Err(e) => {
                // Keep the previous frame on screen; retry next iteration
                error!("BH1750 read failed: {}", e);
            }
        }

        // A failed read leaves lux at zero, parking the servo in the lowest bucket
        servo.move_to(lux).await;

        Timer::after_millis(SENSOR_POLL_INTERVAL_MS).await;
    }
}
