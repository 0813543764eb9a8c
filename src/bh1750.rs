//! BH1750 ambient light sensor driver.
//!
//! Minimal driver for the single mode this firmware uses: start continuous
//! high-resolution measurements once at boot, then read the latest 2-byte
//! result each loop iteration. Generic over `embedded_hal_async::i2c::I2c`
//! so the concrete bus stays out of the driver.

use embassy_time::Timer;
use embedded_hal_async::i2c::I2c;
use luxmeter_servo::config::{BH1750_ADDRESS, BH1750_CONTINUOUS_HIGH_RES_2, BH1750_MEASUREMENT_DELAY_MS};
use luxmeter_servo::lux::lux_from_bytes;

pub struct Bh1750<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Bh1750<I2C> {
    pub fn new(i2c: I2C) -> Self { Self { i2c } }

    /// Start continuous high-resolution measurements and wait out the first
    /// measurement cycle so the next read returns real data.
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        self.i2c
            .write(BH1750_ADDRESS, &[BH1750_CONTINUOUS_HIGH_RES_2])
            .await?;
        Timer::after_millis(BH1750_MEASUREMENT_DELAY_MS).await;
        Ok(())
    }

    /// Read the latest measurement and return it in lux.
    ///
    /// The bus either fills the 2-byte register pair or errors; a failed
    /// transfer leaves the caller's value untouched.
    pub async fn read(&mut self) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c.read(BH1750_ADDRESS, &mut buf).await?;
        Ok(lux_from_bytes(buf))
    }
}
