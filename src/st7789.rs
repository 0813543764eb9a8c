//! Async ST7789 display driver for embassy-rp.
//!
//! Drives a bare 240x320 portrait panel wired without a chip-select (CS is
//! strapped low on the board) but with a hardware reset line. Rendering goes
//! through a single static RGB565 framebuffer; flushing pushes the whole
//! buffer to the panel in one async DMA transfer.
//!
//! The driver is split into two components:
//! - [`St7789Renderer`]: Implements `DrawTarget`, writes to the framebuffer
//! - [`St7789Flusher`]: Owns the SPI peripheral and control pins, handles
//!   init and DMA transfers

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Config as SpiConfig, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use luxmeter_servo::config::{DISPLAY_HEIGHT, DISPLAY_SPI_FREQUENCY_HZ, DISPLAY_WIDTH};

const WIDTH: usize = DISPLAY_WIDTH;
const HEIGHT: usize = DISPLAY_HEIGHT;
const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

/// Static framebuffer (153,600 bytes for 240x320 RGB565).
static mut FRAMEBUFFER: [u8; BUFFER_SIZE] = [0u8; BUFFER_SIZE];

/// Get a mutable reference to the framebuffer for rendering.
///
/// # Safety
/// Caller must ensure no other reference to the framebuffer is live. The
/// single-task control loop renders and flushes strictly in sequence.
pub unsafe fn framebuffer_mut() -> &'static mut [u8] {
    unsafe { &mut *core::ptr::addr_of_mut!(FRAMEBUFFER) }
}

/// Get an immutable reference to the framebuffer for flushing.
///
/// # Safety
/// Caller must ensure the buffer is not being written to.
pub unsafe fn framebuffer() -> &'static [u8] { unsafe { &*core::ptr::addr_of!(FRAMEBUFFER) } }

// ST7789 Commands
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

/// SPI configuration for the ST7789 display.
/// The ST7789 supports up to 62.5MHz SPI clock.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = DISPLAY_SPI_FREQUENCY_HZ;
    config
}

/// ST7789 flusher - owns SPI, DC and reset pins, handles async DMA transfers.
pub struct St7789Flusher<'d> {
    spi: Spi<'d, SPI0, Async>,
    dc: Output<'d>,
    rst: Output<'d>,
}

impl<'d> St7789Flusher<'d> {
    /// Create a new flusher from SPI and control pins.
    pub fn new(
        spi: Spi<'d, SPI0, Async>,
        dc: Output<'d>,
        rst: Output<'d>,
    ) -> Self {
        Self { spi, dc, rst }
    }

    /// Initialize the display hardware.
    pub async fn init(&mut self) {
        // Hardware reset pulse on the dedicated reset line
        self.rst.set_high();
        Timer::after_millis(10).await;
        self.rst.set_low();
        Timer::after_millis(10).await;
        self.rst.set_high();
        Timer::after_millis(150).await;

        // Exit sleep mode
        self.write_command(SLPOUT).await;
        Timer::after_millis(10).await;

        // Set pixel format to RGB565 (16-bit)
        self.write_command(COLMOD).await;
        self.write_data(&[0x55]).await;

        // Default memory access order: portrait, no mirroring
        self.write_command(MADCTL).await;
        self.write_data(&[0x00]).await;

        // Inversion on (required for this panel)
        self.write_command(INVON).await;
        Timer::after_millis(10).await;

        // Normal display mode
        self.write_command(NORON).await;
        Timer::after_millis(10).await;

        // Display on
        self.write_command(DISPON).await;
        Timer::after_millis(10).await;

        // Pre-set window to full screen; flushes only send RAMWR afterwards
        self.set_window(0, 0, WIDTH as u16, HEIGHT as u16).await;
    }

    /// Send a command byte (DC low during transfer).
    async fn write_command(
        &mut self,
        cmd: u8,
    ) {
        self.dc.set_low();
        self.spi.write(&[cmd]).await.ok();
    }

    /// Send data bytes (DC high during transfer).
    async fn write_data(
        &mut self,
        data: &[u8],
    ) {
        self.dc.set_high();
        self.spi.write(data).await.ok();
    }

    /// Set the drawing window.
    async fn set_window(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) {
        let x1 = x + w - 1;
        let y1 = y + h - 1;

        self.write_command(CASET).await;
        self.write_data(&[(x >> 8) as u8, x as u8, (x1 >> 8) as u8, x1 as u8])
            .await;

        self.write_command(RASET).await;
        self.write_data(&[(y >> 8) as u8, y as u8, (y1 >> 8) as u8, y1 as u8])
            .await;
    }

    /// Flush a buffer to the display via async DMA transfer.
    pub async fn flush_buffer(
        &mut self,
        buffer: &[u8],
    ) {
        self.dc.set_low();
        // Blocking write for the single-byte command (faster than DMA setup)
        self.spi.blocking_write(&[RAMWR]).ok();
        self.dc.set_high();
        // Async DMA transfer for the large framebuffer
        self.spi.write(buffer).await.ok();
    }
}

/// ST7789 renderer - implements DrawTarget, writes to the framebuffer.
///
/// Does not own any hardware; create one wherever drawing happens and let it
/// go out of scope before flushing.
pub struct St7789Renderer<'a> {
    framebuffer: &'a mut [u8],
}

impl<'a> St7789Renderer<'a> {
    /// Create a new renderer targeting the given framebuffer.
    pub fn new(framebuffer: &'a mut [u8]) -> Self { Self { framebuffer } }

    /// Clear the framebuffer with a color.
    ///
    /// Uses 32-bit word writes (two pixels at a time); the buffer size is
    /// divisible by 4.
    fn clear_buffer(
        &mut self,
        color: Rgb565,
    ) {
        let raw: RawU16 = color.into();
        let pixel = raw.into_inner().to_be();
        let word = (pixel as u32) | ((pixel as u32) << 16);

        let ptr = self.framebuffer.as_mut_ptr() as *mut u32;
        let word_count = self.framebuffer.len() / 4;

        for i in 0..word_count {
            // SAFETY: i < len / 4, so the 4-byte write stays in bounds
            unsafe { ptr.add(i).write(word) };
        }
    }

    /// Set a pixel in the framebuffer.
    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
    ) {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = (y as usize * WIDTH + x as usize) * 2;
            let raw: RawU16 = color.into();
            let bytes = raw.into_inner().to_be_bytes();
            self.framebuffer[idx] = bytes[0];
            self.framebuffer[idx + 1] = bytes[1];
        }
    }
}

impl OriginDimensions for St7789Renderer<'_> {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl DrawTarget for St7789Renderer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &embedded_graphics::primitives::Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let mut colors = colors.into_iter();
        for y in drawable_area.rows() {
            for x in drawable_area.columns() {
                if let Some(color) = colors.next() {
                    let idx = (y as usize * WIDTH + x as usize) * 2;
                    let raw: RawU16 = color.into();
                    let bytes = raw.into_inner().to_be_bytes();
                    self.framebuffer[idx] = bytes[0];
                    self.framebuffer[idx + 1] = bytes[1];
                }
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.clear_buffer(color);
        Ok(())
    }
}
