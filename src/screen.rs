//! Reading screen: a fixed caption plus the live lux value.
//!
//! Two lines of text with fixed positions and colors; the panel is cleared
//! to black on every redraw. Draws are infallible at this layer - the
//! renderer's error type is `Infallible`.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use luxmeter_servo::config::{CAPTION_X, CAPTION_Y, VALUE_X, VALUE_Y};
use luxmeter_servo::lux::format_lux;
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

/// Green caption text (`ProFont` 18pt).
const CAPTION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, Rgb565::GREEN);

/// Yellow value text (`ProFont` 24pt).
const VALUE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, Rgb565::YELLOW);

/// Draw the reading screen for a lux value.
pub fn draw_reading<D>(
    display: &mut D,
    lux: u16,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(Rgb565::BLACK).ok();

    Text::new("LUMINOSITY", Point::new(CAPTION_X, CAPTION_Y), CAPTION_STYLE)
        .draw(display)
        .ok();

    let value = format_lux(lux);
    Text::new(&value, Point::new(VALUE_X, VALUE_Y), VALUE_STYLE)
        .draw(display)
        .ok();
}
