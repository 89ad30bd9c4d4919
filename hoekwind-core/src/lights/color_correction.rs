use crate::logging::debug;
use palette::{Clamp, Hsluv, IsWithinBounds, Srgb, convert::IntoColorUnclamped};
use smart_leds::RGB8;

/// HSLuv keeps the perceived brightness steady while the hue moves, which a plain HSV sweep does not
pub fn convert_color(color: Hsluv) -> RGB8 {
    let rgb: Srgb<f32> = color.into_color_unclamped();

    if !rgb.is_within_bounds() {
        debug!("rgb is out of bounds! clamping");
    }

    let rgb: Srgb<u8> = rgb.clamp().into_format();

    let (r, g, b) = rgb.into_components();

    RGB8::new(r, g, b)
}
