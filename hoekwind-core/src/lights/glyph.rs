//! Draw the wind speed and direction as text.
use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X10},
    },
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use smart_leds::RGB8;

use super::Bitmap;
use crate::compass::Cardinal;
use crate::config::GlyphFont;
use crate::errors::{HoekError, HoekResult};
use crate::logging::{trace, warn};

/// "65535kt NNW" is the longest possible label
pub type GlyphText = heapless::String<16>;

impl GlyphFont {
    pub fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            GlyphFont::Font4x6 => &FONT_4X6,
            GlyphFont::Font5x7 => &FONT_5X7,
            GlyphFont::Font5x8 => &FONT_5X8,
            GlyphFont::Font6x10 => &FONT_6X10,
        }
    }
}

pub struct GlyphRenderer {
    font: &'static MonoFont<'static>,
}

impl GlyphRenderer {
    /// The text is drawn from the top row down and must end above `trail_row`.
    pub fn new(font: GlyphFont, trail_row: usize) -> HoekResult<Self> {
        let font = font.mono_font();

        let font_height = font.character_size.height;
        let available = trail_row as u32;

        if font_height > available {
            return Err(HoekError::FontTooTall {
                font_height,
                available,
            });
        }

        Ok(Self { font })
    }

    /// "15kt E", or just "15kt" when the direction is unknown
    pub fn text(speed_knots: u16, cardinal: Option<Cardinal>) -> GlyphText {
        let mut text = GlyphText::new();

        // the buffer is sized for the longest label so these writes can't fail
        let _ = write!(text, "{}kt", speed_knots);

        if let Some(cardinal) = cardinal {
            let _ = write!(text, " {}", cardinal.label());
        }

        text
    }

    /// The longest label that fits in `max_width` pixels. "100kt NNE" becomes "100 NNE" and then "100NNE" so the
    /// cardinal is never cut off.
    pub fn fit_text(&self, speed_knots: u16, cardinal: Option<Cardinal>, max_width: u32) -> GlyphText {
        let full = Self::text(speed_knots, cardinal);

        if self.text_width(&full) <= max_width {
            return full;
        }

        let mut short = GlyphText::new();

        let _ = write!(short, "{}", speed_knots);

        if let Some(cardinal) = cardinal {
            let _ = write!(short, " {}", cardinal.label());

            if self.text_width(&short) > max_width {
                short.clear();
                let _ = write!(short, "{}{}", speed_knots, cardinal.label());
            }
        }

        trace!("{} is too wide. using {}", full.as_str(), short.as_str());

        short
    }

    /// width in pixels of `text` in this font
    pub fn text_width(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;

        if chars == 0 {
            return 0;
        }

        chars * self.font.character_size.width + (chars - 1) * self.font.character_spacing
    }

    pub fn draw<const X: usize, const Y: usize>(
        &self,
        bitmap: &mut Bitmap<X, Y>,
        text: &str,
        color: RGB8,
    ) {
        let width = self.text_width(text);

        if width > X as u32 {
            warn!("{} is {}px wide. clipping to {}px", text, width, X);
        }

        let style = MonoTextStyle::new(self.font, Rgb888::new(color.r, color.g, color.b));

        // the bitmap can't fail to draw. anything off the edge is clipped
        let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(bitmap);
    }
}
