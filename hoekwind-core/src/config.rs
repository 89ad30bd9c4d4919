use serde::Deserialize;

use crate::observation::SpeedUnit;

/// Columns on the reference hardware. History length follows this value.
pub const MATRIX_COLUMNS: usize = 44;
pub const MATRIX_ROWS: usize = 11;
pub const MATRIX_PIXELS: usize = MATRIX_COLUMNS * MATRIX_ROWS;

/// Which color table turns knots into a color.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorProfile {
    /// one color per knot from 0 to 50
    #[default]
    Fine,
    /// 5 knot steps up to 40 and one color for anything faster
    Coarse,
}

/// Which speed picks the color of the main glyph. Trail pixels always use their own sample.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorSource {
    /// the rolling average over the history
    #[default]
    Average,
    /// the speed that was just observed
    Instantaneous,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GlyphFont {
    Font4x6,
    #[default]
    Font5x7,
    Font5x8,
    Font6x10,
}

/// Electrical settings for the led strip. Drivers use what they can and ignore the rest.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LedStripConfig {
    pub pixel_count: usize,
    /// GPIO pin connected to the pixels. 18 uses PWM
    pub pin: u8,
    /// LED signal frequency in hertz (usually 800khz)
    pub frequency_hz: u32,
    pub dma_channel: u8,
    /// 0 for darkest and 255 for brightest
    pub brightness: u8,
    /// true to invert the signal (when using NPN transistor level shift)
    pub invert: bool,
    /// set to 1 for GPIOs 13, 19, 41, 45 or 53
    pub channel: u8,
}

impl Default for LedStripConfig {
    fn default() -> Self {
        Self {
            pixel_count: MATRIX_PIXELS,
            pin: 18,
            frequency_hz: 800_000,
            dma_channel: 10,
            brightness: 32,
            invert: false,
            channel: 0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,
    pub strip: LedStripConfig,
    pub color_profile: ColorProfile,
    pub color_source: ColorSource,
    pub font: GlyphFont,
    /// row that shows the history trail. defaults to the bottom row
    pub trail_row: usize,
    /// unit the weather station reports wind speed in
    pub source_unit: SpeedUnit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: MATRIX_ROWS,
            columns: MATRIX_COLUMNS,
            strip: LedStripConfig::default(),
            color_profile: ColorProfile::default(),
            color_source: ColorSource::default(),
            font: GlyphFont::default(),
            trail_row: MATRIX_ROWS - 1,
            source_unit: SpeedUnit::Knots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_hardware() {
        let config = Config::default();

        assert_eq!(config.rows * config.columns, config.strip.pixel_count);
        assert_eq!(config.strip.pixel_count, 484);
        assert_eq!(config.trail_row, 10);
        assert_eq!(config.strip.pin, 18);
        assert_eq!(config.strip.frequency_hz, 800_000);
        assert_eq!(config.strip.brightness, 32);
        assert!(!config.strip.invert);
        assert_eq!(config.color_profile, ColorProfile::Fine);
        assert_eq!(config.color_source, ColorSource::Average);
    }
}
