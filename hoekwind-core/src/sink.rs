//! Where finished frames go.
//!
//! Real strips are driven through anything that implements [`SmartLedsWrite`]. [`MemorySink`] keeps frames in
//! memory for tests and dry runs.
use smart_leds::{RGB8, SmartLedsWrite, brightness, colors::BLACK, gamma};
use thiserror::Error;

use crate::config::LedStripConfig;
use crate::errors::{HoekError, HoekResult};
use crate::logging::{debug, error, warn};

/// Every variant is recoverable. The next frame can be tried as soon as the next observation arrives.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    #[error("pixel {index} is past the end of a {pixel_count} pixel strip")]
    IndexOutOfRange { index: usize, pixel_count: usize },
    #[error("led device is unavailable")]
    Unavailable,
    #[error("writing to the led strip failed")]
    Write,
}

/// An addressable led strip. Colors are buffered by `set_pixel_color` and latched by `show`.
pub trait LedSink {
    fn pixel_count(&self) -> usize;

    fn set_pixel_color(&mut self, n: usize, color: RGB8) -> Result<(), SinkError>;

    fn show(&mut self) -> Result<(), SinkError>;

    /// set every pixel in strip order and then show them
    fn write_frame(&mut self, frame: &[RGB8]) -> Result<(), SinkError> {
        for (n, color) in frame.iter().enumerate() {
            self.set_pixel_color(n, *color)?;
        }

        self.show()
    }

    fn clear(&mut self) -> Result<(), SinkError> {
        for n in 0..self.pixel_count() {
            self.set_pixel_color(n, BLACK)?;
        }

        self.show()
    }
}

fn check_index(n: usize, pixel_count: usize) -> Result<(), SinkError> {
    if n >= pixel_count {
        return Err(SinkError::IndexOutOfRange {
            index: n,
            pixel_count,
        });
    }

    Ok(())
}

/// Buffer a frame and hand it to a smart-leds driver on `show`. Gamma correction and the configured brightness
/// are applied on the way out.
pub struct SmartLedsSink<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
}

impl<W, const N: usize> SmartLedsSink<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(writer: W, strip: &LedStripConfig) -> HoekResult<Self> {
        if strip.pixel_count != N {
            return Err(HoekError::PixelCountMismatch {
                expected: N,
                actual: strip.pixel_count,
            });
        }

        if strip.invert {
            // inversion happens in the level shifter wiring. smart-leds drivers always send the normal signal
            warn!("invert is set but this driver can not invert the signal");
        }

        debug!(
            "strip: {} pixels on pin {} channel {} at {}hz. brightness {}",
            N, strip.pin, strip.channel, strip.frequency_hz, strip.brightness
        );

        Ok(Self {
            writer,
            pixels: [BLACK; N],
            brightness: strip.brightness,
        })
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> LedSink for SmartLedsSink<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn pixel_count(&self) -> usize {
        N
    }

    fn set_pixel_color(&mut self, n: usize, color: RGB8) -> Result<(), SinkError> {
        check_index(n, N)?;

        self.pixels[n] = color;

        Ok(())
    }

    fn show(&mut self) -> Result<(), SinkError> {
        self.writer
            .write(brightness(gamma(self.pixels.iter().copied()), self.brightness))
            .map_err(|_| {
                error!("led strip write failed");
                SinkError::Write
            })
    }
}

/// Keeps the last shown frame in memory.
pub struct MemorySink<const N: usize> {
    pending: [RGB8; N],
    shown: [RGB8; N],
    shows: usize,
    fail_next_show: Option<SinkError>,
}

impl<const N: usize> Default for MemorySink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemorySink<N> {
    pub fn new() -> Self {
        Self {
            pending: [BLACK; N],
            shown: [BLACK; N],
            shows: 0,
            fail_next_show: None,
        }
    }

    /// the frame from the last successful `show`
    pub fn shown(&self) -> &[RGB8; N] {
        &self.shown
    }

    /// how many times `show` succeeded
    pub fn shows(&self) -> usize {
        self.shows
    }

    /// make the next `show` return `err`. used to act out a device going away
    pub fn fail_next_show(&mut self, err: SinkError) {
        self.fail_next_show = Some(err);
    }
}

impl<const N: usize> LedSink for MemorySink<N> {
    fn pixel_count(&self) -> usize {
        N
    }

    fn set_pixel_color(&mut self, n: usize, color: RGB8) -> Result<(), SinkError> {
        check_index(n, N)?;

        self.pending[n] = color;

        Ok(())
    }

    fn show(&mut self) -> Result<(), SinkError> {
        if let Some(err) = self.fail_next_show.take() {
            return Err(err);
        }

        self.shown = self.pending;
        self.shows += 1;

        Ok(())
    }
}
