//! Turns each wind observation into a frame on the led strip.
//!
//! One observation is handled at a time: Idle -> Rendering -> Displayed -> Idle. An observation without a
//! speed, or one whose frame the sink refuses, goes Rendering -> Idle instead.
use core::marker::PhantomData;

// TODO: why does the linter think this is unused when math functions on f32 are used. something about std being enabled in the linter?
#[allow(unused_imports)]
use micromath::F32Ext;
use smart_leds::RGB8;

use crate::compass::{Cardinal, CompassRose};
use crate::config::{ColorSource, Config, MATRIX_COLUMNS, MATRIX_PIXELS, MATRIX_ROWS};
use crate::errors::{HoekError, HoekResult};
use crate::history::SpeedHistory;
use crate::lights::{
    Bitmap, GlyphRenderer, GlyphText, Layout, SnakeXY, SpeedColors, draw_trail, linearize,
};
use crate::logging::{debug, error, info, trace};
use crate::observation::Observation;
use crate::sink::LedSink;

/// The 44x11 matrix on the reference hardware.
pub type HoekWindDisplay<S> = WindDisplay<S, MATRIX_COLUMNS, MATRIX_ROWS, MATRIX_PIXELS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderState {
    Idle,
    Rendering,
    Displayed,
}

/// What went into a frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    /// the observed speed rounded to a whole knot
    pub speed_knots: u16,
    /// rolling average over the history, including this observation
    pub average: f32,
    /// color of the text
    pub color: RGB8,
    /// `None` when the direction was unknown
    pub cardinal: Option<Cardinal>,
    pub text: GlyphText,
}

#[derive(Debug, Clone)]
pub struct Rendered<const X: usize, const Y: usize, const N: usize> {
    /// what the matrix looks like
    pub bitmap: Bitmap<X, Y>,
    /// the same pixels in strip order
    pub frame: [RGB8; N],
    pub summary: FrameSummary,
}

/// Owns the led sink and the history for one X by Y matrix of N pixels.
///
/// The history holds one sample per column (`SpeedHistory<X>`), so the trail always spans the full width.
pub struct WindDisplay<S, const X: usize, const Y: usize, const N: usize, L = SnakeXY> {
    sink: S,
    history: SpeedHistory<X>,
    colors: SpeedColors,
    compass: CompassRose,
    glyphs: GlyphRenderer,
    config: Config,
    state: RenderState,
    layout: PhantomData<L>,
}

impl<S, const X: usize, const Y: usize, const N: usize, L> WindDisplay<S, X, Y, N, L>
where
    S: LedSink,
    L: Layout,
{
    pub fn new(sink: S, config: Config) -> HoekResult<Self> {
        let colors = SpeedColors::from_profile(config.color_profile);

        Self::with_colors(sink, config, colors)
    }

    /// Like `new`, but with a custom color table instead of the configured profile.
    pub fn with_colors(sink: S, config: Config, colors: SpeedColors) -> HoekResult<Self> {
        if config.columns != X || config.rows != Y {
            return Err(HoekError::DimensionMismatch {
                config_columns: config.columns,
                config_rows: config.rows,
                columns: X,
                rows: Y,
            });
        }

        if X * Y != N {
            return Err(HoekError::PixelCountMismatch {
                expected: X * Y,
                actual: N,
            });
        }

        for actual in [sink.pixel_count(), config.strip.pixel_count] {
            if actual != N {
                return Err(HoekError::PixelCountMismatch {
                    expected: N,
                    actual,
                });
            }
        }

        if config.trail_row >= Y {
            return Err(HoekError::TrailRowOutOfRange {
                row: config.trail_row,
                rows: Y,
            });
        }

        let glyphs = GlyphRenderer::new(config.font, config.trail_row)?;

        info!(
            "{}x{} matrix. {} colors up to {} knots. trail on row {}",
            X,
            Y,
            colors.len(),
            colors.max_bucket(),
            config.trail_row
        );

        Ok(Self {
            sink,
            history: SpeedHistory::new(),
            colors,
            compass: CompassRose::new(),
            glyphs,
            config,
            state: RenderState::Idle,
            layout: PhantomData,
        })
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn history(&self) -> &SpeedHistory<X> {
        &self.history
    }

    pub fn colors(&self) -> &SpeedColors {
        &self.colors
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn transition(&mut self, to: RenderState) {
        let allowed = matches!(
            (self.state, to),
            (RenderState::Idle, RenderState::Rendering)
                | (RenderState::Rendering, RenderState::Displayed)
                | (RenderState::Rendering, RenderState::Idle)
                | (RenderState::Displayed, RenderState::Idle)
        );

        debug_assert!(allowed, "bad render state transition");

        trace!("render state: {:?} -> {:?}", self.state, to);

        self.state = to;
    }

    /// Render an observation and send it to the sink.
    ///
    /// Returns `Ok(None)` when the observation has no speed. A sink error leaves the sample in the history, so
    /// the next observation draws a complete trail.
    pub fn on_observation(
        &mut self,
        observation: Observation,
    ) -> HoekResult<Option<Rendered<X, Y, N>>> {
        self.transition(RenderState::Rendering);

        let Some(rendered) = self.render(observation) else {
            self.transition(RenderState::Idle);
            return Ok(None);
        };

        if let Err(err) = self.sink.write_frame(&rendered.frame) {
            error!("dropping frame for {}: {}", rendered.summary.text.as_str(), err);

            self.transition(RenderState::Idle);
            return Err(err.into());
        }

        self.transition(RenderState::Displayed);

        debug!(
            "displayed {} (avg {})",
            rendered.summary.text.as_str(),
            rendered.summary.average
        );

        self.transition(RenderState::Idle);

        Ok(Some(rendered))
    }

    /// Everything `on_observation` does except writing to the sink. The speed is still added to the history.
    pub fn render(&mut self, observation: Observation) -> Option<Rendered<X, Y, N>> {
        let Some(speed) = observation.speed else {
            debug!("wind speed unavailable. skipping");
            return None;
        };

        // float to int casts saturate, so this can't wrap
        let speed_knots = speed.max(0.0).round() as u16;

        self.history.push(speed_knots as f32);

        let average = self.history.average();

        // the text follows the configured source, but every trail pixel uses its own sample
        let color = match self.config.color_source {
            ColorSource::Average => self.colors.color_for(average),
            ColorSource::Instantaneous => self.colors.color_for(speed_knots as f32),
        };

        let cardinal = observation
            .direction
            .and_then(|degrees| self.compass.cardinal_for(degrees));

        let text = self.glyphs.fit_text(speed_knots, cardinal, X as u32);

        let mut bitmap = Bitmap::new();

        self.glyphs.draw(&mut bitmap, &text, color);

        draw_trail(&mut bitmap, self.config.trail_row, &self.history, &self.colors);

        let frame = linearize::<L, X, Y, N>(&bitmap);

        Some(Rendered {
            bitmap,
            frame,
            summary: FrameSummary {
                speed_knots,
                average,
                color,
                cardinal,
                text,
            },
        })
    }

    /// turn every pixel off
    pub fn clear(&mut self) -> HoekResult<()> {
        self.sink.clear()?;

        Ok(())
    }
}
