//! Render live wind speed and direction onto an addressable LED matrix.
//!
//! Observation -> SpeedColors + CompassRose -> GlyphRenderer -> Bitmap -> trail overlay -> linearize -> LedSink
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod compass;
pub mod config;
pub mod display;
pub mod errors;
pub mod history;
pub mod lights;
pub mod logging;
pub mod observation;
pub mod sink;

/// Map t in range [a, b] to range [c, d]
pub fn remap(t: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    (t - a) * ((d - c) / (b - a)) + c
}
