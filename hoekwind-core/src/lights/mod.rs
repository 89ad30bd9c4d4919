//! Everything between a wind reading and a frame of colors in strip order.
//!
//! Ideas for later:
//! - A gust marker on the trail when a sample is well above the average
//! - Scroll the text when it is wider than the matrix

mod bitmap;
mod color_correction;
mod glyph;
mod matrix;
mod speed_colors;
mod trail;

pub use bitmap::Bitmap;
pub use color_correction::convert_color;
pub use glyph::{GlyphRenderer, GlyphText};
pub use matrix::{Layout, SimpleXY, SnakeXY, linearize};
pub use speed_colors::{ColorBucket, MAX_BUCKETS, SpeedColors};
pub use trail::draw_trail;
