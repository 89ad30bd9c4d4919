use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use smart_leds::RGB8;

/// X columns by Y rows of colors, laid out the way you look at the matrix (not the way it is wired).
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap<const X: usize, const Y: usize> {
    pixels: [[RGB8; X]; Y],
}

impl<const X: usize, const Y: usize> Default for Bitmap<X, Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const X: usize, const Y: usize> Bitmap<X, Y> {
    /// all black
    pub fn new() -> Self {
        Self {
            pixels: [[RGB8::default(); X]; Y],
        }
    }

    pub fn rows(&self) -> &[[RGB8; X]; Y] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<RGB8> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// out of bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = color;
        }
    }

    pub fn fill(&mut self, color: RGB8) {
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
    }

    /// how many pixels are not black
    pub fn lit(&self) -> usize {
        self.pixels
            .iter()
            .flatten()
            .filter(|x| **x != RGB8::default())
            .count()
    }
}

impl<const X: usize, const Y: usize> OriginDimensions for Bitmap<X, Y> {
    fn size(&self) -> Size {
        Size::new(X as u32, Y as u32)
    }
}

/// lets embedded-graphics draw text and shapes straight into the bitmap
impl<const X: usize, const Y: usize> DrawTarget for Bitmap<X, Y> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // clip anything that falls off the matrix
            if point.x < 0 || point.y < 0 {
                continue;
            }

            self.set(
                point.x as usize,
                point.y as usize,
                RGB8::new(color.r(), color.g(), color.b()),
            );
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(RGB8::new(color.r(), color.g(), color.b()));
        Ok(())
    }
}
