//! Turn (x, y) matrix coordinates into positions along the led strip.
use smart_leds::RGB8;

use super::Bitmap;

/// How the strip is wired across the matrix. x is the column and y is the row.
pub trait Layout {
    fn xy_to_n(x: usize, y: usize, width: usize) -> usize;

    fn n_to_xy(n: usize, width: usize) -> (usize, usize);
}

/// row-major. every row starts on the left
pub struct SimpleXY;

/// the strip snakes back and forth. this is how most led matrix panels are wired
pub struct SnakeXY;

impl Layout for SimpleXY {
    fn xy_to_n(x: usize, y: usize, width: usize) -> usize {
        y * width + x
    }

    fn n_to_xy(n: usize, width: usize) -> (usize, usize) {
        (n % width, n / width)
    }
}

impl Layout for SnakeXY {
    fn xy_to_n(x: usize, y: usize, width: usize) -> usize {
        match y % 2 {
            0 => y * width + x,               // Even rows: left to right
            _ => y * width + (width - 1 - x), // Odd rows: right to left
        }
    }

    fn n_to_xy(n: usize, width: usize) -> (usize, usize) {
        let y = n / width;
        let x = match y % 2 {
            0 => n % width,               // Even rows: left to right
            _ => width - 1 - (n % width), // Odd rows: right to left
        };
        (x, y)
    }
}

/// Reorder a bitmap into the order the strip expects. `N` must be `X * Y`.
pub fn linearize<L: Layout, const X: usize, const Y: usize, const N: usize>(
    bitmap: &Bitmap<X, Y>,
) -> [RGB8; N] {
    // TODO: compile time assert
    debug_assert_eq!(X * Y, N);

    let mut frame = [RGB8::default(); N];

    for (y, row) in bitmap.rows().iter().enumerate() {
        for (x, color) in row.iter().enumerate() {
            frame[L::xy_to_n(x, y, X)] = *color;
        }
    }

    frame
}
