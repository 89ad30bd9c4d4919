use super::{Bitmap, SpeedColors};
use crate::history::SpeedHistory;

/// Paint recent speeds across one row. The newest sample sits in the rightmost column and older samples
/// scroll left. Each pixel is colored by its own speed, not the average.
pub fn draw_trail<const X: usize, const Y: usize>(
    bitmap: &mut Bitmap<X, Y>,
    row: usize,
    history: &SpeedHistory<X>,
    colors: &SpeedColors,
) {
    for (age, speed) in history.iter_newest_first().enumerate() {
        bitmap.set(X - 1 - age, row, colors.color_for(speed));
    }
}
