//! Wind speed (knots) to a color.
use palette::Hsluv;
use smart_leds::RGB8;

use super::convert_color;
use crate::config::ColorProfile;
use crate::errors::{HoekError, HoekResult};
use crate::logging::trace;
use crate::remap;

/// more than enough for one bucket per knot
pub const MAX_BUCKETS: usize = 64;

/// Speeds below `below` (and at or above the previous bucket's `below`) get `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucket {
    pub below: f32,
    pub color: RGB8,
}

impl ColorBucket {
    pub const fn new(below: f32, color: RGB8) -> Self {
        Self { below, color }
    }
}

/// A contiguous table of speed buckets starting at 0 knots. Anything at or past the last bucket gets `top`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedColors {
    buckets: heapless::Vec<ColorBucket, MAX_BUCKETS>,
    top: RGB8,
}

impl SpeedColors {
    /// Build a custom table. Bounds must be finite, above zero, and strictly increasing.
    pub fn new(buckets: &[ColorBucket], top: RGB8) -> HoekResult<Self> {
        let mut checked = heapless::Vec::new();

        let mut last = 0.0;

        for (index, bucket) in buckets.iter().enumerate() {
            if !bucket.below.is_finite() || bucket.below <= last {
                return Err(HoekError::InvalidColorTable { index });
            }

            checked
                .push(*bucket)
                .map_err(|_| HoekError::InvalidColorTable { index })?;

            last = bucket.below;
        }

        Ok(Self {
            buckets: checked,
            top,
        })
    }

    pub fn from_profile(profile: ColorProfile) -> Self {
        match profile {
            ColorProfile::Fine => Self::fine(),
            ColorProfile::Coarse => Self::coarse(),
        }
    }

    /// One color per knot from 0 to 50, sweeping from blue (calm) to red (blowing hard).
    pub fn fine() -> Self {
        const KNOTS: usize = 50;

        let hue_for = |knot: usize| {
            let hue = remap(knot as f32, 0.0, KNOTS as f32, 260.0, 12.0);

            convert_color(Hsluv::new(hue, 100.0, 60.0))
        };

        let buckets = (0..KNOTS)
            .map(|knot| ColorBucket::new((knot + 1) as f32, hue_for(knot)))
            .collect();

        Self {
            buckets,
            top: hue_for(KNOTS),
        }
    }

    /// 5 knot steps up to 40 knots. Anything faster is magenta.
    pub fn coarse() -> Self {
        const COARSE: [ColorBucket; 8] = [
            ColorBucket::new(5.0, RGB8::new(0, 64, 255)),
            ColorBucket::new(10.0, RGB8::new(0, 160, 255)),
            ColorBucket::new(15.0, RGB8::new(0, 255, 255)),
            ColorBucket::new(20.0, RGB8::new(0, 255, 128)),
            ColorBucket::new(25.0, RGB8::new(0, 255, 0)),
            ColorBucket::new(30.0, RGB8::new(255, 255, 0)),
            ColorBucket::new(35.0, RGB8::new(255, 128, 0)),
            ColorBucket::new(40.0, RGB8::new(255, 0, 0)),
        ];

        Self {
            buckets: COARSE.iter().copied().collect(),
            top: RGB8::new(255, 0, 255),
        }
    }

    /// the speed where colors stop changing
    pub fn max_bucket(&self) -> f32 {
        self.buckets.last().map(|x| x.below).unwrap_or(0.0)
    }

    /// number of distinct colors, including the top color
    pub fn len(&self) -> usize {
        self.buckets.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn buckets(&self) -> &[ColorBucket] {
        &self.buckets
    }

    /// true if `speed` is past the table and will get the top color no matter how fast it is
    pub fn saturates(&self, speed: f32) -> bool {
        speed >= self.max_bucket()
    }

    /// Negative speeds (and NaN) are treated as 0 knots. Speeds past the last bucket get the top color.
    pub fn color_for(&self, speed: f32) -> RGB8 {
        // NaN fails every comparison, so check it explicitly
        let speed = if speed.is_nan() { 0.0 } else { speed.max(0.0) };

        match self.buckets.iter().find(|bucket| speed < bucket.below) {
            Some(bucket) => bucket.color,
            None => {
                trace!("{} knots is past the color table", speed);
                self.top
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_profile() {
        let colors = SpeedColors::fine();

        assert_eq!(colors.len(), 51);
        assert_eq!(colors.max_bucket(), 50.0);

        // one color per knot
        assert_eq!(colors.color_for(3.0), colors.color_for(3.9));
        assert_ne!(colors.color_for(3.0), colors.color_for(4.0));

        // calm is blue and a gale is red
        let calm = colors.color_for(0.0);
        assert!(calm.b > calm.r);
        let gale = colors.color_for(50.0);
        assert!(gale.r > gale.b);
    }

    #[test]
    fn test_coarse_profile() {
        let colors = SpeedColors::coarse();

        assert_eq!(colors.len(), 9);
        assert_eq!(colors.max_bucket(), 40.0);

        assert_eq!(colors.color_for(0.0), RGB8::new(0, 64, 255));
        assert_eq!(colors.color_for(4.9), RGB8::new(0, 64, 255));
        assert_eq!(colors.color_for(5.0), RGB8::new(0, 160, 255));
        assert_eq!(colors.color_for(15.0), RGB8::new(0, 255, 128));
        assert_eq!(colors.color_for(39.9), RGB8::new(255, 0, 0));
        assert_eq!(colors.color_for(40.0), RGB8::new(255, 0, 255));
    }

    #[test]
    fn test_saturates_at_the_top() {
        for colors in [SpeedColors::fine(), SpeedColors::coarse()] {
            let top = colors.color_for(colors.max_bucket());

            for speed in [colors.max_bucket() + 0.1, 99.0, 1000.0, f32::INFINITY] {
                assert!(colors.saturates(speed));
                assert_eq!(colors.color_for(speed), top);
            }

            assert!(!colors.saturates(colors.max_bucket() - 0.5));
        }
    }

    #[test]
    fn test_negative_and_nan_clamp_to_zero() {
        for colors in [SpeedColors::fine(), SpeedColors::coarse()] {
            let zero = colors.color_for(0.0);

            assert_eq!(colors.color_for(-5.0), zero);
            assert_eq!(colors.color_for(f32::NEG_INFINITY), zero);
            assert_eq!(colors.color_for(f32::NAN), zero);
        }
    }

    #[test]
    fn test_total_over_speeds() {
        let colors = SpeedColors::fine();

        // every tenth of a knot from 0 to 60 lands on a color from the table
        for i in 0..600 {
            let color = colors.color_for(i as f32 / 10.0);

            let known = colors.buckets().iter().any(|x| x.color == color)
                || color == colors.color_for(colors.max_bucket());
            assert!(known);
        }
    }

    #[test]
    fn test_built_in_tables_are_valid() {
        for colors in [SpeedColors::fine(), SpeedColors::coarse()] {
            let rebuilt = SpeedColors::new(colors.buckets(), colors.color_for(1000.0)).unwrap();

            assert_eq!(rebuilt, colors);
        }
    }

    #[test]
    fn test_invalid_tables() {
        let red = RGB8::new(255, 0, 0);

        let err = SpeedColors::new(&[ColorBucket::new(0.0, red)], red).unwrap_err();
        assert_eq!(err, HoekError::InvalidColorTable { index: 0 });

        let err = SpeedColors::new(
            &[
                ColorBucket::new(5.0, red),
                ColorBucket::new(10.0, red),
                ColorBucket::new(10.0, red),
            ],
            red,
        )
        .unwrap_err();
        assert_eq!(err, HoekError::InvalidColorTable { index: 2 });

        let err = SpeedColors::new(&[ColorBucket::new(f32::NAN, red)], red).unwrap_err();
        assert_eq!(err, HoekError::InvalidColorTable { index: 0 });
    }

    #[test]
    fn test_profiles_side_by_side() {
        let fine = SpeedColors::from_profile(ColorProfile::Fine);
        let coarse = SpeedColors::from_profile(ColorProfile::Coarse);

        assert_ne!(fine.max_bucket(), coarse.max_bucket());
        assert_eq!(fine, SpeedColors::fine());
    }
}
