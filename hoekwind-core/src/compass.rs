// wind direction to a 16 point compass label
// TODO: why does the linter think this is unused when math functions on f32 are used. something about std being enabled in the linter?
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::logging::error;

/// half the width of a sector. boundaries sit at label angle ± this
pub const HALF_SECTOR_DEGREES: f32 = 11.25;
pub const SECTOR_DEGREES: f32 = HALF_SECTOR_DEGREES * 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl Cardinal {
    /// clockwise, starting at north
    pub const ALL: [Cardinal; 16] = [
        Cardinal::N,
        Cardinal::NNE,
        Cardinal::NE,
        Cardinal::ENE,
        Cardinal::E,
        Cardinal::ESE,
        Cardinal::SE,
        Cardinal::SSE,
        Cardinal::S,
        Cardinal::SSW,
        Cardinal::SW,
        Cardinal::WSW,
        Cardinal::W,
        Cardinal::WNW,
        Cardinal::NW,
        Cardinal::NNW,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Cardinal::N => "N",
            Cardinal::NNE => "NNE",
            Cardinal::NE => "NE",
            Cardinal::ENE => "ENE",
            Cardinal::E => "E",
            Cardinal::ESE => "ESE",
            Cardinal::SE => "SE",
            Cardinal::SSE => "SSE",
            Cardinal::S => "S",
            Cardinal::SSW => "SSW",
            Cardinal::SW => "SW",
            Cardinal::WSW => "WSW",
            Cardinal::W => "W",
            Cardinal::WNW => "WNW",
            Cardinal::NW => "NW",
            Cardinal::NNW => "NNW",
        }
    }

    /// center of the sector
    pub fn degrees(self) -> f32 {
        self as u8 as f32 * SECTOR_DEGREES
    }
}

/// A slice of the compass. Both ends are inclusive. The scan order decides shared edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub cardinal: Cardinal,
    pub min: f32,
    pub max: f32,
}

impl Sector {
    fn new(cardinal: Cardinal) -> Self {
        let center = cardinal.degrees();

        match cardinal {
            // north straddles 0°. store it as 348.75..=11.25 and special case it in `contains`
            Cardinal::N => Self {
                cardinal,
                min: 360.0 - HALF_SECTOR_DEGREES,
                max: HALF_SECTOR_DEGREES,
            },
            _ => Self {
                cardinal,
                min: center - HALF_SECTOR_DEGREES,
                max: center + HALF_SECTOR_DEGREES,
            },
        }
    }

    pub fn wraps(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, degrees: f32) -> bool {
        if self.wraps() {
            degrees >= self.min || degrees <= self.max
        } else {
            self.min <= degrees && degrees <= self.max
        }
    }
}

/// The 16 sectors, owned by whoever needs to bucket directions.
#[derive(Debug, Clone)]
pub struct CompassRose {
    sectors: [Sector; 16],
}

impl Default for CompassRose {
    fn default() -> Self {
        Self::new()
    }
}

impl CompassRose {
    pub fn new() -> Self {
        Self {
            sectors: Cardinal::ALL.map(Sector::new),
        }
    }

    pub fn sectors(&self) -> &[Sector; 16] {
        &self.sectors
    }

    /// Bucket a heading into one of the 16 labels.
    ///
    /// Angles outside `[0, 360)` are wrapped. Only NaN or infinity give `None`, which is how an unknown
    /// direction reaches the renderer.
    pub fn cardinal_for(&self, degrees: f32) -> Option<Cardinal> {
        if !degrees.is_finite() {
            return None;
        }

        let mut normalized = degrees.rem_euclid(360.0);

        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if normalized >= 360.0 {
            normalized = 0.0;
        }

        let found = self.scan(normalized);

        if found.is_none() {
            // the sectors cover the whole circle. getting here means the table is broken
            error!("no compass sector contains {} degrees", normalized);
        }

        found
    }

    /// first sector in label order that contains `degrees`. no wrapping is done here
    pub fn scan(&self, degrees: f32) -> Option<Cardinal> {
        self.sectors
            .iter()
            .find(|sector| sector.contains(degrees))
            .map(|sector| sector.cardinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_wraps() {
        let rose = CompassRose::new();

        assert_eq!(rose.cardinal_for(0.0), Some(Cardinal::N));
        assert_eq!(rose.cardinal_for(359.9), Some(Cardinal::N));
        assert_eq!(rose.cardinal_for(348.75), Some(Cardinal::N));
        assert_eq!(rose.cardinal_for(11.25), Some(Cardinal::N));
        assert_eq!(rose.cardinal_for(11.26), Some(Cardinal::NNE));
        assert_eq!(rose.cardinal_for(348.7), Some(Cardinal::NNW));
    }

    #[test]
    fn test_centers() {
        let rose = CompassRose::new();

        for cardinal in Cardinal::ALL {
            assert_eq!(rose.cardinal_for(cardinal.degrees()), Some(cardinal));
        }

        assert_eq!(rose.cardinal_for(90.0), Some(Cardinal::E));
        assert_eq!(rose.cardinal_for(180.0), Some(Cardinal::S));
        assert_eq!(rose.cardinal_for(270.0), Some(Cardinal::W));
        assert_eq!(Cardinal::E.label(), "E");
        assert_eq!(Cardinal::NNW.label(), "NNW");
    }

    #[test]
    fn test_shared_edges_go_to_the_earlier_label() {
        let rose = CompassRose::new();

        // 33.75 is the top of NNE and the bottom of NE
        assert_eq!(rose.cardinal_for(33.75), Some(Cardinal::NNE));
        assert_eq!(rose.cardinal_for(33.76), Some(Cardinal::NE));
    }

    #[test_log::test]
    fn test_every_heading_has_exactly_one_label() {
        let rose = CompassRose::new();

        // hundredths of a degree across the whole circle
        for i in 0..36_000 {
            let degrees = i as f32 / 100.0;

            let found = rose.scan(degrees);
            assert!(found.is_some(), "{} fell through every sector", degrees);

            let matching = rose
                .sectors()
                .iter()
                .filter(|sector| sector.contains(degrees))
                .count();

            // one match, or two when sitting exactly on a shared edge
            assert!(matching == 1 || matching == 2, "{} matched {}", degrees, matching);
        }
    }

    #[test]
    fn test_out_of_range_wraps() {
        let rose = CompassRose::new();

        assert_eq!(rose.cardinal_for(360.0), Some(Cardinal::N));
        assert_eq!(rose.cardinal_for(450.0), Some(Cardinal::E));
        assert_eq!(rose.cardinal_for(-90.0), Some(Cardinal::W));
        assert_eq!(rose.cardinal_for(-0.0001), Some(Cardinal::N));
    }

    #[test]
    fn test_unknown_direction() {
        let rose = CompassRose::new();

        assert_eq!(rose.cardinal_for(f32::NAN), None);
        assert_eq!(rose.cardinal_for(f32::INFINITY), None);
    }

    #[test]
    fn test_sectors_are_even() {
        let rose = CompassRose::new();

        for sector in rose.sectors().iter().filter(|x| !x.wraps()) {
            assert_eq!(sector.max - sector.min, SECTOR_DEGREES);
        }

        assert_eq!(rose.sectors().iter().filter(|x| x.wraps()).count(), 1);
    }
}
