use std::io::{self, BufRead, Write};

use anyhow::bail;
use hoekwind_core::{
    config::{Config, MATRIX_COLUMNS, MATRIX_PIXELS, MATRIX_ROWS},
    lights::{Layout, SnakeXY},
    logging::{debug, info, trace, warn},
    observation::{Observation, SpeedUnit},
};
use serde::Deserialize;
use smart_leds::{RGB8, SmartLedsWrite};

/// One loop packet from the weather station. Anything besides wind is ignored.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct WeatherPacket {
    /// unix seconds
    #[serde(rename = "dateTime")]
    pub date_time: Option<i64>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<f32>,
    #[serde(rename = "windDir")]
    pub wind_dir: Option<f32>,
    /// unit system of the packet. 1 = US, 16 = METRIC, 17 = METRICWX
    #[serde(rename = "usUnits")]
    pub us_units: Option<u8>,
}

impl WeatherPacket {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// the packet's own unit system wins over `default_unit`
    pub fn observation(&self, default_unit: SpeedUnit) -> Observation {
        let unit = self
            .us_units
            .and_then(SpeedUnit::from_unit_system)
            .unwrap_or(default_unit);

        Observation::from_unit(self.wind_speed, self.wind_dir, unit)
    }
}

/// Read one JSON packet per line and send the observations on.
///
/// If the renderer is still busy and the channel is full, the new observation is dropped. Returns when the
/// input ends or the renderer goes away.
pub fn read_packets(
    input: impl BufRead,
    default_unit: SpeedUnit,
    tx: &flume::Sender<Observation>,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        let packet = match WeatherPacket::parse(&line) {
            Ok(x) => x,
            Err(err) => {
                warn!("skipping bad packet: {err}");
                continue;
            }
        };

        debug!(
            "LOOP: {:?} wind={:?} dir={:?}",
            packet.date_time, packet.wind_speed, packet.wind_dir
        );

        match tx.try_send(packet.observation(default_unit)) {
            Ok(()) => {}
            Err(flume::TrySendError::Full(observation)) => {
                warn!("renderer is busy. dropping {:?}", observation);
            }
            Err(flume::TrySendError::Disconnected(_)) => {
                info!("renderer is gone. stopping");
                break;
            }
        }
    }

    Ok(())
}

/// The terminal draws the 44x11 reference matrix. Anything else in the config is a mistake.
pub fn check_matrix_size(config: &Config) -> anyhow::Result<()> {
    if config.columns != MATRIX_COLUMNS || config.rows != MATRIX_ROWS {
        bail!(
            "config is {}x{} but this host only draws a {}x{} matrix",
            config.columns,
            config.rows,
            MATRIX_COLUMNS,
            MATRIX_ROWS
        );
    }

    if config.strip.pixel_count != MATRIX_PIXELS {
        bail!(
            "strip.pixel_count is {} but a {}x{} matrix has {} pixels",
            config.strip.pixel_count,
            MATRIX_COLUMNS,
            MATRIX_ROWS,
            MATRIX_PIXELS
        );
    }

    Ok(())
}

/// Draws frames on a terminal with 24-bit ANSI colors. Frames arrive in strip order and are un-snaked back into
/// rows so the terminal looks like the matrix.
pub struct AnsiStrip<W, const X: usize, const Y: usize> {
    out: W,
    frames: usize,
}

impl<W: Write, const X: usize, const Y: usize> AnsiStrip<W, X, Y> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, pixels: &[RGB8]) -> io::Result<()> {
        // move the cursor home and clear so the matrix redraws in place
        write!(self.out, "\x1b[H\x1b[2J")?;

        for y in 0..Y {
            for x in 0..X {
                let RGB8 { r, g, b } = pixels[SnakeXY::xy_to_n(x, y, X)];

                if (r, g, b) == (0, 0, 0) {
                    write!(self.out, "  ")?;
                } else {
                    write!(self.out, "\x1b[38;2;{r};{g};{b}m██\x1b[0m")?;
                }
            }

            writeln!(self.out)?;
        }

        self.out.flush()
    }
}

impl<W: Write, const X: usize, const Y: usize> SmartLedsWrite for AnsiStrip<W, X, Y> {
    type Error = io::Error;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let pixels: Vec<RGB8> = iterator.into_iter().map(Into::into).collect();

        if pixels.len() != X * Y {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected {} pixels, got {}", X * Y, pixels.len()),
            ));
        }

        self.draw(&pixels)?;

        self.frames += 1;

        trace!("drew frame {}", self.frames);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoekwind_core::config::{ColorProfile, LedStripConfig};

    #[test]
    fn test_parse_packet() {
        let packet = WeatherPacket::parse(
            r#"{"dateTime": 1700000000, "windSpeed": 15.0, "windDir": 90.0, "outTemp": 12.5}"#,
        )
        .unwrap();

        assert_eq!(packet.date_time, Some(1700000000));
        assert_eq!(
            packet.observation(SpeedUnit::Knots),
            Observation::new(Some(15.0), Some(90.0))
        );
    }

    #[test]
    fn test_missing_and_null_fields() {
        let packet = WeatherPacket::parse(r#"{"windSpeed": null}"#).unwrap();

        assert_eq!(packet, WeatherPacket::default());
        assert_eq!(
            packet.observation(SpeedUnit::Knots),
            Observation::new(None, None)
        );
    }

    #[test]
    fn test_packet_units_win() {
        let packet = WeatherPacket::parse(r#"{"windSpeed": 10.0, "usUnits": 17}"#).unwrap();

        let speed = packet.observation(SpeedUnit::Knots).speed.unwrap();
        assert!((speed - 19.438).abs() < 0.01);

        // no usUnits, so the default unit is used
        let packet = WeatherPacket::parse(r#"{"windSpeed": 10.0}"#).unwrap();

        let speed = packet.observation(SpeedUnit::MilesPerHour).speed.unwrap();
        assert!((speed - 8.69).abs() < 0.01);
    }

    #[test]
    fn test_read_packets() {
        let input = "{\"windSpeed\": 5.0}\nnot json\n\n{\"windSpeed\": 6.0}\n{\"windSpeed\": 7.0}\n";

        let (tx, rx) = flume::bounded(2);

        read_packets(input.as_bytes(), SpeedUnit::Knots, &tx).unwrap();

        // the bad line is skipped and the third packet is dropped because nobody drained the channel
        let received: Vec<_> = rx.try_iter().map(|x| x.speed).collect();
        assert_eq!(received, vec![Some(5.0), Some(6.0)]);
    }

    #[test]
    fn test_read_packets_stops_without_a_renderer() {
        let (tx, rx) = flume::bounded(2);
        drop(rx);

        read_packets("{\"windSpeed\": 5.0}\n".as_bytes(), SpeedUnit::Knots, &tx).unwrap();
    }

    #[test]
    fn test_partial_config_file() {
        let config: Config = serde_json::from_str(
            r#"{"color_profile": "coarse", "source_unit": "meters_per_second", "strip": {"brightness": 255}}"#,
        )
        .unwrap();

        assert_eq!(config.color_profile, ColorProfile::Coarse);
        assert_eq!(config.source_unit, SpeedUnit::MetersPerSecond);
        assert_eq!(config.strip.brightness, 255);

        // everything else keeps the reference hardware values
        assert_eq!(config.strip.pixel_count, 484);
        assert_eq!(config.rows, Config::default().rows);
        assert_eq!(config.trail_row, 10);
    }

    #[test]
    fn test_check_matrix_size() {
        assert!(check_matrix_size(&Config::default()).is_ok());

        let small: Config = serde_json::from_str(
            r#"{"rows": 8, "columns": 8, "trail_row": 7, "strip": {"pixel_count": 64}}"#,
        )
        .unwrap();

        let err = check_matrix_size(&small).unwrap_err();
        assert!(err.to_string().contains("only draws a 44x11 matrix"));

        let short_strip = Config {
            strip: LedStripConfig {
                pixel_count: 100,
                ..Default::default()
            },
            ..Default::default()
        };

        let err = check_matrix_size(&short_strip).unwrap_err();
        assert!(err.to_string().contains("strip.pixel_count is 100"));
    }

    #[test]
    fn test_ansi_strip() {
        let mut strip = AnsiStrip::<_, 2, 2>::new(Vec::new());

        let red = RGB8::new(255, 0, 0);
        let black = RGB8::default();

        // strip order. index 3 is the first column of the second row
        strip.write([black, black, black, red]).unwrap();

        assert_eq!(strip.frames(), 1);

        let out = String::from_utf8(strip.into_inner()).unwrap();
        let lines: Vec<&str> = out.trim_start_matches("\x1b[H\x1b[2J").lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "    ");
        assert!(lines[1].starts_with("\x1b[38;2;255;0;0m"));
    }

    #[test]
    fn test_ansi_strip_wrong_size() {
        let mut strip = AnsiStrip::<_, 2, 2>::new(Vec::new());

        let err = strip.write([RGB8::default(); 3]).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(strip.frames(), 0);
    }
}
