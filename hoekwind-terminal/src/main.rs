//! Show wind on a pretend led matrix in the terminal.
//!
//! Pipe weather station loop packets in as JSON lines:
//!
//! `echo '{"windSpeed": 15, "windDir": 90}' | hoekwind-terminal`
use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hoekwind_core::{
    config::{Config, MATRIX_COLUMNS, MATRIX_PIXELS, MATRIX_ROWS},
    display::HoekWindDisplay,
    errors::HoekError,
    logging::{debug, error, info, warn},
    observation::{Observation, SpeedUnit},
    sink::SmartLedsSink,
};
use hoekwind_terminal::{AnsiStrip, check_matrix_size, read_packets};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnitArg {
    Knots,
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl From<UnitArg> for SpeedUnit {
    fn from(x: UnitArg) -> Self {
        match x {
            UnitArg::Knots => SpeedUnit::Knots,
            UnitArg::MetersPerSecond => SpeedUnit::MetersPerSecond,
            UnitArg::KilometersPerHour => SpeedUnit::KilometersPerHour,
            UnitArg::MilesPerHour => SpeedUnit::MilesPerHour,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file. Missing fields use the defaults. Only the 44x11 matrix is supported
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wind speed unit for packets that do not say which unit system they use
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let config = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_nanos()
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(unit) = args.unit {
        config.source_unit = unit.into();
    }

    debug!("{:?}", config);

    check_matrix_size(&config)?;

    let source_unit = config.source_unit;

    let strip = AnsiStrip::<_, MATRIX_COLUMNS, MATRIX_ROWS>::new(io::stdout());

    let sink = SmartLedsSink::<_, MATRIX_PIXELS>::new(strip, &config.strip)?;

    let mut display = HoekWindDisplay::new(sink, config)?;

    // a small buffer. if rendering falls behind, new packets are dropped instead of piling up
    let (tx_observation, rx_observation) = flume::bounded::<Observation>(2);

    // stdin is read on another thread so a slow frame never blocks the reader
    let reader = thread::spawn(move || read_packets(io::stdin().lock(), source_unit, &tx_observation));

    while let Ok(observation) = rx_observation.recv() {
        match display.on_observation(observation) {
            Ok(_) => {}
            Err(HoekError::Sink(err)) => {
                // the next observation redraws everything
                warn!("frame dropped: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    match reader.join() {
        Ok(result) => result.context("reading packets")?,
        Err(_) => error!("packet reader panicked"),
    }

    display.clear()?;

    info!("input closed. goodbye");

    Ok(())
}
