use thiserror::Error;

use crate::sink::SinkError;

#[derive(Error, Debug, PartialEq)]
pub enum HoekError {
    /// the led sink refused the frame. the next observation will try again
    #[error("led sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("color buckets must start above 0 and strictly increase (bucket {index})")]
    InvalidColorTable { index: usize },
    #[error("config is {config_columns}x{config_rows} but the matrix is {columns}x{rows}")]
    DimensionMismatch {
        config_columns: usize,
        config_rows: usize,
        columns: usize,
        rows: usize,
    },
    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("font is {font_height}px tall but only {available} rows are free above the trail")]
    FontTooTall { font_height: u32, available: u32 },
    #[error("trail row {row} is outside a matrix with {rows} rows")]
    TrailRowOutOfRange { row: usize, rows: usize },
}

pub type HoekResult<T> = Result<T, HoekError>;
