use thiserror::Error;

/// Reasons a [`GameConfig`](crate::GameConfig) cannot drive a game.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board needs at least one row")]
    NoRows,
    #[error("board needs at least two columns per row, got {0}")]
    TooFewColumns(usize),
    #[error("{brackets} frequency brackets configured for {rows} rows")]
    BracketCountMismatch { rows: usize, brackets: usize },
    #[error("bracket for row {row} is empty or inverted ({min} Hz .. {max} Hz)")]
    InvertedBracket { row: usize, min: f32, max: f32 },
    #[error("bracket for row {row} starts at {min} Hz; frequencies must be positive")]
    NonPositiveBracket { row: usize, min: f32 },
    #[error("bracket for row {row} starts below the previous row's maximum")]
    OverlappingBrackets { row: usize },
    #[error("unsupported fft size {0} (expected 512, 1024, 2048 or 4096)")]
    UnsupportedFftSize(usize),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}
