//! Game configuration.
//!
//! Every tunable lives in [`constants`](crate::constants); this module groups
//! them into plain structs with `Default` impls so frontends and tests can
//! override individual values before handing the whole thing to
//! [`Game::new`](crate::Game::new), which validates it once.

use crate::constants::*;
use crate::error::ConfigError;
use std::time::Duration;

/// Frequency range (Hz) assigned to one board row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyBracket {
    pub min: f32,
    pub max: f32,
}

impl FrequencyBracket {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

pub fn default_brackets() -> Vec<FrequencyBracket> {
    DEFAULT_BRACKETS
        .iter()
        .map(|[min, max]| FrequencyBracket::new(*min, *max))
        .collect()
}

/// Spectrum analysis parameters shared by every sampler.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub sample_rate: f32,
    pub fft_size: usize,
    pub min_decibels: f32,
    pub max_decibels: f32,
    pub smoothing: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            fft_size: FFT_SIZE,
            min_decibels: MIN_DECIBELS,
            max_decibels: MAX_DECIBELS,
            smoothing: SMOOTHING_TIME_CONSTANT,
        }
    }
}

impl AnalysisConfig {
    /// Number of magnitude bins a snapshot carries.
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetectionConfig {
    pub edge_trim_fraction: f32,
    pub magnitude_threshold: u8,
    pub min_spacing_px: f32,
    pub min_peak_magnitude: u8,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            edge_trim_fraction: FFT_EDGE_TRIM_FRACTION,
            magnitude_threshold: PEAK_MAGNITUDE_THRESHOLD,
            min_spacing_px: PEAK_MIN_SPACING_PX,
            min_peak_magnitude: MIN_PEAK_MAGNITUDE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub pixel_width: f32,
    pub row_height: f32,
    pub row_start_x: f32,
    pub invader_width: f32,
    pub invader_height: f32,
    pub player_y: f32,
    pub player_translate_x: f32,
    pub player_scale_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixel_width: PIXEL_WIDTH,
            row_height: ROW_HEIGHT,
            row_start_x: ROW_START_X,
            invader_width: INVADER_WIDTH,
            invader_height: INVADER_HEIGHT,
            player_y: PLAYER_Y,
            player_translate_x: PLAYER_TRANSLATE_X,
            player_scale_x: PLAYER_SCALE_X,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub left_bound: f32,
    pub right_bound: f32,
    pub overflow_sweep_px: f32,
    pub invader_x_step: f32,
    pub invader_y_step: f32,
    pub player_x_step: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            left_bound: INVADER_LEFT_BOUND,
            right_bound: INVADER_RIGHT_BOUND,
            overflow_sweep_px: INVADER_OVERFLOW_SWEEP_PX,
            invader_x_step: INVADER_X_STEP,
            invader_y_step: INVADER_Y_STEP,
            player_x_step: PLAYER_X_STEP,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToneConfig {
    pub gain: f32,
    pub player_gain_multiplier: f32,
    pub duration_sec: f64,
    pub stagger_sec: f64,
    pub interval: Duration,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            gain: TONE_GAIN,
            player_gain_multiplier: PLAYER_GAIN_MULTIPLIER,
            duration_sec: TONE_DURATION_SEC,
            stagger_sec: TONE_STAGGER_SEC,
            interval: Duration::from_millis(EMISSION_INTERVAL_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub brackets: Vec<FrequencyBracket>,
    pub analysis: AnalysisConfig,
    pub detection: DetectionConfig,
    pub layout: LayoutConfig,
    pub motion: MotionConfig,
    pub tones: ToneConfig,
    pub laser_travel_per_row: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: ROW_COUNT,
            columns: COLUMN_COUNT,
            brackets: default_brackets(),
            analysis: AnalysisConfig::default(),
            detection: DetectionConfig::default(),
            layout: LayoutConfig::default(),
            motion: MotionConfig::default(),
            tones: ToneConfig::default(),
            laser_travel_per_row: Duration::from_millis(LASER_TRAVEL_MS_PER_ROW),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.columns < 2 {
            return Err(ConfigError::TooFewColumns(self.columns));
        }
        if self.brackets.len() != self.rows {
            return Err(ConfigError::BracketCountMismatch {
                rows: self.rows,
                brackets: self.brackets.len(),
            });
        }
        for (row, b) in self.brackets.iter().enumerate() {
            if !(b.min > 0.0) {
                return Err(ConfigError::NonPositiveBracket { row, min: b.min });
            }
            if !(b.span() > 0.0) {
                return Err(ConfigError::InvertedBracket {
                    row,
                    min: b.min,
                    max: b.max,
                });
            }
        }
        // rows climb in frequency; neighbours may touch but not overlap
        for (row, pair) in self.brackets.windows(2).enumerate() {
            if pair[1].min < pair[0].max {
                return Err(ConfigError::OverlappingBrackets { row: row + 1 });
            }
        }
        if !matches!(self.analysis.fft_size, 512 | 1024 | 2048 | 4096) {
            return Err(ConfigError::UnsupportedFftSize(self.analysis.fft_size));
        }
        if !(self.analysis.sample_rate > 0.0) {
            return Err(ConfigError::NonPositive("sample rate"));
        }
        if !(self.layout.pixel_width > 0.0) {
            return Err(ConfigError::NonPositive("pixel width"));
        }
        if self.tones.interval.is_zero() {
            return Err(ConfigError::NonPositive("emission interval"));
        }
        Ok(())
    }

    /// Lowest frequency on the board (top-left invader).
    #[inline]
    pub fn min_frequency(&self) -> f32 {
        self.brackets.first().map(|b| b.min).unwrap_or(0.0)
    }

    /// Highest frequency on the board (bottom-right invader).
    #[inline]
    pub fn max_frequency(&self) -> f32 {
        self.brackets.last().map(|b| b.max).unwrap_or(0.0)
    }
}
