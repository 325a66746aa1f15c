// Shared tuning constants used by both web and native frontends.

// Board
pub const ROW_COUNT: usize = 5; // rows of invaders
pub const PEAK_COUNT: usize = 55; // total invaders on the board
pub const COLUMN_COUNT: usize = PEAK_COUNT / ROW_COUNT; // 11 per row

// Frequency brackets (Hz), top row first
pub const DEFAULT_BRACKETS: [[f32; 2]; ROW_COUNT] = [
    [2200.0, 5800.0],
    [6200.0, 9800.0],
    [10200.0, 13800.0],
    [14200.0, 17800.0],
    [18200.0, 21800.0],
];

// Analysis
pub const SAMPLE_RATE: f32 = 48_000.0; // row bin ranges line up with the brackets at this rate
pub const FFT_SIZE: usize = 1024; // bin count is half this value
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;
pub const SMOOTHING_TIME_CONSTANT: f32 = 0.8;

// Peak detection
pub const FFT_EDGE_TRIM_FRACTION: f32 = 0.08; // trimmed from both ends (DC, Nyquist)
pub const PEAK_MAGNITUDE_THRESHOLD: u8 = 40; // max |max - bin| to count as a peak
pub const PEAK_MIN_SPACING_PX: f32 = 25.0; // min x distance between peaks in a row
pub const MIN_PEAK_MAGNITUDE: u8 = 1; // snapshots quieter than this carry no peaks

// Layout (pixels)
pub const PIXEL_WIDTH: f32 = 800.0; // game board width
pub const ROW_HEIGHT: f32 = 100.0;
pub const ROW_START_X: f32 = 100.0; // x of the first bin in every row
pub const INVADER_WIDTH: f32 = 50.0;
pub const INVADER_HEIGHT: f32 = 36.0;
pub const PLAYER_Y: f32 = 700.0; // invaders reaching this line win
pub const PLAYER_TRANSLATE_X: f32 = -200.0; // player trace viewport transform
pub const PLAYER_SCALE_X: f32 = 1.5;

// Formation movement
pub const INVADER_LEFT_BOUND: f32 = 20.0;
pub const INVADER_RIGHT_BOUND: f32 = 680.0;
pub const INVADER_OVERFLOW_SWEEP_PX: f32 = 100.0; // travel when wider than the bounds
pub const INVADER_X_STEP: f32 = 0.08; // per tick, times (dead + 1)
pub const INVADER_Y_STEP: f32 = 0.005; // per changed snapshot

// Player
pub const PLAYER_X_STEP: f32 = 10.0;
pub const PLAYER_GAIN_MULTIPLIER: f32 = 4.0; // player louder than invaders

// Tone emission
pub const TONE_GAIN: f32 = 0.1;
pub const TONE_DURATION_SEC: f64 = 0.1;
pub const TONE_STAGGER_SEC: f64 = 0.001; // offset between consecutive oscillators
pub const EMISSION_INTERVAL_MS: u64 = 100;

// Laser
pub const LASER_TRAVEL_MS_PER_ROW: u64 = 150;
