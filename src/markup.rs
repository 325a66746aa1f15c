//! Pure string helpers shared by the SVG surface, the debug grid and the
//! state button. Kept free of `web_sys` so they can be tested on the host.

use super::constants::{INVADER_PATH_WIDTH, LABEL_LINE_HEIGHT};
use invaders_core::{Layer, PlayState};

#[inline]
pub fn layer_prefix(layer: Layer) -> &'static str {
    match layer {
        Layer::Invaders => "invaders",
        Layer::Player => "player",
        Layer::Laser => "laser",
    }
}

/// Id of the `<g>` holding every marker of one frame.
pub fn group_id(layer: Layer, frame_id: u64) -> String {
    format!("{}-{}", layer_prefix(layer), frame_id)
}

pub fn invader_id(row: usize, column: usize) -> String {
    format!("invader-row-{}-column-{}", row, column)
}

/// Place the 512 unit invader glyph at `(x, y)` scaled to `width` pixels.
pub fn invader_transform(x: f32, y: f32, width: f32) -> String {
    format!(
        "translate({:.2}, {:.2}) scale({:.4})",
        x,
        y,
        width / INVADER_PATH_WIDTH
    )
}

/// Debug label lines drawn under an invader.
pub fn invader_labels(bin_index: usize, frequency_hz: u32) -> [String; 2] {
    [format!("bin {}", bin_index), format!("{} mhz", frequency_hz)]
}

pub fn player_labels(bin_index: usize, frequency_hz: u32) -> [String; 2] {
    [
        format!("player {} mhz", frequency_hz),
        format!("bin {}", bin_index),
    ]
}

/// Baseline of the `line`-th label below `y`.
#[inline]
pub fn label_y(y: f32, line: usize) -> f32 {
    y + (line + 1) as f32 * LABEL_LINE_HEIGHT
}

pub fn cell_id(row: usize, column: usize) -> String {
    format!("cell-{}-{}", row, column)
}

/// Inverse of [`cell_id`].
pub fn parse_cell_id(id: &str) -> Option<(usize, usize)> {
    let rest = id.strip_prefix("cell-")?;
    let (row, column) = rest.split_once('-')?;
    Some((row.parse().ok()?, column.parse().ok()?))
}

pub fn state_label(state: PlayState) -> &'static str {
    match state {
        PlayState::Stopped => "Start Game",
        PlayState::Playing => "Pause Game",
        PlayState::Paused => "Continue Game",
        PlayState::GameOver(_) => "Play Again",
    }
}
