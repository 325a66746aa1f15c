// Host-side tests for the SVG and DOM string helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/markup.rs"]
mod markup;

use invaders_core::{Layer, Outcome, PlayState};
use markup::*;

#[test]
fn group_ids_are_unique_per_layer_and_frame() {
    assert_eq!(group_id(Layer::Invaders, 3), "invaders-3");
    assert_eq!(group_id(Layer::Player, 3), "player-3");
    assert_eq!(group_id(Layer::Laser, 0), "laser-0");
    assert_ne!(group_id(Layer::Invaders, 3), group_id(Layer::Invaders, 4));
}

#[test]
fn cell_ids_round_trip_and_reject_noise() {
    assert_eq!(cell_id(4, 10), "cell-4-10");
    assert_eq!(parse_cell_id("cell-4-10"), Some((4, 10)));
    assert_eq!(parse_cell_id("controller-grid"), None);
    assert_eq!(parse_cell_id("cell-x-1"), None);
    assert_eq!(parse_cell_id("cell-1"), None);
}

#[test]
fn invader_glyph_is_scaled_to_width() {
    assert_eq!(
        invader_transform(109.3, 0.0, 50.0),
        "translate(109.30, 0.00) scale(0.0977)"
    );
    assert_eq!(invader_id(2, 7), "invader-row-2-column-7");
}

#[test]
fn debug_labels_show_bin_and_frequency() {
    assert_eq!(invader_labels(46, 2200), ["bin 46".to_string(), "2200 mhz".to_string()]);
    assert_eq!(
        player_labels(256, 12_000),
        ["player 12000 mhz".to_string(), "bin 256".to_string()]
    );
    assert!(label_y(100.0, 1) > label_y(100.0, 0));
}

#[test]
fn state_button_labels_follow_state() {
    assert_eq!(state_label(PlayState::Stopped), "Start Game");
    assert_eq!(state_label(PlayState::Playing), "Pause Game");
    assert_eq!(state_label(PlayState::Paused), "Continue Game");
    assert_eq!(state_label(PlayState::GameOver(Outcome::Won)), "Play Again");
    assert_eq!(state_label(PlayState::GameOver(Outcome::Lost)), "Play Again");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn page_constants_are_sane() {
    use constants::*;
    assert!(INVADER_SVG_PATH.starts_with('M'));
    assert!(INVADER_PATH_WIDTH > 0.0);
    assert!(CELL_SIZE_PX > 0);
    assert!(LASER_WIDTH > 0.0 && PLAYER_MARKER_RADIUS > 0.0);
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
    assert_ne!(CELL_COLOR_ALIVE, CELL_COLOR_DEAD);
}
