pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod formation;
pub mod game;
pub mod input;
pub mod laser;
pub mod peaks;
pub mod player;
pub mod spectrum;
pub mod surface;
pub mod synth;

pub use board::*;
pub use config::*;
pub use error::*;
pub use formation::*;
pub use game::*;
pub use input::*;
pub use laser::*;
pub use peaks::*;
pub use player::*;
pub use spectrum::*;
pub use surface::*;
pub use synth::*;
