/// DOM ids, SVG styling and audio routing constants for the web front-end.
///
/// Gameplay tuning lives in the core crate; these only decide how the game is
/// wired into the page.
// Element ids expected in index.html
pub const BOARD_ID: &str = "gameBoard";
pub const STATE_BUTTON_ID: &str = "stateButton";
pub const CONTROLLER_GRID_ID: &str = "controller-grid";

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

// Invader glyph, authored on a 512 unit wide canvas
pub const INVADER_SVG_PATH: &str = "M469.344,266.664v-85.328h-42.656v-42.672H384v-21.328h42.688v-64h-64v42.656H320v42.672H192V95.992h-42.656V53.336h-64v64H128v21.328H85.344v42.672H42.688v85.328H0v149.328h64v-85.328h21.344v85.328H128v42.672h106.688v-64h-85.344v-21.328h213.344v21.328h-85.344v64H384v-42.672h42.688v-85.328H448v85.328h64V266.664H469.344z M192,245.336h-64v-64h64V245.336z M384,245.336h-64v-64h64V245.336z";
pub const INVADER_PATH_WIDTH: f32 = 512.0;
pub const INVADER_COLOR: &str = "white";

// Debug labels
pub const LABEL_COLOR: &str = "white";
pub const LABEL_FONT_SIZE: u32 = 16;
pub const LABEL_LINE_HEIGHT: f32 = 15.0;

// Player and laser
pub const PLAYER_COLOR: &str = "white";
pub const PLAYER_MARKER_RADIUS: f32 = 6.0;
pub const LASER_COLOR: &str = "red";
pub const LASER_WIDTH: f32 = 2.0;

// Debug controller grid
pub const CELL_SIZE_PX: u32 = 40;
pub const CELL_COLOR_ALIVE: &str = "green";
pub const CELL_COLOR_DEAD: &str = "white";

// Gain between the tone oscillators and the analyser
pub const MASTER_GAIN: f32 = 1.0;
