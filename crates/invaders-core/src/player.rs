use crate::config::GameConfig;

/// Horizontal player position and the tone frequency it maps to.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position_px: f32,
    step_px: f32,
    width_px: f32,
    min_hz: f32,
    max_hz: f32,
}

impl Player {
    /// Player centred on the board.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position_px: config.layout.pixel_width / 2.0,
            step_px: config.motion.player_x_step,
            width_px: config.layout.pixel_width,
            min_hz: config.min_frequency(),
            max_hz: config.max_frequency(),
        }
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position_px
    }

    pub fn move_left(&mut self) {
        if self.position_px <= 0.0 {
            return;
        }
        self.position_px = (self.position_px - self.step_px).max(0.0);
    }

    pub fn move_right(&mut self) {
        if self.position_px >= self.width_px {
            return;
        }
        self.position_px = (self.position_px + self.step_px).min(self.width_px);
    }

    /// Frequency across the whole board range proportional to position.
    pub fn frequency(&self) -> u32 {
        let across = self.position_px / self.width_px;
        (self.min_hz + across * (self.max_hz - self.min_hz)).round() as u32
    }

    pub fn reset(&mut self) {
        self.position_px = self.width_px / 2.0;
    }
}
