use crate::board::Board;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::formation::Formation;
use crate::input::KeyAction;
use crate::laser::{Laser, Target};
use crate::peaks::{expected_frequencies, PeakFrame, PeakMapper, PlayerPeak};
use crate::player::Player;
use crate::spectrum::{MagnitudeSnapshot, SnapshotCache, SpectrumSampler, Tone};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
    GameOver(Outcome),
}

/// Laser beam drawn from the player up to `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beam {
    pub x: f32,
    pub y: f32,
    pub progress: f32,
}

/// What changed during one [`Game::tick`].
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub state: PlayState,
    pub emitted: bool,
    /// New invader frame, present only when the snapshot changed.
    pub invaders: Option<PeakFrame>,
    /// New player frame id and peak, present only when the snapshot changed.
    pub player: Option<(u64, Option<PlayerPeak>)>,
    pub player_frequency: u32,
    /// Laser frame id; `laser` is `None` when the previous beam should just
    /// be cleared.
    pub laser_frame: Option<u64>,
    pub laser: Option<Beam>,
    pub hit: Option<Target>,
}

/// Complete game state, advanced once per animation frame.
pub struct Game {
    config: GameConfig,
    state: PlayState,
    board: Board,
    player: Player,
    formation: Formation,
    mapper: PeakMapper,
    laser: Laser,
    frequencies: Vec<Vec<u32>>,
    invader_snapshot: MagnitudeSnapshot,
    player_snapshot: MagnitudeSnapshot,
    invader_cache: SnapshotCache,
    player_cache: SnapshotCache,
    last_frame: PeakFrame,
    last_player: Option<PlayerPeak>,
    invader_frame_id: u64,
    player_frame_id: u64,
    laser_frame_id: u64,
    laser_visible: bool,
    last_emission: Option<Duration>,
    debug: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bins = config.analysis.bin_count();
        let frequencies = config
            .brackets
            .iter()
            .map(|b| expected_frequencies(*b, config.columns))
            .collect();
        Ok(Self {
            state: PlayState::Stopped,
            board: Board::new(config.rows, config.columns),
            player: Player::new(&config),
            formation: Formation::new(config.motion.clone()),
            mapper: PeakMapper::new(&config),
            laser: Laser::new(config.rows, config.laser_travel_per_row),
            frequencies,
            invader_snapshot: MagnitudeSnapshot::new(bins),
            player_snapshot: MagnitudeSnapshot::new(bins),
            invader_cache: SnapshotCache::default(),
            player_cache: SnapshotCache::default(),
            last_frame: PeakFrame::default(),
            last_player: None,
            invader_frame_id: 0,
            player_frame_id: 0,
            laser_frame_id: 0,
            laser_visible: false,
            last_emission: None,
            debug: false,
            config,
        })
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == PlayState::Playing
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    #[inline]
    pub fn mapper(&self) -> &PeakMapper {
        &self.mapper
    }

    #[inline]
    pub fn last_frame(&self) -> &PeakFrame {
        &self.last_frame
    }

    #[inline]
    pub fn last_player(&self) -> Option<&PlayerPeak> {
        self.last_player.as_ref()
    }

    #[inline]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[inline]
    pub fn laser(&self) -> &Laser {
        &self.laser
    }

    /// Expected tone frequency of a cell, 0 when out of range.
    pub fn expected_frequency(&self, row: usize, column: usize) -> u32 {
        self.frequencies
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Start, pause, resume, or restart after a finished game.
    pub fn toggle(&mut self) -> PlayState {
        let next = match self.state {
            PlayState::Stopped => PlayState::Playing,
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
            PlayState::GameOver(_) => {
                self.restart();
                return self.state;
            }
        };
        log::info!("[game] {:?} -> {:?}", self.state, next);
        if next != PlayState::Playing {
            self.laser.release();
        }
        self.state = next;
        next
    }

    /// Fresh board and formation; frame ids keep counting so stale markers
    /// are still cleared.
    pub fn restart(&mut self) {
        self.board.reset();
        self.player.reset();
        self.formation.reset();
        self.laser.release();
        self.invader_cache.reset();
        self.player_cache.reset();
        self.last_frame = PeakFrame::default();
        self.last_player = None;
        self.last_emission = None;
        log::info!("[game] restart");
        self.state = PlayState::Playing;
    }

    pub fn set_debug(&mut self, on: bool) {
        self.debug = on;
    }

    /// Kill a cell from outside the laser path (debug grid).
    pub fn simulate_hit(&mut self, row: usize, column: usize) -> bool {
        let hit = self.board.mark_hit(row, column);
        if hit {
            log::info!("[game] simulated hit row={} column={}", row, column);
        }
        hit
    }

    pub fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveLeft => self.player.move_left(),
            KeyAction::MoveRight => self.player.move_right(),
            KeyAction::Toggle => {
                self.toggle();
            }
            KeyAction::ToggleDebug => {
                self.debug = !self.debug;
                log::info!("[game] debug={}", self.debug);
            }
            KeyAction::Fire => {
                if self.is_running() {
                    self.laser.fire();
                }
            }
        }
    }

    pub fn release_key(&mut self, action: KeyAction) {
        if action == KeyAction::Fire {
            self.laser.release();
        }
    }

    /// One tone per live cell, staggered so oscillators do not all start
    /// on the same sample.
    pub fn invader_tones(&self) -> Vec<Tone> {
        let tones = &self.config.tones;
        let mut offset = 0.0;
        self.board
            .alive_cells()
            .filter_map(|(row, column)| {
                let frequency = *self.frequencies.get(row)?.get(column)?;
                offset += tones.stagger_sec;
                Some(Tone {
                    frequency_hz: frequency as f32,
                    gain: tones.gain,
                    offset_sec: offset,
                    duration_sec: tones.duration_sec,
                })
            })
            .collect()
    }

    pub fn player_tone(&self) -> Tone {
        let tones = &self.config.tones;
        Tone {
            frequency_hz: self.player.frequency() as f32,
            gain: tones.gain * tones.player_gain_multiplier,
            offset_sec: 0.0,
            duration_sec: tones.duration_sec,
        }
    }

    /// Board x the ship is drawn at and the laser fires from: the detected
    /// player peak, or the logical position until one has been heard.
    pub fn aim_x(&self) -> f32 {
        self.last_player
            .map_or(self.player.position(), |peak| peak.viewport_x)
    }

    /// Column under the ship, resolved to its bottom-most live cell.
    pub fn laser_target(&self) -> Option<Target> {
        let column = self
            .last_frame
            .column_at(self.aim_x(), self.config.layout.invader_width)?;
        let row = self.board.lowest_alive_row(column)?;
        Some(Target { row, column })
    }

    fn invaders_reached_player(&self) -> bool {
        let layout = &self.config.layout;
        self.board.lowest_alive_row_index().is_some_and(|row| {
            self.formation.y_offset + row as f32 * layout.row_height + layout.invader_height
                > layout.player_y
        })
    }

    /// Advance one animation frame. Does nothing unless playing.
    pub fn tick<I, P>(&mut self, now: Duration, invaders: &mut I, player: &mut P) -> TickReport
    where
        I: SpectrumSampler + ?Sized,
        P: SpectrumSampler + ?Sized,
    {
        let mut report = TickReport {
            state: self.state,
            player_frequency: self.player.frequency(),
            ..TickReport::default()
        };
        if !self.is_running() {
            return report;
        }

        self.formation.step(
            self.board.dead_count(),
            &self.last_frame,
            self.config.layout.invader_width,
        );

        let due = self
            .last_emission
            .map_or(true, |t| now.saturating_sub(t) >= self.config.tones.interval);
        if due {
            self.last_emission = Some(now);
            let tones = self.invader_tones();
            invaders.emit(&tones);
            player.emit(&[self.player_tone()]);
            report.emitted = true;
            log::trace!("[game] emitted {} invader tones", tones.len());
        }

        invaders.sample(&mut self.invader_snapshot);
        if self.invader_cache.changed(&self.invader_snapshot) {
            self.formation.descend();
            self.invader_frame_id += 1;
            self.last_frame = self.mapper.map(
                &self.invader_snapshot,
                &self.board,
                self.formation.x_offset,
                self.formation.y_offset,
                self.invader_frame_id,
            );
            report.invaders = Some(self.last_frame.clone());
        }

        player.sample(&mut self.player_snapshot);
        if self.player_cache.changed(&self.player_snapshot) {
            self.player_frame_id += 1;
            self.last_player = self.mapper.locate_player(&self.player_snapshot);
            report.player = Some((self.player_frame_id, self.last_player));
        }

        self.update_laser(now, &mut report);

        if self.board.is_all_dead() {
            self.finish(Outcome::Won);
        } else if self.invaders_reached_player() {
            self.finish(Outcome::Lost);
        }
        if !self.is_running() && self.laser_visible {
            self.clear_beam(&mut report);
        }
        report.state = self.state;
        report
    }

    fn update_laser(&mut self, now: Duration, report: &mut TickReport) {
        let target = self.laser_target();
        if let Some(hit) = self.laser.update(now, target) {
            if self.board.mark_hit(hit.row, hit.column) {
                log::info!(
                    "[game] hit row={} column={} ({} left)",
                    hit.row,
                    hit.column,
                    self.board.alive_count()
                );
                report.hit = Some(hit);
            }
        }
        if self.laser.is_firing() {
            let layout = &self.config.layout;
            let x = self.aim_x();
            let beam = match self.laser.progress(now) {
                Some((t, progress)) => {
                    let top = self.formation.y_offset
                        + t.row as f32 * layout.row_height
                        + layout.invader_height;
                    Beam {
                        x,
                        y: layout.player_y - progress * (layout.player_y - top),
                        progress,
                    }
                }
                None => Beam {
                    x,
                    y: 0.0,
                    progress: 1.0,
                },
            };
            self.laser_frame_id += 1;
            self.laser_visible = true;
            report.laser_frame = Some(self.laser_frame_id);
            report.laser = Some(beam);
        } else if self.laser_visible {
            self.clear_beam(report);
        }
    }

    fn clear_beam(&mut self, report: &mut TickReport) {
        if self.clear_laser().is_some() {
            report.laser_frame = Some(self.laser_frame_id);
            report.laser = None;
        }
    }

    /// Retire a beam left on screen outside [`tick`](Self::tick), e.g. after
    /// pausing with fire held. Returns the frame id whose marker must go.
    pub fn clear_laser(&mut self) -> Option<u64> {
        if !self.laser_visible {
            return None;
        }
        let stale = self.laser_frame_id;
        self.laser_frame_id += 1;
        self.laser_visible = false;
        Some(stale)
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!(
            "[game] game over: {:?} after {} hits",
            outcome,
            self.board.dead_count()
        );
        self.laser.release();
        self.state = PlayState::GameOver(outcome);
    }
}
