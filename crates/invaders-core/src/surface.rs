//! Contract with whatever draws the game.
//!
//! The core only ever asks a surface to place markers under a frame id and
//! to drop everything placed under an older id; the surface decides how an
//! invader or the player actually looks.

use crate::game::TickReport;
use crate::peaks::{PeakFrame, PlayerPeak};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum MarkerKind {
    Invader {
        row: usize,
        column: usize,
        /// `(bin index, expected Hz)` shown when the debug overlay is on.
        label: Option<(usize, u32)>,
    },
    Player {
        frequency_hz: u32,
        bin_index: usize,
        debug: bool,
    },
    Laser {
        progress: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub pos: Vec2,
    pub kind: MarkerKind,
}

/// Layer a frame id belongs to; invader and player frames count separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Invaders,
    Player,
    Laser,
}

pub trait MarkerSurface {
    fn place(&mut self, layer: Layer, frame_id: u64, marker: Marker);
    fn remove(&mut self, layer: Layer, frame_id: u64);
}

/// Push the visible parts of a tick to `surface`.
///
/// `labels` maps `(row, column)` to the expected frequency for debug labels.
pub fn present<S: MarkerSurface>(
    surface: &mut S,
    report: &TickReport,
    debug: bool,
    labels: impl Fn(usize, usize) -> u32,
) {
    if let Some(frame) = &report.invaders {
        present_invaders(surface, frame, debug, &labels);
    }
    if let Some((id, peak)) = &report.player {
        present_player(surface, *id, peak, report.player_frequency, debug);
    }
    if let Some(id) = report.laser_frame {
        surface.remove(Layer::Laser, id.saturating_sub(1));
        if let Some(beam) = report.laser {
            surface.place(
                Layer::Laser,
                id,
                Marker {
                    pos: Vec2::new(beam.x, beam.y),
                    kind: MarkerKind::Laser {
                        progress: beam.progress,
                    },
                },
            );
        }
    }
}

fn present_invaders<S: MarkerSurface>(
    surface: &mut S,
    frame: &PeakFrame,
    debug: bool,
    labels: &impl Fn(usize, usize) -> u32,
) {
    surface.remove(Layer::Invaders, frame.id.saturating_sub(1));
    for p in &frame.peaks {
        surface.place(
            Layer::Invaders,
            frame.id,
            Marker {
                pos: Vec2::new(p.pixel_x, p.pixel_y),
                kind: MarkerKind::Invader {
                    row: p.row,
                    column: p.column,
                    label: debug.then(|| (p.bin_index, labels(p.row, p.column))),
                },
            },
        );
    }
}

fn present_player<S: MarkerSurface>(
    surface: &mut S,
    id: u64,
    peak: &Option<PlayerPeak>,
    frequency_hz: u32,
    debug: bool,
) {
    surface.remove(Layer::Player, id.saturating_sub(1));
    if let Some(peak) = peak {
        surface.place(
            Layer::Player,
            id,
            Marker {
                pos: Vec2::new(peak.viewport_x, peak.pixel_y),
                kind: MarkerKind::Player {
                    frequency_hz,
                    bin_index: peak.bin_index,
                    debug,
                },
            },
        );
    }
}

/// In-memory surface keeping only live markers; used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub markers: Vec<(Layer, u64, Marker)>,
    pub removals: usize,
}

impl RecordingSurface {
    pub fn count(&self, layer: Layer) -> usize {
        self.markers.iter().filter(|(l, _, _)| *l == layer).count()
    }
}

impl MarkerSurface for RecordingSurface {
    fn place(&mut self, layer: Layer, frame_id: u64, marker: Marker) {
        self.markers.push((layer, frame_id, marker));
    }

    fn remove(&mut self, layer: Layer, frame_id: u64) {
        let before = self.markers.len();
        self.markers
            .retain(|(l, id, _)| !(*l == layer && *id <= frame_id));
        self.removals += before - self.markers.len();
    }
}
