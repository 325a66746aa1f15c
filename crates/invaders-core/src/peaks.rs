//! Spectral peak detection and board mapping.
//!
//! A magnitude snapshot is trimmed at both ends, split into one contiguous
//! bin range per board row, and scanned left to right. A bin counts as a
//! peak when its magnitude is within the detection threshold of the
//! snapshot-wide maximum and it sits far enough (in pixels) from the previous
//! peak of the same row. Peaks take column slots in ascending bin order; a
//! slot whose cell is dead is consumed but nothing is emitted for it.

use crate::board::Board;
use crate::config::{DetectionConfig, FrequencyBracket, GameConfig, LayoutConfig};
use crate::spectrum::MagnitudeSnapshot;
use smallvec::SmallVec;

/// Half-open bin range `[start, end)` scanned for one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpan {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl RowSpan {
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type RowSpans = SmallVec<[RowSpan; 8]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectedPeak {
    pub row: usize,
    pub column: usize,
    pub bin_index: usize,
    pub magnitude: u8,
    pub pixel_x: f32,
    pub pixel_y: f32,
}

/// All invaders detected from one snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeakFrame {
    pub id: u64,
    pub peaks: Vec<DetectedPeak>,
    /// Formation offset the peaks were placed with.
    pub x_offset: f32,
    pub max_magnitude: u8,
    pub min_magnitude: u8,
}

impl PeakFrame {
    pub fn row(&self, row: usize) -> impl Iterator<Item = &DetectedPeak> + '_ {
        self.peaks.iter().filter(move |p| p.row == row)
    }

    /// Horizontal extent `(left, right)` covered by the rendered invaders.
    pub fn extent(&self, invader_width: f32) -> Option<(f32, f32)> {
        let mut it = self.peaks.iter();
        let first = it.next()?;
        let init = (first.pixel_x, first.pixel_x + invader_width);
        Some(it.fold(init, |(l, r), p| {
            (l.min(p.pixel_x), r.max(p.pixel_x + invader_width))
        }))
    }

    /// [`extent`](Self::extent) with the formation offset taken back out.
    pub fn base_extent(&self, invader_width: f32) -> Option<(f32, f32)> {
        let (left, right) = self.extent(invader_width)?;
        Some((left - self.x_offset, right - self.x_offset))
    }

    /// Column of the bottom-most invader whose body covers `x`.
    pub fn column_at(&self, x: f32, invader_width: f32) -> Option<usize> {
        self.peaks
            .iter()
            .filter(|p| x >= p.pixel_x && x < p.pixel_x + invader_width)
            .max_by_key(|p| p.row)
            .map(|p| p.column)
    }
}

/// Position of the player's tone in its own snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPeak {
    pub bin_index: usize,
    pub magnitude: u8,
    pub pixel_x: f32,
    pub viewport_x: f32,
    pub pixel_y: f32,
}

#[inline]
fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Evenly spaced cell frequencies for one row, rounded to whole Hz.
pub fn expected_frequencies(bracket: FrequencyBracket, columns: usize) -> Vec<u32> {
    let gaps = columns.saturating_sub(1).max(1) as f64;
    let spacing = bracket.span() as f64 / gaps;
    (0..columns)
        .map(|i| (bracket.min as f64 + i as f64 * spacing).round() as u32)
        .collect()
}

#[derive(Clone, Debug)]
pub struct PeakMapper {
    brackets: Vec<FrequencyBracket>,
    columns: usize,
    detection: DetectionConfig,
    layout: LayoutConfig,
}

impl PeakMapper {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            brackets: config.brackets.clone(),
            columns: config.columns,
            detection: config.detection.clone(),
            layout: config.layout.clone(),
        }
    }

    /// Split a snapshot of `len` bins into one span per row, sized by each
    /// bracket's share of the total bracket span.
    pub fn row_spans(&self, len: usize) -> RowSpans {
        let trim = (len as f32 * self.detection.edge_trim_fraction).ceil() as usize;
        let usable = len.saturating_sub(trim).saturating_sub(trim);
        let total: f64 = self.brackets.iter().map(|b| b.span() as f64).sum();
        let mut start = trim;
        self.brackets
            .iter()
            .enumerate()
            .map(|(row, b)| {
                let share = if total > 0.0 {
                    b.span() as f64 / total
                } else {
                    0.0
                };
                let n = (usable as f64 * share + 1e-9).floor() as usize;
                let span = RowSpan {
                    row,
                    start,
                    end: start + n,
                };
                start += n;
                span
            })
            .collect()
    }

    /// Pixel distance between consecutive bins of a row.
    #[inline]
    pub fn step_width(&self, span: &RowSpan) -> f32 {
        round2(self.layout.pixel_width / span.len().max(1) as f32)
    }

    pub fn map(
        &self,
        snapshot: &MagnitudeSnapshot,
        board: &Board,
        x_offset: f32,
        y_offset: f32,
        frame_id: u64,
    ) -> PeakFrame {
        let max = snapshot.max();
        let mut frame = PeakFrame {
            id: frame_id,
            peaks: Vec::new(),
            x_offset,
            max_magnitude: max,
            min_magnitude: snapshot.min(),
        };
        if snapshot.is_empty() || max < self.detection.min_peak_magnitude {
            return frame;
        }
        let bins = snapshot.bins();
        for span in self.row_spans(snapshot.len()) {
            if span.is_empty() {
                continue;
            }
            let step = self.step_width(&span);
            let row_y = y_offset + span.row as f32 * self.layout.row_height;
            let mut x = self.layout.row_start_x + x_offset;
            let mut last_x: Option<f32> = None;
            let mut column = 0;
            for bin in span.start..span.end {
                if column >= self.columns {
                    break;
                }
                x += step;
                let magnitude = bins[bin];
                if max.abs_diff(magnitude) >= self.detection.magnitude_threshold {
                    continue;
                }
                if matches!(last_x, Some(last) if (x - last).abs() <= self.detection.min_spacing_px)
                {
                    continue;
                }
                last_x = Some(x);
                if board.is_alive(span.row, column) {
                    frame.peaks.push(DetectedPeak {
                        row: span.row,
                        column,
                        bin_index: bin,
                        magnitude,
                        pixel_x: round2(x),
                        pixel_y: row_y,
                    });
                }
                column += 1;
            }
        }
        frame
    }

    /// Lowest bin holding the snapshot maximum, in board and viewport space.
    pub fn locate_player(&self, snapshot: &MagnitudeSnapshot) -> Option<PlayerPeak> {
        let max = snapshot.max();
        if snapshot.is_empty() || max < self.detection.min_peak_magnitude {
            return None;
        }
        let bin_index = snapshot.bins().iter().position(|&m| m == max)?;
        let step = round2(self.layout.pixel_width / snapshot.len() as f32);
        let pixel_x = round2((bin_index + 1) as f32 * step);
        Some(PlayerPeak {
            bin_index,
            magnitude: max,
            pixel_x,
            viewport_x: self.layout.player_translate_x + self.layout.player_scale_x * pixel_x,
            pixel_y: self.layout.player_y - max as f32 / 2.0,
        })
    }
}
