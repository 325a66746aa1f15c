use crate::config::MotionConfig;
use crate::peaks::PeakFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Offsets applied to the whole invader grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub x_offset: f32,
    pub y_offset: f32,
    pub direction: Direction,
    motion: MotionConfig,
}

impl Formation {
    pub fn new(motion: MotionConfig) -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            direction: Direction::Right,
            motion,
        }
    }

    /// Allowed `x_offset` range for invaders spanning `base` at offset 0.
    ///
    /// A formation wider than the bounds window gets a fixed sweep centred on
    /// its starting position instead.
    pub fn travel_range(&self, base: (f32, f32)) -> (f32, f32) {
        let lo = self.motion.left_bound - base.0;
        let hi = self.motion.right_bound - base.1;
        if lo <= hi {
            (lo, hi)
        } else {
            let half = self.motion.overflow_sweep_px / 2.0;
            (-half, half)
        }
    }

    /// Shift sideways by `(dead + 1) * step`, then turn around once the
    /// offset passes the bound ahead of the formation.
    pub fn step(&mut self, dead_count: usize, last_frame: &PeakFrame, invader_width: f32) {
        let increment = (dead_count + 1) as f32 * self.motion.invader_x_step;
        match self.direction {
            Direction::Right => self.x_offset += increment,
            Direction::Left => self.x_offset -= increment,
        }
        let Some(base) = last_frame.base_extent(invader_width) else {
            return;
        };
        let (lo, hi) = self.travel_range(base);
        let next = match self.direction {
            Direction::Right if self.x_offset >= hi => Direction::Left,
            Direction::Left if self.x_offset <= lo => Direction::Right,
            keep => keep,
        };
        if next != self.direction {
            log::debug!(
                "formation reversed to {:?} at x_offset={:.2} (travel {:.1}..{:.1})",
                next,
                self.x_offset,
                lo,
                hi
            );
            self.direction = next;
        }
    }

    /// Creep downwards; called once per changed invader snapshot.
    #[inline]
    pub fn descend(&mut self) {
        self.y_offset += self.motion.invader_y_step;
    }

    pub fn reset(&mut self) {
        self.x_offset = 0.0;
        self.y_offset = 0.0;
        self.direction = Direction::Right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peaks::DetectedPeak;

    fn frame_at(xs: &[f32]) -> PeakFrame {
        PeakFrame {
            id: 1,
            peaks: xs
                .iter()
                .enumerate()
                .map(|(column, &pixel_x)| DetectedPeak {
                    row: 0,
                    column,
                    bin_index: 50 + column,
                    magnitude: 255,
                    pixel_x,
                    pixel_y: 0.0,
                })
                .collect(),
            ..PeakFrame::default()
        }
    }

    fn motion(step: f32) -> MotionConfig {
        MotionConfig {
            invader_x_step: step,
            ..MotionConfig::default()
        }
    }

    /// Run `steps` and return the offsets seen and the step indices of every
    /// direction change.
    fn sweep(
        formation: &mut Formation,
        frame: &PeakFrame,
        steps: usize,
    ) -> (Vec<f32>, Vec<usize>) {
        let mut offsets = Vec::new();
        let mut flips = Vec::new();
        for i in 0..steps {
            let before = formation.direction;
            formation.step(0, frame, 50.0);
            offsets.push(formation.x_offset);
            if formation.direction != before {
                flips.push(i);
            }
        }
        (offsets, flips)
    }

    #[test]
    fn narrow_formation_sweeps_between_both_bounds() {
        // 300..450 inside 20..680 leaves -280..230 of travel
        let frame = frame_at(&[300.0, 400.0]);
        let mut formation = Formation::new(motion(10.0));
        assert_eq!(formation.travel_range((300.0, 450.0)), (-280.0, 230.0));

        let (offsets, flips) = sweep(&mut formation, &frame, 150);
        let max = offsets.iter().cloned().fold(f32::MIN, f32::max);
        let min = offsets.iter().cloned().fold(f32::MAX, f32::min);
        assert_eq!(max, 230.0);
        assert_eq!(min, -280.0);
        // 23 steps right, then 51 per leg
        assert_eq!(flips, vec![22, 73, 124]);
    }

    #[test]
    fn turns_right_at_left_bound() {
        let frame = frame_at(&[100.0]);
        let mut formation = Formation::new(motion(5.0));
        formation.direction = Direction::Left;
        // 100 - 80 = 20 is the left bound
        let (offsets, flips) = sweep(&mut formation, &frame, 20);
        assert_eq!(flips, vec![15]);
        assert_eq!(offsets[15], -80.0);
        assert_eq!(formation.direction, Direction::Right);
        assert!(offsets.iter().all(|&x| x >= -80.0));
    }

    #[test]
    fn reversal_only_checks_the_bound_ahead() {
        // already past the right bound while heading left: keep going left
        let frame = frame_at(&[700.0]);
        let mut formation = Formation::new(motion(1.0));
        formation.direction = Direction::Left;
        formation.step(0, &frame, 50.0);
        assert_eq!(formation.direction, Direction::Left);
    }

    #[test]
    fn wide_formation_falls_back_to_fixed_sweep() {
        // 118..950 is wider than the 20..680 window
        let frame = frame_at(&[118.0, 500.0, 900.0]);
        let mut formation = Formation::new(motion(4.0));
        let (lo, hi) = formation.travel_range((118.0, 950.0));
        assert_eq!((lo, hi), (-50.0, 50.0));

        let (offsets, flips) = sweep(&mut formation, &frame, 100);
        assert!(offsets.iter().all(|&x| (lo - 4.0..=hi + 4.0).contains(&x)));
        assert!(offsets.iter().any(|&x| x >= hi));
        assert!(offsets.iter().any(|&x| x <= lo));
        assert_eq!(flips.len(), 4);
        // 52 to -52 in steps of 4
        assert!(flips.windows(2).all(|w| w[1] - w[0] == 26));
    }

    #[test]
    fn empty_frame_never_reverses() {
        let mut formation = Formation::new(motion(1.0));
        let (_, flips) = sweep(&mut formation, &PeakFrame::default(), 1000);
        assert!(flips.is_empty());
        assert_eq!(formation.x_offset, 1000.0);
    }
}
