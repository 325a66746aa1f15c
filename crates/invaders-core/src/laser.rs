use std::time::Duration;

/// Cell a sustained laser is travelling towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub row: usize,
    pub column: usize,
}

/// Hold-to-fire timer.
///
/// A hit registers once the same target has been held for
/// `(rows - row) * travel_per_row`: rows nearer the player resolve faster.
/// The timer is re-evaluated every tick from wall-clock time and restarts
/// whenever the target changes.
#[derive(Clone, Debug)]
pub struct Laser {
    rows: usize,
    travel_per_row: Duration,
    firing: bool,
    locked: Option<(Target, Duration)>,
}

impl Laser {
    pub fn new(rows: usize, travel_per_row: Duration) -> Self {
        Self {
            rows,
            travel_per_row,
            firing: false,
            locked: None,
        }
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn fire(&mut self) {
        self.firing = true;
    }

    pub fn release(&mut self) {
        self.firing = false;
        self.locked = None;
    }

    /// Time the laser must be sustained to reach `row`.
    pub fn travel_time(&self, row: usize) -> Duration {
        let depth = self.rows.saturating_sub(row).max(1) as u32;
        self.travel_per_row * depth
    }

    /// Elapsed fraction of the current lock, for rendering the beam.
    pub fn progress(&self, now: Duration) -> Option<(Target, f32)> {
        let (target, since) = self.locked?;
        let need = self.travel_time(target.row).as_secs_f32();
        let held = now.saturating_sub(since).as_secs_f32();
        Some((target, (held / need.max(f32::EPSILON)).min(1.0)))
    }

    /// Advance the timer; returns the target once it has been held long enough.
    pub fn update(&mut self, now: Duration, target: Option<Target>) -> Option<Target> {
        if !self.firing {
            return None;
        }
        let Some(target) = target else {
            self.locked = None;
            return None;
        };
        let since = match self.locked {
            Some((locked, since)) if locked == target => since,
            _ => {
                self.locked = Some((target, now));
                now
            }
        };
        if now.saturating_sub(since) >= self.travel_time(target.row) {
            // keep firing; the next target starts a fresh timer
            self.locked = None;
            return Some(target);
        }
        None
    }
}
