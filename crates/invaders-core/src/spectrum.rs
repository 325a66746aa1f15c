use fnv::FnvHasher;
use std::hash::Hasher;

/// One tone handed to the emission subsystem.
///
/// `offset_sec` is relative to the sampler's own clock at the moment
/// [`SpectrumSampler::emit`] is called.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub gain: f32,
    pub offset_sec: f64,
    pub duration_sec: f64,
}

/// Byte magnitudes per frequency bin, as produced by an analyser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MagnitudeSnapshot {
    bins: Vec<u8>,
}

impl MagnitudeSnapshot {
    /// Silent snapshot with `len` bins.
    pub fn new(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    pub fn from_bins(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[inline]
    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    /// Mutable access for samplers refilling the snapshot in place.
    #[inline]
    pub fn bins_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bins
    }

    pub fn max(&self) -> u8 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    pub fn min(&self) -> u8 {
        self.bins.iter().copied().min().unwrap_or(0)
    }

    /// Centre frequency of `bin` for a given analysis setup.
    #[inline]
    pub fn bin_frequency(bin: usize, sample_rate: f32, fft_size: usize) -> f32 {
        bin as f32 * sample_rate / fft_size as f32
    }

    /// Nearest bin for `frequency_hz`.
    #[inline]
    pub fn frequency_bin(frequency_hz: f32, sample_rate: f32, fft_size: usize) -> usize {
        (frequency_hz * fft_size as f32 / sample_rate).round().max(0.0) as usize
    }

    pub fn content_hash(&self) -> u64 {
        let mut h = FnvHasher::default();
        h.write_usize(self.bins.len());
        h.write(&self.bins);
        h.finish()
    }
}

/// Source of magnitude snapshots for a tone set.
///
/// Emission and sampling run on independent timelines: a sample taken right
/// after `emit` may or may not reflect the new tones yet.
pub trait SpectrumSampler {
    /// Schedule playback of `tones` now.
    fn emit(&mut self, tones: &[Tone]);
    /// Fill `out` with the current magnitudes.
    fn sample(&mut self, out: &mut MagnitudeSnapshot);
}

/// Remembers the last snapshot's content hash to skip unchanged frames.
#[derive(Clone, Debug, Default)]
pub struct SnapshotCache {
    last: Option<u64>,
}

impl SnapshotCache {
    /// Returns true when `snapshot` differs from the previous call's.
    pub fn changed(&mut self, snapshot: &MagnitudeSnapshot) -> bool {
        let hash = snapshot.content_hash();
        let changed = self.last != Some(hash);
        self.last = Some(hash);
        changed
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_frequency_is_linear() {
        let f = MagnitudeSnapshot::bin_frequency(10, 44_100.0, 1024);
        assert!((f - 430.664).abs() < 1e-2);
        assert_eq!(MagnitudeSnapshot::frequency_bin(f, 44_100.0, 1024), 10);
    }

    #[test]
    fn cache_detects_changes_only() {
        let mut cache = SnapshotCache::default();
        let a = MagnitudeSnapshot::from_bins(vec![0, 1, 2]);
        let b = MagnitudeSnapshot::from_bins(vec![0, 1, 3]);
        assert!(cache.changed(&a));
        assert!(!cache.changed(&a.clone()));
        assert!(cache.changed(&b));
        cache.reset();
        assert!(cache.changed(&b));
    }

    #[test]
    fn empty_snapshot_extremes_are_zero() {
        let s = MagnitudeSnapshot::default();
        assert!(s.is_empty());
        assert_eq!(s.max(), 0);
        assert_eq!(s.min(), 0);
    }
}
