//! Software spectrum sampler.
//!
//! Renders scheduled sine tones into a time-domain frame on a private clock,
//! then reproduces the byte-frequency output of a WebAudio analyser: Blackman
//! window, real FFT, `1/N` magnitude scaling, time smoothing and a linear map
//! of `[min_decibels, max_decibels]` onto `0..=255`. Used by the native
//! simulator and by tests in place of an audio device.

use crate::config::AnalysisConfig;
use crate::spectrum::{MagnitudeSnapshot, SpectrumSampler, Tone};
use microfft::{real, Complex32};
use std::f64::consts::TAU;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
struct ScheduledTone {
    frequency_hz: f64,
    gain: f32,
    start_sec: f64,
    stop_sec: f64,
}

pub struct SynthSampler {
    analysis: AnalysisConfig,
    clock_sec: f64,
    tones: Vec<ScheduledTone>,
    window: Vec<f32>,
    frame: Vec<f32>,
    smoothed: Vec<f32>,
}

impl SynthSampler {
    pub fn new(analysis: AnalysisConfig) -> Self {
        let n = analysis.fft_size;
        let window = blackman(n);
        let smoothed = vec![0.0; analysis.bin_count()];
        Self {
            analysis,
            clock_sec: 0.0,
            tones: Vec::new(),
            window,
            frame: vec![0.0; n],
            smoothed,
        }
    }

    #[inline]
    pub fn clock(&self) -> f64 {
        self.clock_sec
    }

    /// Move the clock forward to `sec`; earlier times are ignored.
    pub fn set_clock(&mut self, sec: f64) {
        if sec > self.clock_sec {
            self.clock_sec = sec;
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.clock_sec += dt.as_secs_f64();
    }

    /// Tones still scheduled (playing now or in the future).
    pub fn pending_tones(&self) -> usize {
        self.tones
            .iter()
            .filter(|t| t.stop_sec > self.clock_sec)
            .count()
    }

    fn window_start(&self) -> f64 {
        self.clock_sec - self.analysis.fft_size as f64 / self.analysis.sample_rate as f64
    }

    fn render_frame(&mut self) {
        let sr = self.analysis.sample_rate as f64;
        let t0 = self.window_start();
        self.tones.retain(|t| t.stop_sec > t0);
        self.frame.iter_mut().for_each(|s| *s = 0.0);
        for tone in &self.tones {
            for (n, s) in self.frame.iter_mut().enumerate() {
                let t = t0 + n as f64 / sr;
                if t < tone.start_sec || t >= tone.stop_sec {
                    continue;
                }
                let phase = TAU * tone.frequency_hz * (t - tone.start_sec);
                *s += tone.gain * phase.sin() as f32;
            }
        }
        for (s, w) in self.frame.iter_mut().zip(&self.window) {
            *s *= *w;
        }
    }

    fn smooth_magnitudes(&mut self) {
        let n = self.analysis.fft_size as f32;
        let tau = self.analysis.smoothing.clamp(0.0, 1.0);
        let smoothed = &mut self.smoothed;
        let mut fold = |spectrum: &[Complex32]| {
            for (k, (s, c)) in smoothed.iter_mut().zip(spectrum).enumerate() {
                // bin 0 packs the Nyquist term into `im`
                let mag = if k == 0 { c.re.abs() } else { c.norm_sqr().sqrt() } / n;
                *s = tau * *s + (1.0 - tau) * mag;
            }
        };
        let frame = self.frame.as_mut_slice();
        match frame.len() {
            512 => {
                if let Ok(buf) = <&mut [f32; 512]>::try_from(frame) {
                    fold(real::rfft_512(buf));
                }
            }
            1024 => {
                if let Ok(buf) = <&mut [f32; 1024]>::try_from(frame) {
                    fold(real::rfft_1024(buf));
                }
            }
            2048 => {
                if let Ok(buf) = <&mut [f32; 2048]>::try_from(frame) {
                    fold(real::rfft_2048(buf));
                }
            }
            4096 => {
                if let Ok(buf) = <&mut [f32; 4096]>::try_from(frame) {
                    fold(real::rfft_4096(buf));
                }
            }
            other => log::warn!("synth sampler: unsupported fft size {}", other),
        }
    }
}

impl SpectrumSampler for SynthSampler {
    fn emit(&mut self, tones: &[Tone]) {
        let now = self.clock_sec;
        self.tones.extend(tones.iter().map(|t| {
            let start_sec = now + t.offset_sec;
            ScheduledTone {
                frequency_hz: t.frequency_hz as f64,
                gain: t.gain,
                start_sec,
                stop_sec: start_sec + t.duration_sec,
            }
        }));
        log::trace!("synth: scheduled {} tones at {:.3}s", tones.len(), now);
    }

    fn sample(&mut self, out: &mut MagnitudeSnapshot) {
        self.render_frame();
        self.smooth_magnitudes();
        let min_db = self.analysis.min_decibels;
        let range_db = (self.analysis.max_decibels - min_db).max(f32::EPSILON);
        let bins = out.bins_mut();
        bins.clear();
        bins.extend(self.smoothed.iter().map(|&m| {
            if m <= 0.0 {
                return 0;
            }
            let db = 20.0 * m.log10();
            (255.0 * (db - min_db) / range_db).clamp(0.0, 255.0) as u8
        }));
    }
}

fn blackman(n: usize) -> Vec<f32> {
    let alpha = 0.16_f64;
    let a0 = 0.5 * (1.0 - alpha);
    let a1 = 0.5;
    let a2 = 0.5 * alpha;
    (0..n)
        .map(|i| {
            let x = i as f64 / n as f64;
            (a0 - a1 * (TAU * x).cos() + a2 * (2.0 * TAU * x).cos()) as f32
        })
        .collect()
}
