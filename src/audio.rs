use crate::constants::MASTER_GAIN;
use anyhow::anyhow;
use invaders_core::{AnalysisConfig, MagnitudeSnapshot, SpectrumSampler, Tone};
use web_sys as web;

// Create a GainNode with an initial value; logs on failure
fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Option<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Some(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            None
        }
    }
}

/// One audio context per role: tones -> master gain -> analyser -> speakers.
pub struct AnalyserSampler {
    label: &'static str,
    audio_ctx: web::AudioContext,
    master_gain: web::GainNode,
    analyser: web::AnalyserNode,
}

impl AnalyserSampler {
    pub fn new(analysis: &AnalysisConfig, label: &'static str) -> anyhow::Result<Self> {
        let opts = web::AudioContextOptions::new();
        opts.set_sample_rate(analysis.sample_rate);
        let audio_ctx = web::AudioContext::new_with_context_options(&opts)
            .map_err(|e| anyhow!("{} AudioContext error: {:?}", label, e))?;
        let analyser = web::AnalyserNode::new(&audio_ctx)
            .map_err(|e| anyhow!("{} AnalyserNode error: {:?}", label, e))?;
        analyser.set_fft_size(analysis.fft_size as u32);
        analyser.set_min_decibels(analysis.min_decibels as f64);
        analyser.set_max_decibels(analysis.max_decibels as f64);
        analyser.set_smoothing_time_constant(analysis.smoothing as f64);
        let master_gain = create_gain(&audio_ctx, MASTER_GAIN, label)
            .ok_or_else(|| anyhow!("{} master gain unavailable", label))?;
        _ = master_gain.connect_with_audio_node(&analyser);
        _ = analyser.connect_with_audio_node(&audio_ctx.destination());
        log::info!(
            "[audio] {} analyser: {} bins at {} Hz",
            label,
            analyser.frequency_bin_count(),
            audio_ctx.sample_rate()
        );
        Ok(Self {
            label,
            audio_ctx,
            master_gain,
            analyser,
        })
    }

    pub fn resume(&self) {
        _ = self.audio_ctx.resume();
    }

    pub fn suspend(&self) {
        _ = self.audio_ctx.suspend();
    }
}

impl SpectrumSampler for AnalyserSampler {
    fn emit(&mut self, tones: &[Tone]) {
        let now = self.audio_ctx.current_time();
        for tone in tones {
            let Ok(src) = web::OscillatorNode::new(&self.audio_ctx) else {
                log::error!("{} OscillatorNode unavailable", self.label);
                continue;
            };
            src.set_type(web::OscillatorType::Sine);
            src.frequency().set_value(tone.frequency_hz);
            let Some(g) = create_gain(&self.audio_ctx, tone.gain, self.label) else {
                continue;
            };
            _ = src.connect_with_audio_node(&g);
            _ = g.connect_with_audio_node(&self.master_gain);
            let t0 = now + tone.offset_sec;
            _ = src.start_with_when(t0);
            _ = src.stop_with_when(t0 + tone.duration_sec);
        }
    }

    fn sample(&mut self, out: &mut MagnitudeSnapshot) {
        let bins = out.bins_mut();
        bins.resize(self.analyser.frequency_bin_count() as usize, 0);
        self.analyser.get_byte_frequency_data(bins.as_mut_slice());
    }
}
