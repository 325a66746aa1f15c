use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use invaders_core::{
    present, Game, GameConfig, KeyAction, Layer, PlayState, RecordingSurface, SynthSampler,
};
use rand::prelude::*;

/// Plays fft-invaders headless against the software analyser.
#[derive(Parser, Debug)]
#[command(name = "invaders-native")]
#[command(about = "Headless fft-invaders simulation using synthesized spectra", long_about = None)]
struct Cli {
    /// Number of animation frames to simulate
    #[arg(short, long, default_value = "3600")]
    ticks: u32,

    /// Simulated frames per second
    #[arg(short, long, default_value = "60")]
    fps: u32,

    /// Analyser smoothing time constant (0-1)
    #[arg(short, long, default_value = "0.8")]
    smoothing: f32,

    /// Random seed for the autopilot
    #[arg(long)]
    seed: Option<u64>,

    /// Leave the player idle instead of hunting invaders
    #[arg(long)]
    idle: bool,

    /// Label invaders with their bins and frequencies
    #[arg(short, long)]
    debug: bool,

    /// Log every frame at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Chases one invader column at a time and holds fire once underneath it.
struct Autopilot {
    rng: StdRng,
    chasing: Option<(usize, usize)>,
    firing: bool,
    /// Aim when the last move key went down; the next move waits until the
    /// ship has been heard somewhere else.
    pending_aim: Option<f32>,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            chasing: None,
            firing: false,
            pending_aim: None,
        }
    }

    fn drive(&mut self, game: &mut Game) {
        let frame = game.last_frame();
        let still_there = self
            .chasing
            .is_some_and(|(r, c)| frame.peaks.iter().any(|p| p.row == r && p.column == c));
        if !still_there {
            self.chasing = frame
                .peaks
                .choose(&mut self.rng)
                .map(|p| (p.row, p.column));
        }
        let Some((row, column)) = self.chasing else {
            self.set_fire(game, false);
            return;
        };
        let Some(peak) = frame.row(row).find(|p| p.column == column).copied() else {
            return;
        };
        let half = game.config().layout.invader_width / 2.0;
        // one key press moves the drawn ship by step * scale
        let stride = game.config().motion.player_x_step * game.config().layout.player_scale_x;
        let aim = game.aim_x();
        let dx = peak.pixel_x + half - aim;
        if self.pending_aim != Some(aim) {
            self.pending_aim = None;
            let key = if dx > stride {
                Some(KeyAction::MoveRight)
            } else if dx < -stride {
                Some(KeyAction::MoveLeft)
            } else {
                None
            };
            if let Some(key) = key {
                let before = game.player().position();
                game.handle_key(key);
                if game.player().position() != before {
                    self.pending_aim = Some(aim);
                }
            }
        }
        self.set_fire(game, dx.abs() < half);
    }

    fn set_fire(&mut self, game: &mut Game, on: bool) {
        if on == self.firing {
            return;
        }
        self.firing = on;
        if on {
            game.handle_key(KeyAction::Fire);
        } else {
            game.release_key(KeyAction::Fire);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if cli.fps == 0 {
        bail!("fps must be positive");
    }
    let mut config = GameConfig::default();
    config.analysis.smoothing = cli.smoothing.clamp(0.0, 1.0);
    let mut game = Game::new(config.clone()).context("invalid game configuration")?;
    game.set_debug(cli.debug);

    let mut invaders = SynthSampler::new(config.analysis.clone());
    let mut player = SynthSampler::new(config.analysis.clone());
    let mut surface = RecordingSurface::default();
    let seed = cli.seed.unwrap_or_else(|| thread_rng().gen());
    let mut pilot = Autopilot::new(seed);
    log::info!(
        "[sim] {} ticks at {} fps, smoothing {:.2}, seed {}",
        cli.ticks,
        cli.fps,
        config.analysis.smoothing,
        seed
    );

    game.toggle();
    let mut hits = 0usize;
    let mut frames = 0usize;
    for tick in 0..cli.ticks {
        let now = Duration::from_secs_f64(tick as f64 / cli.fps as f64);
        invaders.set_clock(now.as_secs_f64());
        player.set_clock(now.as_secs_f64());
        if !cli.idle {
            pilot.drive(&mut game);
        }

        let report = game.tick(now, &mut invaders, &mut player);
        present(&mut surface, &report, game.debug(), |r, c| {
            game.expected_frequency(r, c)
        });
        if let Some(frame) = &report.invaders {
            frames += 1;
            log::debug!(
                "[sim] t={:.3}s frame {} shows {} invaders (max {})",
                now.as_secs_f64(),
                frame.id,
                frame.peaks.len(),
                frame.max_magnitude
            );
        }
        if report.hit.is_some() {
            hits += 1;
        }
        if let PlayState::GameOver(outcome) = report.state {
            log::info!(
                "[sim] {:?} at t={:.2}s after {} hits",
                outcome,
                now.as_secs_f64(),
                hits
            );
            break;
        }
    }

    log::info!(
        "[sim] state {:?}: {} of {} invaders left, {} frames, {} markers on screen, player at {:.0}px ({} Hz)",
        game.state(),
        game.board().alive_count(),
        config.rows * config.columns,
        frames,
        surface.count(Layer::Invaders),
        game.player().position(),
        game.player().frequency()
    );
    Ok(())
}
