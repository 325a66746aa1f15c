#![cfg(target_arch = "wasm32")]
use anyhow::anyhow;
use instant::Instant;
use invaders_core::{Game, GameConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod events;
mod frame;
mod markup;
mod overlay;
mod render;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fft-invaders starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let config = GameConfig::default();
    let game = Game::new(config.clone())?;
    let invaders = audio::AnalyserSampler::new(&config.analysis, "invaders")?;
    let player = audio::AnalyserSampler::new(&config.analysis, "player")?;
    let surface = render::SvgSurface::new(
        document.clone(),
        config.layout.invader_width,
        config.layout.player_y,
    )?;
    log::info!(
        "[init] {}x{} board, {} Hz .. {} Hz",
        config.rows,
        config.columns,
        config.min_frequency(),
        config.max_frequency()
    );

    overlay::refresh(&document, game.board());
    overlay::set_visible(&document, game.debug());
    ui::update_state_button(&document, game.state());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        game,
        invaders,
        player,
        surface,
        document: document.clone(),
        started: Instant::now(),
    }));
    let frame_loop = frame::FrameLoop::new(frame_ctx.clone());

    let ctx_grid = frame_ctx.clone();
    overlay::wire_clicks(&document, move |row, column| {
        ctx_grid.borrow_mut().simulate_hit(row, column);
    });
    events::wire_keyboard(&document, frame_ctx.clone(), frame_loop.clone());
    events::wire_state_button(&document, frame_ctx, frame_loop);
    Ok(())
}
