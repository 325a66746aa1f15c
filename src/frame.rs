use crate::audio::AnalyserSampler;
use crate::overlay;
use crate::render::SvgSurface;
use crate::ui;
use instant::Instant;
use invaders_core::{present, Game, KeyAction, Layer, MarkerSurface, PlayState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything a frame needs: the game plus its audio and drawing backends.
pub struct FrameContext {
    pub game: Game,
    pub invaders: AnalyserSampler,
    pub player: AnalyserSampler,
    pub surface: SvgSurface,
    pub document: web::Document,
    pub started: Instant,
}

impl FrameContext {
    /// Run one tick; returns whether another frame should be requested.
    pub fn frame(&mut self) -> bool {
        let now = self.started.elapsed();
        let before = self.game.state();
        let report = self.game.tick(now, &mut self.invaders, &mut self.player);
        let game = &self.game;
        present(&mut self.surface, &report, game.debug(), |r, c| {
            game.expected_frequency(r, c)
        });
        if report.hit.is_some() {
            overlay::refresh(&self.document, self.game.board());
        }
        if report.state != before {
            self.on_state(report.state);
        }
        self.game.is_running()
    }

    /// Apply a key or button action; returns true when the loop must run.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Toggle => self.toggle(),
            KeyAction::ToggleDebug => {
                self.game.handle_key(action);
                overlay::set_visible(&self.document, self.game.debug());
            }
            _ => self.game.handle_key(action),
        }
        self.game.is_running()
    }

    pub fn release(&mut self, action: KeyAction) {
        self.game.release_key(action);
    }

    pub fn toggle(&mut self) {
        let before = self.game.state();
        let state = self.game.toggle();
        if matches!(before, PlayState::GameOver(_)) {
            overlay::refresh(&self.document, self.game.board());
        }
        self.on_state(state);
    }

    pub fn simulate_hit(&mut self, row: usize, column: usize) {
        if self.game.simulate_hit(row, column) {
            overlay::refresh(&self.document, self.game.board());
        }
    }

    fn on_state(&mut self, state: PlayState) {
        ui::update_state_button(&self.document, state);
        if state == PlayState::Playing {
            self.invaders.resume();
            self.player.resume();
        } else {
            self.invaders.suspend();
            self.player.suspend();
            // no more frames until resumed; drop a beam still on screen
            if let Some(stale) = self.game.clear_laser() {
                self.surface.remove(Layer::Laser, stale);
            }
        }
        if let PlayState::GameOver(outcome) = state {
            log::info!("[frame] game over: {:?}", outcome);
        }
    }
}

/// requestAnimationFrame chain that stops itself once the game leaves
/// `Playing` and can be restarted with [`FrameLoop::request`].
#[derive(Clone)]
pub struct FrameLoop {
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    active: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn new(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let active = Rc::new(Cell::new(false));
        let cb_clone = callback.clone();
        let active_clone = active.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let keep_going = frame_ctx.borrow_mut().frame();
            if !keep_going {
                active_clone.set(false);
                return;
            }
            request_frame(&cb_clone);
        }) as Box<dyn FnMut()>));
        Self { callback, active }
    }

    /// Start the chain unless a frame is already pending.
    pub fn request(&self) {
        if self.active.replace(true) {
            return;
        }
        request_frame(&self.callback);
    }
}

fn request_frame(callback: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = callback.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
