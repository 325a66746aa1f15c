use crate::constants::STATE_BUTTON_ID;
use crate::frame::{FrameContext, FrameLoop};
use invaders_core::KeyAction;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen(target: &web::EventTarget, event: &str, mut handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("{} listener error: {:?}", event, e);
    }
    closure.forget();
}

fn key_action(ev: &web::Event) -> Option<(KeyAction, &web::KeyboardEvent)> {
    let ev = ev.dyn_ref::<web::KeyboardEvent>()?;
    Some((KeyAction::from_key(&ev.key())?, ev))
}

/// Keyboard controls: arrows or h/l move, Enter toggles, d debug, space fires.
pub fn wire_keyboard(
    document: &web::Document,
    frame_ctx: Rc<RefCell<FrameContext>>,
    frame_loop: FrameLoop,
) {
    let ctx_down = frame_ctx.clone();
    listen(document, "keydown", move |ev| {
        let Some((action, key)) = key_action(&ev) else {
            return;
        };
        if action == KeyAction::Fire {
            // keep the page from scrolling while the laser is held
            ev.prevent_default();
            if key.repeat() {
                return;
            }
        }
        if ctx_down.borrow_mut().apply(action) {
            frame_loop.request();
        }
    });
    listen(document, "keyup", move |ev| {
        if let Some((action, _)) = key_action(&ev) {
            frame_ctx.borrow_mut().release(action);
        }
    });
}

/// The state button mirrors Enter.
pub fn wire_state_button(
    document: &web::Document,
    frame_ctx: Rc<RefCell<FrameContext>>,
    frame_loop: FrameLoop,
) {
    let Some(button) = document.get_element_by_id(STATE_BUTTON_ID) else {
        log::warn!("missing #{}; start with Enter instead", STATE_BUTTON_ID);
        return;
    };
    listen(&button, "click", move |_| {
        if frame_ctx.borrow_mut().apply(KeyAction::Toggle) {
            frame_loop.request();
        }
    });
}
