use crate::constants::STATE_BUTTON_ID;
use crate::markup;
use invaders_core::PlayState;
use web_sys as web;

#[inline]
pub fn update_state_button(document: &web::Document, state: PlayState) {
    if let Some(el) = document.get_element_by_id(STATE_BUTTON_ID) {
        el.set_text_content(Some(markup::state_label(state)));
    }
}
