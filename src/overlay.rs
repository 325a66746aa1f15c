//! Debug controller grid: one cell per invader, click to simulate a hit.

use crate::constants::*;
use crate::markup;
use invaders_core::Board;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn cell_style(row: usize, column: usize, alive: bool) -> String {
    format!(
        "grid-row:{};grid-column:{};width:{}px;height:{}px;box-sizing:border-box;background-color:{};cursor:{}",
        row + 1,
        column + 1,
        CELL_SIZE_PX,
        CELL_SIZE_PX,
        if alive { CELL_COLOR_ALIVE } else { CELL_COLOR_DEAD },
        if alive { "pointer" } else { "default" }
    )
}

/// Rebuild the grid cells from the board.
pub fn refresh(document: &web::Document, board: &Board) {
    let Some(container) = document.get_element_by_id(CONTROLLER_GRID_ID) else {
        return;
    };
    container.set_inner_html("");
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let Ok(cell) = document.create_element("div") else {
                continue;
            };
            _ = cell.set_attribute("id", &markup::cell_id(row, column));
            _ = cell.set_attribute("style", &cell_style(row, column, board.is_alive(row, column)));
            _ = container.append_child(&cell);
        }
    }
}

pub fn set_visible(document: &web::Document, visible: bool) {
    if let Some(el) = document.get_element_by_id(CONTROLLER_GRID_ID) {
        let visibility = if visible { "visible" } else { "hidden" };
        _ = el.set_attribute("style", &format!("display:grid;visibility:{}", visibility));
    }
}

/// Forward clicks on grid cells as `(row, column)`.
pub fn wire_clicks(document: &web::Document, mut on_cell: impl FnMut(usize, usize) + 'static) {
    let Some(container) = document.get_element_by_id(CONTROLLER_GRID_ID) else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let cell = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| markup::parse_cell_id(&el.id()));
        if let Some((row, column)) = cell {
            on_cell(row, column);
        }
    }) as Box<dyn FnMut(_)>);
    _ = container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
