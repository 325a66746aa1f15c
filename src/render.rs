use crate::constants::*;
use crate::markup;
use anyhow::anyhow;
use invaders_core::{Layer, Marker, MarkerKind, MarkerSurface};
use web_sys as web;

/// Draws markers as SVG inside the `#gameBoard` element, one `<g>` per
/// layer and frame id.
pub struct SvgSurface {
    document: web::Document,
    board: web::Element,
    invader_width: f32,
    player_y: f32,
}

impl SvgSurface {
    pub fn new(document: web::Document, invader_width: f32, player_y: f32) -> anyhow::Result<Self> {
        let board = document
            .get_element_by_id(BOARD_ID)
            .ok_or_else(|| anyhow!("missing #{}", BOARD_ID))?;
        Ok(Self {
            document,
            board,
            invader_width,
            player_y,
        })
    }

    fn svg(&self, tag: &str) -> Option<web::Element> {
        match self.document.create_element_ns(Some(SVG_NS), tag) {
            Ok(el) => Some(el),
            Err(e) => {
                log::error!("create <{}> failed: {:?}", tag, e);
                None
            }
        }
    }

    /// Existing group for this frame, or a fresh one appended to the board.
    fn group(&self, layer: Layer, frame_id: u64) -> Option<web::Element> {
        let id = markup::group_id(layer, frame_id);
        if let Some(g) = self.document.get_element_by_id(&id) {
            return Some(g);
        }
        let g = self.svg("g")?;
        _ = g.set_attribute("id", &id);
        _ = self.board.append_child(&g);
        Some(g)
    }

    fn text(&self, parent: &web::Element, text: &str, x: f32, y: f32) {
        if let Some(t) = self.svg("text") {
            _ = t.set_attribute("x", &format!("{:.2}", x));
            _ = t.set_attribute("y", &format!("{:.2}", y));
            _ = t.set_attribute("fill", LABEL_COLOR);
            _ = t.set_attribute("font-size", &LABEL_FONT_SIZE.to_string());
            t.set_text_content(Some(text));
            _ = parent.append_child(&t);
        }
    }

    fn draw_invader(&self, group: &web::Element, marker: &Marker, row: usize, column: usize) {
        let (Some(inner), Some(path)) = (self.svg("g"), self.svg("path")) else {
            return;
        };
        _ = path.set_attribute("d", INVADER_SVG_PATH);
        _ = path.set_attribute("fill", INVADER_COLOR);
        _ = inner.set_attribute(
            "transform",
            &markup::invader_transform(marker.pos.x, marker.pos.y, self.invader_width),
        );
        _ = inner.set_attribute("id", &markup::invader_id(row, column));
        _ = inner.append_child(&path);
        _ = group.append_child(&inner);
    }

    fn draw_player(&self, group: &web::Element, marker: &Marker) {
        if let Some(c) = self.svg("circle") {
            _ = c.set_attribute("cx", &format!("{:.2}", marker.pos.x));
            _ = c.set_attribute("cy", &format!("{:.2}", marker.pos.y));
            _ = c.set_attribute("r", &PLAYER_MARKER_RADIUS.to_string());
            _ = c.set_attribute("fill", PLAYER_COLOR);
            _ = group.append_child(&c);
        }
    }

    fn draw_laser(&self, group: &web::Element, marker: &Marker) {
        if let Some(l) = self.svg("line") {
            let x = format!("{:.2}", marker.pos.x);
            _ = l.set_attribute("x1", &x);
            _ = l.set_attribute("x2", &x);
            _ = l.set_attribute("y1", &format!("{:.2}", self.player_y));
            _ = l.set_attribute("y2", &format!("{:.2}", marker.pos.y));
            _ = l.set_attribute("stroke", LASER_COLOR);
            _ = l.set_attribute("stroke-width", &LASER_WIDTH.to_string());
            _ = group.append_child(&l);
        }
    }
}

impl MarkerSurface for SvgSurface {
    fn place(&mut self, layer: Layer, frame_id: u64, marker: Marker) {
        let Some(group) = self.group(layer, frame_id) else {
            return;
        };
        match &marker.kind {
            MarkerKind::Invader { row, column, label } => {
                self.draw_invader(&group, &marker, *row, *column);
                if let Some((bin, hz)) = label {
                    for (i, line) in markup::invader_labels(*bin, *hz).iter().enumerate() {
                        let y = markup::label_y(marker.pos.y, i) + self.invader_width / 2.0;
                        self.text(&group, line, marker.pos.x, y);
                    }
                }
            }
            MarkerKind::Player {
                frequency_hz,
                bin_index,
                debug,
            } => {
                self.draw_player(&group, &marker);
                if *debug {
                    for (i, line) in markup::player_labels(*bin_index, *frequency_hz)
                        .iter()
                        .enumerate()
                    {
                        self.text(&group, line, marker.pos.x, markup::label_y(marker.pos.y, i));
                    }
                }
            }
            MarkerKind::Laser { .. } => self.draw_laser(&group, &marker),
        }
    }

    fn remove(&mut self, layer: Layer, frame_id: u64) {
        if let Some(g) = self
            .document
            .get_element_by_id(&markup::group_id(layer, frame_id))
        {
            g.remove();
        }
    }
}
