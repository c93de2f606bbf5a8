// crates/engine_core/src/painter.rs
//! Paints plugin draw ops on egui's background layer, underneath any engine windows.

use egui::{Align2, Color32, FontId, LayerId, Painter, Pos2};
use engine_shared::{Color, Rect, TextAlign};

use crate::assets::AssetStore;
use crate::draw_list::DrawOp;

pub fn to_egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(r.x, r.y), egui::vec2(r.w, r.h))
}

pub fn from_egui_rect(r: egui::Rect) -> Rect {
    Rect::new(r.min.x, r.min.y, r.width(), r.height())
}

pub fn to_color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Anchor point and egui alignment for text placed in `rect`. Text is
/// vertically centred; `align` picks the horizontal edge.
fn text_anchor(rect: egui::Rect, align: TextAlign) -> (Pos2, Align2) {
    match align {
        TextAlign::Left => (rect.left_center(), Align2::LEFT_CENTER),
        TextAlign::Center => (rect.center(), Align2::CENTER_CENTER),
        TextAlign::Right => (rect.right_center(), Align2::RIGHT_CENTER),
    }
}

pub fn paint(ctx: &egui::Context, assets: &mut AssetStore, ops: Vec<DrawOp>) {
    let base = ctx.layer_painter(LayerId::background());

    for op in ops {
        let painter = match op.clip() {
            Some(clip) => base.with_clip_rect(to_egui_rect(clip)),
            None => base.clone(),
        };
        paint_op(ctx, &painter, assets, op);
    }
}

fn paint_op(ctx: &egui::Context, painter: &Painter, assets: &mut AssetStore, op: DrawOp) {
    match op {
        DrawOp::Fill { rect, color, .. } => {
            painter.rect_filled(to_egui_rect(rect), 0.0, to_color32(color));
        }
        DrawOp::Image { rect, uv, image, color, .. } => {
            let texture = assets.texture(ctx, image);
            painter.image(texture, to_egui_rect(rect), to_egui_rect(uv), to_color32(color));
        }
        DrawOp::Text { rect, text, font_size, align, color, .. } => {
            let (pos, anchor) = text_anchor(to_egui_rect(rect), align);
            painter.text(pos, anchor, text, FontId::proportional(font_size), to_color32(color));
        }
    }
}
