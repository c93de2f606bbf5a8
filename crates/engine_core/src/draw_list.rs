// crates/engine_core/src/draw_list.rs
//! Owned copies of the draw commands a plugin submits during one update.

use engine_shared::{Color, DrawCommand, DrawKind, ImageHandle, Rect, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Color,
        clip: Option<Rect>,
    },
    Image {
        rect: Rect,
        uv: Rect,
        image: ImageHandle,
        color: Color,
        clip: Option<Rect>,
    },
    Text {
        rect: Rect,
        text: String,
        font_size: f32,
        align: TextAlign,
        color: Color,
        clip: Option<Rect>,
    },
}

impl DrawOp {
    /// Copies everything out of `cmd`, including the borrowed text.
    ///
    /// # Safety
    /// For text commands `text_ptr`/`text_len` must describe live memory.
    pub unsafe fn from_command(cmd: &DrawCommand) -> Option<Self> {
        let clip = cmd.clip_rect();
        let op = match cmd.kind {
            DrawKind::FillRect => DrawOp::Fill {
                rect: cmd.rect,
                color: cmd.color,
                clip,
            },
            DrawKind::TexturedRect => DrawOp::Image {
                rect: cmd.rect,
                uv: cmd.uv,
                image: cmd.image,
                color: cmd.color,
                clip,
            },
            DrawKind::Text => DrawOp::Text {
                rect: cmd.rect,
                text: unsafe { cmd.text_str() }?.to_owned(),
                font_size: cmd.font_size,
                align: cmd.align,
                color: cmd.color,
                clip,
            },
        };
        Some(op)
    }

    pub fn clip(&self) -> Option<Rect> {
        match self {
            DrawOp::Fill { clip, .. } | DrawOp::Image { clip, .. } | DrawOp::Text { clip, .. } => *clip,
        }
    }
}

#[derive(Debug, Default)]
pub struct DrawList {
    ops: Vec<DrawOp>,
    /// Ops painted last frame, for the inspector.
    last_len: usize,
}

impl DrawList {
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn last_len(&self) -> usize {
        self.last_len
    }

    /// Hands out this frame's ops in submission order and empties the list.
    pub fn take(&mut self) -> Vec<DrawOp> {
        self.last_len = self.ops.len();
        std::mem::take(&mut self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_copied_out_of_the_command() {
        let rect = Rect::new(1.0, 2.0, 30.0, 10.0);
        let op = {
            let text = String::from("10000");
            let cmd = DrawCommand::text(rect, &text, 12.0, TextAlign::Right, Color::BLACK, None);
            unsafe { DrawOp::from_command(&cmd) }
        };
        assert_eq!(
            op,
            Some(DrawOp::Text {
                rect,
                text: "10000".to_string(),
                font_size: 12.0,
                align: TextAlign::Right,
                color: Color::BLACK,
                clip: None,
            })
        );
    }

    #[test]
    fn clip_survives_the_copy() {
        let clip = Rect::new(0.0, 0.0, 5.0, 5.0);
        let cmd = DrawCommand::textured(Rect::UNIT, 3, Rect::UNIT, Color::WHITE, Some(clip));
        let op = unsafe { DrawOp::from_command(&cmd) }.unwrap();
        assert_eq!(op.clip(), Some(clip));

        let fill = DrawCommand::fill(Rect::UNIT, Color::WHITE, None);
        assert_eq!(unsafe { DrawOp::from_command(&fill) }.unwrap().clip(), None);
    }

    #[test]
    fn take_drains_in_order() {
        let mut list = DrawList::default();
        list.push(DrawOp::Fill { rect: Rect::UNIT, color: Color::WHITE, clip: None });
        list.push(DrawOp::Fill { rect: Rect::UNIT, color: Color::BLACK, clip: None });

        let ops = list.take();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[1], DrawOp::Fill { color: Color::BLACK, .. }));
        assert_eq!(list.last_len(), 2);
        assert!(list.take().is_empty());
    }
}
