// crates/dino_plugin/src/ui.rs
//! Immediate-mode widgets for one frame.
//!
//! Buttons get sequential ids in draw order. Hover is decided at the end of a
//! frame (the last button under the pointer wins, i.e. the one drawn on top)
//! and a click only counts for the button that was hovered on the previous
//! frame. That keeps a click from reaching a button that was covered up.

use engine_shared::{Color, FrameInput, ImageHandle, Rect};

use crate::canvas::{Canvas, Style};

/// Alpha for anything the player cannot interact with right now.
pub const DISABLED_ALPHA: u8 = 64;

/// Widget state carried between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiMemory {
    hover: Option<u64>,
}

pub struct Ui<'a> {
    canvas: &'a mut dyn Canvas,
    input: &'a FrameInput,
    memory: &'a mut UiMemory,
    next_id: u64,
    next_hover: Option<u64>,
}

impl<'a> Ui<'a> {
    pub fn begin(canvas: &'a mut dyn Canvas, input: &'a FrameInput, memory: &'a mut UiMemory) -> Self {
        Self {
            canvas,
            input,
            memory,
            next_id: 0,
            next_hover: None,
        }
    }

    pub fn input(&self) -> &FrameInput {
        self.input
    }

    pub fn canvas(&mut self) -> &mut (dyn Canvas + 'a) {
        &mut *self.canvas
    }

    /// Draws `image` stretched over `rect`.
    pub fn image(&mut self, rect: Rect, image: ImageHandle, style: Style) {
        self.canvas.textured_rect(rect, image, Rect::UNIT, style);
    }

    /// Image button. Returns true on the frame it is clicked.
    pub fn button(&mut self, rect: Rect, image: ImageHandle) -> bool {
        let id = self.make_id();
        self.image(rect, image, Style::default());

        if rect.contains(self.input.pointer) {
            self.next_hover = Some(id);
        }

        self.memory.hover == Some(id) && self.input.primary_pressed
    }

    /// Faded, never clickable. Still takes an id so the ids after it stay stable.
    pub fn disabled_button(&mut self, rect: Rect, image: ImageHandle) {
        self.make_id();
        self.image(rect, image, Style::tint(Color::WHITE.with_alpha(DISABLED_ALPHA)));
    }

    /// Commits this frame's hover for the next frame.
    pub fn finish(self) {
        self.memory.hover = self.next_hover;
    }

    fn make_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCanvas;
    use glam::Vec2;

    fn input(pointer: Vec2, pressed: bool) -> FrameInput {
        FrameInput {
            viewport: Rect::new(0.0, 0.0, 100.0, 100.0),
            pointer,
            primary_pressed: pressed,
            ..Default::default()
        }
    }

    fn frame(memory: &mut UiMemory, input: &FrameInput, rects: &[Rect]) -> Vec<bool> {
        let mut canvas = RecordingCanvas::default();
        let mut ui = Ui::begin(&mut canvas, input, memory);
        let clicks = rects.iter().map(|r| ui.button(*r, 1)).collect();
        ui.finish();
        clicks
    }

    #[test]
    fn click_needs_hover_from_the_previous_frame() {
        let mut memory = UiMemory::default();
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);

        // Pointer arrives and presses in the same frame: not a click yet.
        assert_eq!(frame(&mut memory, &input(Vec2::new(15.0, 15.0), true), &[r]), vec![false]);
        assert_eq!(frame(&mut memory, &input(Vec2::new(15.0, 15.0), true), &[r]), vec![true]);
        assert_eq!(frame(&mut memory, &input(Vec2::new(15.0, 15.0), false), &[r]), vec![false]);
    }

    #[test]
    fn topmost_button_wins() {
        let mut memory = UiMemory::default();
        let under = Rect::new(0.0, 0.0, 50.0, 50.0);
        let over = Rect::new(10.0, 10.0, 10.0, 10.0);
        let at = input(Vec2::new(12.0, 12.0), true);

        frame(&mut memory, &at, &[under, over]);
        assert_eq!(frame(&mut memory, &at, &[under, over]), vec![false, true]);
    }
}
