// crates/engine_core/src/input/mod.rs
pub mod map;

pub use map::{EngineAction, InputMap};

use engine_shared::FrameInput;
use glam::Vec2;

use crate::painter::from_egui_rect;

/// Builds the plugin's `FrameInput` from egui's input state.
#[derive(Default)]
pub struct InputSampler {
    last_pointer: Vec2,
}

impl InputSampler {
    pub fn sample(&mut self, ctx: &egui::Context, dt: f32) -> FrameInput {
        // A press over an engine window (inspector, error overlay) is not for the game.
        let over_engine_ui = ctx.is_pointer_over_area();

        ctx.input(|i| {
            if let Some(pos) = i.pointer.latest_pos() {
                self.last_pointer = Vec2::new(pos.x, pos.y);
            }
            FrameInput {
                viewport: from_egui_rect(i.screen_rect()),
                dt,
                pointer: self.last_pointer,
                primary_pressed: i.pointer.primary_pressed() && !over_engine_ui,
            }
        })
    }
}
