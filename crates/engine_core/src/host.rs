// crates/engine_core/src/host.rs
//! Host side of `HostInterface`. The plugin sees `HostState` only as an opaque
//! `HostContext` pointer passed back into these functions.

use egui::{Color32, FontId};
use engine_shared::{
    DrawCommand, HostContext, HostInterface, ImageHandle, LogLevel, IMAGE_NOT_FOUND,
};
use tracing::{debug, error, info, trace, warn};

use crate::assets::AssetStore;
use crate::draw_list::{DrawList, DrawOp};
use crate::error::AssetError;

/// Everything the plugin can reach during a call.
pub struct HostState {
    pub assets: AssetStore,
    pub draw_list: DrawList,
    egui: egui::Context,
}

impl HostState {
    pub fn new(assets: AssetStore, egui: egui::Context) -> Self {
        Self {
            assets,
            draw_list: DrawList::default(),
            egui,
        }
    }

    pub fn as_context(&mut self) -> *mut HostContext {
        self as *mut HostState as *mut HostContext
    }

    fn resolve_image(&mut self, path: &str) -> ImageHandle {
        match self.assets.resolve(path) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(error = %err, "plugin image unavailable");
                IMAGE_NOT_FOUND
            }
        }
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        let font = FontId::proportional(font_size);
        self.egui
            .fonts(|fonts| fonts.layout_no_wrap(text.to_owned(), font, Color32::WHITE).size().x)
    }
}

/// # Safety
/// `ctx` must be the pointer from `HostState::as_context` for the current call.
unsafe fn state<'a>(ctx: *mut HostContext) -> Option<&'a mut HostState> {
    unsafe { (ctx as *mut HostState).as_mut() }
}

/// # Safety
/// `ptr`/`len` must describe live bytes.
unsafe fn str_arg<'a>(ptr: *const u8, len: usize) -> Result<&'a str, AssetError> {
    if ptr.is_null() {
        return Err(AssetError::BadPath);
    }
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    std::str::from_utf8(bytes).map_err(|_| AssetError::BadPath)
}

extern "C" fn host_resolve_image(ctx: *mut HostContext, path_ptr: *const u8, path_len: usize) -> ImageHandle {
    let Some(host) = (unsafe { state(ctx) }) else {
        error!("resolve_image called without a host context");
        return IMAGE_NOT_FOUND;
    };
    match unsafe { str_arg(path_ptr, path_len) } {
        Ok(path) => host.resolve_image(path),
        Err(err) => {
            warn!(error = %err, "plugin image unavailable");
            IMAGE_NOT_FOUND
        }
    }
}

extern "C" fn host_draw(ctx: *mut HostContext, cmd: *const DrawCommand) {
    let Some(host) = (unsafe { state(ctx) }) else {
        return;
    };
    let Some(cmd) = (unsafe { cmd.as_ref() }) else {
        return;
    };
    match unsafe { DrawOp::from_command(cmd) } {
        Some(op) => host.draw_list.push(op),
        None => trace!(kind = ?cmd.kind, "dropped empty draw command"),
    }
}

extern "C" fn host_text_width(ctx: *mut HostContext, text_ptr: *const u8, text_len: usize, font_size: f32) -> f32 {
    let Some(host) = (unsafe { state(ctx) }) else {
        return 0.0;
    };
    match unsafe { str_arg(text_ptr, text_len) } {
        Ok(text) => host.text_width(text, font_size),
        Err(_) => 0.0,
    }
}

extern "C" fn host_log(level: LogLevel, msg_ptr: *const u8, msg_len: usize) {
    let Ok(msg) = (unsafe { str_arg(msg_ptr, msg_len) }) else {
        return;
    };
    match level {
        LogLevel::Error => error!(target: "plugin", "{msg}"),
        LogLevel::Warn => warn!(target: "plugin", "{msg}"),
        LogLevel::Info => info!(target: "plugin", "{msg}"),
        LogLevel::Debug => debug!(target: "plugin", "{msg}"),
        LogLevel::Trace => trace!(target: "plugin", "{msg}"),
    }
}

/// Helper to construct the interface struct
pub fn create_interface() -> HostInterface {
    HostInterface {
        resolve_image: host_resolve_image,
        draw: host_draw,
        text_width: host_text_width,
        log: Some(host_log),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_shared::{Color, Rect, TextAlign};

    fn host() -> HostState {
        HostState::new(AssetStore::new("no/such/root"), egui::Context::default())
    }

    #[test]
    fn draw_commands_land_in_the_draw_list() {
        let mut state = host();
        let iface = create_interface();
        let ctx = state.as_context();

        let label = String::from("Fish");
        let cmds = [
            DrawCommand::fill(Rect::UNIT, Color::WHITE, None),
            DrawCommand::text(Rect::UNIT, &label, 10.0, TextAlign::Center, Color::BLACK, None),
            DrawCommand::text(Rect::UNIT, "", 10.0, TextAlign::Center, Color::BLACK, None),
        ];
        for cmd in &cmds {
            (iface.draw)(ctx, cmd);
        }

        let ops = state.draw_list.take();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[1], DrawOp::Text { text, .. } if text == "Fish"));
    }

    #[test]
    fn missing_images_report_not_found() {
        let mut state = host();
        let iface = create_interface();
        let path = "art/props/fish.png";
        let handle = (iface.resolve_image)(state.as_context(), path.as_ptr(), path.len());
        assert_eq!(handle, IMAGE_NOT_FOUND);
    }

    #[test]
    fn null_context_is_ignored() {
        let iface = create_interface();
        let null = std::ptr::null_mut();
        assert_eq!((iface.resolve_image)(null, b"x".as_ptr(), 1), IMAGE_NOT_FOUND);
        assert_eq!((iface.text_width)(null, b"x".as_ptr(), 1, 12.0), 0.0);
        (iface.draw)(null, std::ptr::null());
    }
}
