// crates/dino_plugin/src/shims.rs

use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

use engine_shared::{
    plugin_api::{FFIBuffer, FFIResult, HostContext, HostInterface, StateEnvelope},
    DrawCommand, FrameInput, ImageHandle, Rect, TextAlign, IMAGE_NOT_FOUND,
};
use tracing::{error, info, warn};

use crate::canvas::{AssetError, AssetResolver, Canvas, Style};
use crate::logging;
use crate::state::{DinoGame, SCHEMA_HASH, STATE_VERSION};

fn catch_ffi_panic<F>(f: F) -> FFIResult
where
    F: FnOnce() -> FFIResult,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(res) => res,
        Err(_) => {
            error!("panic caught at the plugin boundary");
            FFIResult::PanicDetected
        }
    }
}

/// Host capabilities for the duration of one call.
struct HostBridge<'h> {
    host: &'h HostInterface,
    ctx: *mut HostContext,
}

impl AssetResolver for HostBridge<'_> {
    fn resolve_image(&mut self, path: &str) -> Result<ImageHandle, AssetError> {
        match (self.host.resolve_image)(self.ctx, path.as_ptr(), path.len()) {
            IMAGE_NOT_FOUND => Err(AssetError::NotFound { path: path.to_string() }),
            handle => Ok(handle),
        }
    }
}

impl Canvas for HostBridge<'_> {
    fn fill_rect(&mut self, rect: Rect, style: Style) {
        let cmd = DrawCommand::fill(rect, style.color, style.clip);
        (self.host.draw)(self.ctx, &cmd);
    }

    fn textured_rect(&mut self, rect: Rect, image: ImageHandle, uv: Rect, style: Style) {
        let cmd = DrawCommand::textured(rect, image, uv, style.color, style.clip);
        (self.host.draw)(self.ctx, &cmd);
    }

    fn text(&mut self, rect: Rect, text: &str, font_size: f32, align: TextAlign, style: Style) {
        // `text` outlives the call; the host copies it before returning.
        let cmd = DrawCommand::text(rect, text, font_size, align, style.color, style.clip);
        (self.host.draw)(self.ctx, &cmd);
    }

    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        (self.host.text_width)(self.ctx, text.as_ptr(), text.len(), font_size)
    }
}

pub extern "C" fn on_load(
    state: *mut c_void,
    ctx: *mut HostContext,
    iface: *const HostInterface,
) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() || iface.is_null() {
            return FFIResult::Error;
        }

        let game = unsafe { &mut *(state as *mut DinoGame) };
        let host = unsafe { *iface };

        logging::init(host.log);
        game.host = Some(host);
        game.bind_images(&mut HostBridge { host: &host, ctx });

        info!(money = game.play.money, props = game.play.scene.len(), "dino plugin loaded");
        FFIResult::Success
    })
}

pub extern "C" fn on_update(
    state: *mut c_void,
    ctx: *mut HostContext,
    input: *const FrameInput,
) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() || input.is_null() {
            return FFIResult::Error;
        }

        let game = unsafe { &mut *(state as *mut DinoGame) };
        let input = unsafe { &*input };
        let Some(host) = game.host else {
            return FFIResult::Error;
        };

        game.tick(input, &mut HostBridge { host: &host, ctx });
        FFIResult::Success
    })
}

pub extern "C" fn on_unload(state: *mut c_void, _ctx: *mut HostContext) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() {
            return FFIResult::Error;
        }
        let game = unsafe { &mut *(state as *mut DinoGame) };
        game.host = None;
        info!("dino plugin unloading");
        FFIResult::Success
    })
}

pub extern "C" fn get_state_len(state: *mut c_void) -> usize {
    if state.is_null() {
        return 0;
    }
    let game = unsafe { &*(state as *const DinoGame) };
    let payload = bincode::serialized_size(game).unwrap_or(0) as usize;
    StateEnvelope::LEN + payload
}

pub extern "C" fn save_state(state: *mut c_void, buf: FFIBuffer) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() || buf.ptr.is_null() {
            return FFIResult::Error;
        }
        let game = unsafe { &*(state as *const DinoGame) };

        let payload_len = match bincode::serialized_size(game) {
            Ok(sz) => sz as usize,
            Err(_) => return FFIResult::Error,
        };
        let total_len = StateEnvelope::LEN + payload_len;
        if buf.len < total_len {
            return FFIResult::BufferTooSmall;
        }

        let out = unsafe { std::slice::from_raw_parts_mut(buf.ptr, buf.len) };
        StateEnvelope::new(SCHEMA_HASH, STATE_VERSION, payload_len).write_to(out);

        match bincode::serialize_into(&mut out[StateEnvelope::LEN..total_len], game) {
            Ok(()) => FFIResult::Success,
            Err(err) => {
                error!(%err, "state snapshot failed");
                FFIResult::Error
            }
        }
    })
}

pub extern "C" fn load_state(state: *mut c_void, buf: FFIBuffer) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() || buf.ptr.is_null() {
            return FFIResult::Error;
        }
        let game = unsafe { &mut *(state as *mut DinoGame) };
        let bytes = unsafe { std::slice::from_raw_parts(buf.ptr as *const u8, buf.len) };

        let Some(envelope) = StateEnvelope::read_from(bytes) else {
            return FFIResult::Error;
        };
        if envelope.schema_hash != SCHEMA_HASH || envelope.state_version != STATE_VERSION {
            warn!(
                version = envelope.state_version,
                expected = STATE_VERSION,
                "snapshot schema changed, starting fresh"
            );
            return FFIResult::SchemaMismatch;
        }

        let payload_end = StateEnvelope::LEN + envelope.payload_len as usize;
        let Some(payload) = bytes.get(StateEnvelope::LEN..payload_end) else {
            return FFIResult::Error;
        };

        match bincode::deserialize::<DinoGame>(payload) {
            Ok(restored) => {
                // Image handles and host bindings belong to this load, not the snapshot.
                game.config = restored.config;
                game.play = restored.play;
                FFIResult::Success
            }
            Err(err) => {
                error!(%err, "state restore failed");
                FFIResult::Error
            }
        }
    })
}

pub extern "C" fn drop_state(state: *mut c_void) {
    if !state.is_null() {
        unsafe { drop(Box::from_raw(state as *mut DinoGame)) };
    }
}

pub extern "C" fn get_hash() -> u64 {
    SCHEMA_HASH
}

pub extern "C" fn get_state_version() -> u32 {
    STATE_VERSION
}
