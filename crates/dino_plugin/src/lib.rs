// crates/dino_plugin/src/lib.rs
//! "Collect dinosaurs" game screen, loaded by the engine as a hot-reloadable plugin.

pub mod assets;
pub mod bounded;
pub mod canvas;
pub mod catalog;
pub mod depth;
pub mod inventory;
pub mod lake;
pub mod logging;
pub mod paging;
pub mod shims;
pub mod state;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod testing;

use std::ffi::c_void;

use engine_shared::{PluginApi, ENGINE_API_VERSION};

use crate::state::DinoGame;

//
// FFI exports
//

#[no_mangle]
pub extern "C" fn _create_game() -> PluginApi {
    let game = Box::new(DinoGame::default());
    PluginApi {
        state: Box::into_raw(game) as *mut c_void,
        on_load: shims::on_load,
        on_update: shims::on_update,
        on_unload: shims::on_unload,
        get_state_len: shims::get_state_len,
        save_state: shims::save_state,
        load_state: shims::load_state,
        drop_state: shims::drop_state,
        get_hash: shims::get_hash,
        get_state_version: shims::get_state_version,
    }
}

#[no_mangle]
pub extern "C" fn get_api_version() -> u32 {
    ENGINE_API_VERSION
}
