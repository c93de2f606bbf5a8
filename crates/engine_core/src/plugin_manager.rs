// crates/engine_core/src/plugin_manager.rs

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use libloading::{Library, Symbol};
use tracing::{error, info, warn};

use engine_shared::plugin_api::{
    FFIBuffer, FFIResult, HostInterface, PluginApi, StateEnvelope, ENGINE_API_VERSION,
};
use engine_shared::FrameInput;

use crate::error::HostError;
use crate::host::HostState;

pub struct PluginHandle {
    // Declared before `lib` so the table is gone before the code it points into.
    pub api: PluginApi,
    _lib: Library,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRuntimeState {
    Running,
    PausedError(String),
}

pub struct PluginManager {
    plugin: Option<PluginHandle>,
    pub runtime_state: PluginRuntimeState,
    plugin_source_path: PathBuf,
    last_reload: Option<Instant>,
    reload_debounce: Duration,
    reload_count: u32,
    /// Snapshot kept from a reload whose new library failed to load, so the next attempt can restore it.
    stashed_state: Option<Vec<u8>>,
}

impl PluginManager {
    pub fn new(path: impl Into<PathBuf>, reload_debounce: Duration) -> Self {
        Self {
            plugin: None,
            runtime_state: PluginRuntimeState::PausedError("plugin not loaded yet".into()),
            plugin_source_path: path.into(),
            last_reload: None,
            reload_debounce,
            reload_count: 0,
            stashed_state: None,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.plugin_source_path
    }

    pub fn reload_count(&self) -> u32 {
        self.reload_count
    }

    pub fn is_loaded(&self) -> bool {
        self.plugin.is_some()
    }

    /// Schema hash and state version reported by the loaded plugin.
    pub fn schema(&self) -> Option<(u64, u32)> {
        self.plugin
            .as_ref()
            .map(|p| ((p.api.get_hash)(), (p.api.get_state_version)()))
    }

    pub fn initial_load(&mut self, host: &mut HostState, host_interface: &HostInterface) {
        match unsafe { load_plugin(&self.plugin_source_path) } {
            Ok(plugin) => {
                info!(path = %self.plugin_source_path.display(), "plugin loaded");
                self.plugin = Some(plugin);
                self.runtime_state = PluginRuntimeState::Running;
                self.call_on_load(host, host_interface);
            }
            Err(e) => self.pause(format!("Failed to load plugin: {e}")),
        }
    }

    pub fn update(&mut self, host: &mut HostState, input: &FrameInput) {
        if matches!(self.runtime_state, PluginRuntimeState::PausedError(_)) {
            return;
        }
        let Some(plugin) = &self.plugin else {
            return;
        };

        let res = (plugin.api.on_update)(plugin.api.state, host.as_context(), input);
        match res {
            FFIResult::Success => {}
            FFIResult::PanicDetected => self.pause("Panic during update".into()),
            other => warn!(result = ?other, "plugin on_update failed"),
        }
    }

    fn call_on_load(&mut self, host: &mut HostState, host_interface: &HostInterface) {
        let Some(plugin) = &self.plugin else {
            return;
        };
        let res = (plugin.api.on_load)(plugin.api.state, host.as_context(), host_interface);
        match res {
            FFIResult::Success => {}
            FFIResult::PanicDetected => self.pause("Panic during on_load".into()),
            other => warn!(result = ?other, "plugin on_load failed"),
        }
    }

    fn pause(&mut self, reason: String) {
        error!(%reason, "plugin paused");
        self.runtime_state = PluginRuntimeState::PausedError(reason);
    }

    fn save_plugin_state(&mut self) -> Option<Vec<u8>> {
        let plugin = self.plugin.as_ref()?;
        let max_retries = 3;

        for _ in 0..max_retries {
            let required_len = (plugin.api.get_state_len)(plugin.api.state);
            if required_len == 0 {
                return None;
            }

            let mut buffer = vec![0u8; required_len];
            let ffi_buffer = FFIBuffer {
                ptr: buffer.as_mut_ptr(),
                len: buffer.len(),
            };

            match (plugin.api.save_state)(plugin.api.state, ffi_buffer) {
                FFIResult::Success => return Some(buffer),
                FFIResult::BufferTooSmall => continue,
                FFIResult::PanicDetected => {
                    self.pause("Panic during save".into());
                    return None;
                }
                other => {
                    warn!(result = ?other, "save_state failed");
                    return None;
                }
            }
        }

        warn!(retries = max_retries, "aborting save, state keeps growing");
        None
    }

    /// Releases the current library: `on_unload`, `drop_state`, then the library and its staged copy.
    fn unload_current(&mut self, host: Option<&mut HostState>) {
        let Some(mut plugin) = self.plugin.take() else {
            return;
        };

        if !plugin.api.state.is_null() {
            let ctx = host.map_or(std::ptr::null_mut(), |h| h.as_context());
            let _ = (plugin.api.on_unload)(plugin.api.state, ctx);
            (plugin.api.drop_state)(plugin.api.state);
            // Never hand the freed pointer to this table again.
            plugin.api.state = std::ptr::null_mut();
        }

        let staged = plugin.path.clone();
        drop(plugin);
        if let Err(e) = fs::remove_file(&staged) {
            warn!(path = %staged.display(), error = %e, "could not remove staged plugin copy");
        }
    }

    pub fn try_hot_reload(&mut self, host: &mut HostState, host_interface: &HostInterface) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_reload {
            if now.duration_since(last) < self.reload_debounce {
                return false;
            }
        }
        self.last_reload = Some(now);

        info!("hot reload requested");

        // 1. SAVE STATE
        let snapshot = if matches!(self.runtime_state, PluginRuntimeState::Running) {
            self.save_plugin_state()
        } else {
            None
        }
        .or_else(|| self.stashed_state.take());

        // 2. UNLOAD OLD
        self.unload_current(Some(host));

        // 3. LOAD NEW
        let new_plugin = match unsafe { load_plugin(&self.plugin_source_path) } {
            Ok(p) => p,
            Err(e) => {
                self.stashed_state = snapshot;
                self.pause(format!("Failed to load new plugin: {e}"));
                return false;
            }
        };
        self.plugin = Some(new_plugin);
        self.runtime_state = PluginRuntimeState::Running;

        // 4. RESTORE STATE
        if let Some(bytes) = snapshot {
            if !self.restore_state(bytes) {
                return false;
            }
        }

        // 5. REBIND HOST RESOURCES
        self.call_on_load(host, host_interface);

        self.reload_count += 1;
        info!(reloads = self.reload_count, "plugin reloaded");
        matches!(self.runtime_state, PluginRuntimeState::Running)
    }

    /// Hands a snapshot to the fresh plugin. False if the plugin panicked.
    fn restore_state(&mut self, mut bytes: Vec<u8>) -> bool {
        let Some(plugin) = &self.plugin else {
            return false;
        };
        if StateEnvelope::read_from(&bytes).is_none() {
            warn!("discarding snapshot without a valid header");
            return true;
        }

        let ffi_buffer = FFIBuffer {
            ptr: bytes.as_mut_ptr(),
            len: bytes.len(),
        };
        match (plugin.api.load_state)(plugin.api.state, ffi_buffer) {
            FFIResult::Success => info!("state restored"),
            FFIResult::SchemaMismatch => warn!("schema mismatch during load_state, using default state"),
            FFIResult::PanicDetected => {
                self.pause("Panic during load_state".into());
                return false;
            }
            other => warn!(result = ?other, "load_state failed, using default state"),
        }
        true
    }
}

impl Drop for PluginManager {
    fn drop(&mut self) {
        self.unload_current(None);
    }
}

/// Loads a private copy of `path` so the original can be rebuilt while we run.
unsafe fn load_plugin(path: &Path) -> Result<PluginHandle, HostError> {
    if !path.exists() {
        return Err(HostError::PluginMissing(path.to_path_buf()));
    }

    let copy_path = unique_copy_path(path);
    fs::copy(path, &copy_path).map_err(|source| HostError::PluginCopy {
        path: copy_path.clone(),
        source,
    })?;

    let loaded = unsafe { open_library(&copy_path) };
    if loaded.is_err() {
        let _ = fs::remove_file(&copy_path);
    }
    let (lib, api) = loaded?;

    Ok(PluginHandle {
        api,
        _lib: lib,
        path: copy_path,
    })
}

unsafe fn open_library(path: &Path) -> Result<(Library, PluginApi), HostError> {
    let lib = unsafe { Library::new(path)? };

    let found = {
        let version_fn: Symbol<extern "C" fn() -> u32> = unsafe { lib.get(b"get_api_version")? };
        version_fn()
    };
    if found != ENGINE_API_VERSION {
        return Err(HostError::ApiVersion {
            found,
            expected: ENGINE_API_VERSION,
        });
    }

    let api = {
        let create_fn: Symbol<extern "C" fn() -> PluginApi> = unsafe { lib.get(b"_create_game")? };
        create_fn()
    };
    Ok((lib, api))
}

fn unique_copy_path(original: &Path) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let stem = original
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("plugin");
    let ext = original.extension().and_then(OsStr::to_str).unwrap_or("dll");
    original.with_file_name(format!("{stem}_loaded_{ts}.{ext}"))
}
