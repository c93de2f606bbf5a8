// crates/engine_shared/src/plugin_api.rs
use core::ffi::c_void;

use bytemuck::{Pod, Zeroable};

use crate::draw::{DrawCommand, ImageHandle};
use crate::input_types::FrameInput;

/// Bumped whenever `PluginApi` or `HostInterface` change shape.
pub const ENGINE_API_VERSION: u32 = 2;

/// First eight bytes of every state snapshot ("DINOSNAP").
pub const SNAPSHOT_MAGIC_HEADER: u64 = u64::from_le_bytes(*b"DINOSNAP");

// ==================================================================================
// 1. OPAQUE HANDLE (The "Firewall")
// ==================================================================================

/// Represents the Host's per-frame state (asset store, draw list, fonts).
///
/// PROPERTIES:
/// 1. Opaque: The plugin cannot see the fields (size is 0), so it cannot access memory directly.
/// 2. Type-Safe: It is a distinct type from `*mut c_void`, preventing accidental pointer mixing.
/// 3. !Send/!Sync: PhantomData ensures this handle stays on the main thread.
#[repr(C)]
pub struct HostContext {
    _data: [u8; 0],
    _marker: core::marker::PhantomData<(*mut u8, core::marker::PhantomPinned)>,
}

// ==================================================================================
// 2. STRUCTURAL HASHING (The "Handshake")
// ==================================================================================

/// FNV-1a over a schema description string.
/// The plugin hashes a string naming its snapshot layout; bumping the string
/// invalidates older snapshots.
pub const fn calculate_layout_hash(schema: &str) -> u64 {
    let bytes = schema.as_bytes();
    let mut hash: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }
    hash
}

// ==================================================================================
// 3. HOST INTERFACE
// ==================================================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// Capabilities the host lends to the plugin. Every call takes the `HostContext`
/// the host passed into the current `on_load`/`on_update`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostInterface {
    /// Maps a project-relative asset path to an image slot, or `IMAGE_NOT_FOUND`.
    pub resolve_image: extern "C" fn(ctx: *mut HostContext, path_ptr: *const u8, path_len: usize) -> ImageHandle,
    pub draw: extern "C" fn(ctx: *mut HostContext, cmd: *const DrawCommand),
    pub text_width: extern "C" fn(ctx: *mut HostContext, text_ptr: *const u8, text_len: usize, font_size: f32) -> f32,
    pub log: Option<extern "C" fn(level: LogLevel, msg_ptr: *const u8, msg_len: usize)>,
}

// ==================================================================================
// 4. PLUGIN API
// ==================================================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FFIResult {
    Success = 0,
    Error = 1,
    BufferTooSmall = 2,
    SchemaMismatch = 3,
    PanicDetected = 4,
}

/// Host-owned byte buffer lent to the plugin for one call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FFIBuffer {
    pub ptr: *mut u8,
    pub len: usize,
}

#[repr(C)]
pub struct PluginApi {
    pub state: *mut c_void,

    pub on_load: extern "C" fn(*mut c_void, *mut HostContext, *const HostInterface) -> FFIResult,
    pub on_update: extern "C" fn(*mut c_void, *mut HostContext, *const FrameInput) -> FFIResult,
    pub on_unload: extern "C" fn(*mut c_void, *mut HostContext) -> FFIResult,

    // Hot-reload snapshot
    pub get_state_len: extern "C" fn(*mut c_void) -> usize,
    pub save_state: extern "C" fn(*mut c_void, FFIBuffer) -> FFIResult,
    pub load_state: extern "C" fn(*mut c_void, FFIBuffer) -> FFIResult,
    pub drop_state: extern "C" fn(*mut c_void),

    pub get_hash: extern "C" fn() -> u64,
    pub get_state_version: extern "C" fn() -> u32,
}

// ==================================================================================
// 5. SNAPSHOT ENVELOPE
// ==================================================================================

/// Fixed header in front of every serialized plugin state.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct StateEnvelope {
    pub magic_header: u64,
    pub schema_hash: u64,
    pub payload_len: u64,
    pub state_version: u32,
    pub _reserved: u32,
}

impl StateEnvelope {
    pub const LEN: usize = core::mem::size_of::<StateEnvelope>();

    pub fn new(schema_hash: u64, state_version: u32, payload_len: usize) -> Self {
        Self {
            magic_header: SNAPSHOT_MAGIC_HEADER,
            schema_hash,
            payload_len: payload_len as u64,
            state_version,
            _reserved: 0,
        }
    }

    /// Reads the header from the front of `bytes`. `None` if too short or the magic is wrong.
    pub fn read_from(bytes: &[u8]) -> Option<Self> {
        let header = bytes.get(..Self::LEN)?;
        let envelope: StateEnvelope = bytemuck::pod_read_unaligned(header);
        (envelope.magic_header == SNAPSHOT_MAGIC_HEADER).then_some(envelope)
    }

    /// Writes the header to the front of `out`. Returns false if `out` is too short.
    pub fn write_to(&self, out: &mut [u8]) -> bool {
        match out.get_mut(..Self::LEN) {
            Some(dst) => {
                dst.copy_from_slice(bytemuck::bytes_of(self));
                true
            }
            None => false,
        }
    }
}
