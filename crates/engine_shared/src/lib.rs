// crates/engine_shared/src/lib.rs
//! Types shared across the host <-> plugin boundary.

pub mod draw;
pub mod geometry;
pub mod input_types;
pub mod plugin_api;

pub use draw::{DrawCommand, DrawKind, ImageHandle, TextAlign, IMAGE_NOT_FOUND, PLACEHOLDER_IMAGE};
pub use geometry::{Color, Rect};
pub use input_types::FrameInput;
pub use plugin_api::{
    FFIBuffer, FFIResult, HostContext, HostInterface, LogLevel, PluginApi, StateEnvelope,
    ENGINE_API_VERSION, SNAPSHOT_MAGIC_HEADER,
};
