// crates/engine_core/src/lib.rs
//! Host for the dinosaur game plugin: window, renderer, asset store and hot reload.

// Logic Modules
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod inspector;
pub mod host;

// Internal Implementation Modules
mod assets;
mod draw_list;
mod engine_loop;
mod hot_reload;
mod painter;
mod platform_runner;
mod renderer;
pub mod gui;
pub mod plugin_manager;

// Re-export App so the player crate can find it easily
pub use app::App;
pub use config::{HostConfig, DEFAULT_CONFIG_FILE};
pub use error::HostError;
