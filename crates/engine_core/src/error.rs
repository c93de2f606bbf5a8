// crates/engine_core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read config `{path}`")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config `{path}`")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("plugin library not found at `{0}`")]
    PluginMissing(PathBuf),

    #[error("failed to stage plugin copy `{path}`")]
    PluginCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load plugin library")]
    Library(#[from] libloading::Error),

    #[error("plugin was built against API version {found}, engine expects {expected}")]
    ApiVersion { found: u32, expected: u32 },

    #[error("plugin file watcher")]
    Watch(#[from] notify::Error),

    #[error("graphics initialisation failed: {0}")]
    Graphics(String),

    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("event loop")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Image loading failures. Never fatal: the plugin gets `IMAGE_NOT_FOUND` and
/// falls back to a placeholder.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset path is not valid UTF-8")]
    BadPath,

    #[error("asset path `{0}` leaves the asset root")]
    OutsideRoot(String),

    #[error("failed to open image `{path}`")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image `{path}`")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
