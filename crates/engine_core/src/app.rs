// crates/engine_core/src/app.rs

use crate::config::HostConfig;
use crate::error::HostError;
use crate::gui::GuiSystem;
use crate::input::InputMap;
use crate::platform_runner::PlatformRunner;

/// Host-side state that outlives the window: configuration, GUI and key bindings.
pub struct App {
    pub config: HostConfig,
    pub gui: GuiSystem,
    pub input_map: InputMap,
}

impl App {
    pub fn new(config: HostConfig) -> Self {
        let gui = GuiSystem::new(config.window.show_inspector);
        Self {
            config,
            gui,
            input_map: InputMap::default(),
        }
    }

    /// Opens the window and runs until it is closed.
    pub fn run(self) -> Result<(), HostError> {
        PlatformRunner::new(self).start()
    }
}
