// crates/engine_core/src/input/map.rs
use std::collections::HashMap;

use egui::Key;

/// Engine-level commands that never reach the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineAction {
    ToggleInspector,
    ReloadPlugin,
}

pub struct InputMap {
    key_bindings: HashMap<Key, EngineAction>,
}

impl Default for InputMap {
    fn default() -> Self {
        let mut map = Self {
            key_bindings: HashMap::new(),
        };
        map.bind(Key::F1, EngineAction::ToggleInspector);
        map.bind(Key::F5, EngineAction::ReloadPlugin);
        map
    }
}

impl InputMap {
    pub fn bind(&mut self, key: Key, action: EngineAction) {
        self.key_bindings.insert(key, action);
    }

    pub fn action_for(&self, key: Key) -> Option<EngineAction> {
        self.key_bindings.get(&key).copied()
    }

    /// Actions whose key went down this frame.
    pub fn triggered(&self, ctx: &egui::Context) -> Vec<EngineAction> {
        ctx.input(|i| {
            self.key_bindings
                .iter()
                .filter(|(key, _)| i.key_pressed(**key))
                .map(|(_, action)| *action)
                .collect()
        })
    }
}
