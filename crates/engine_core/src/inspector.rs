// crates/engine_core/src/inspector.rs
use egui::{Color32, Context};

use crate::plugin_manager::{PluginManager, PluginRuntimeState};

/// What the inspector window shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginStatus {
    pub path: String,
    pub running: bool,
    pub error: Option<String>,
    pub reloads: u32,
    pub images_loaded: usize,
    pub draw_ops: usize,
    pub schema: Option<(u64, u32)>,
    pub frame_dt: f32,
}

impl PluginStatus {
    pub fn collect(manager: &PluginManager, images_loaded: usize, draw_ops: usize, frame_dt: f32) -> Self {
        let error = match &manager.runtime_state {
            PluginRuntimeState::Running => None,
            PluginRuntimeState::PausedError(msg) => Some(msg.clone()),
        };
        Self {
            path: manager.source_path().display().to_string(),
            running: error.is_none(),
            error,
            reloads: manager.reload_count(),
            images_loaded,
            draw_ops,
            schema: manager.schema(),
            frame_dt,
        }
    }
}

pub fn show(ctx: &Context, status: &PluginStatus, open: &mut bool) {
    egui::Window::new("Plugin Inspector")
        .open(open)
        .default_pos([20.0, 20.0])
        .show(ctx, |ui| {
            ui.heading("Plugin");
            ui.label(status.path.as_str());

            if status.running {
                ui.colored_label(Color32::GREEN, "Running");
            } else {
                ui.colored_label(Color32::RED, "Paused");
            }
            ui.label(format!("Reloads: {}", status.reloads));

            ui.separator();

            ui.label(format!("Images loaded: {}", status.images_loaded));
            ui.label(format!("Draw ops last frame: {}", status.draw_ops));
            ui.label(format!("Frame: {:.1} ms", status.frame_dt * 1000.0));

            ui.collapsing("Snapshot schema", |ui| match status.schema {
                Some((hash, version)) => {
                    ui.monospace(format!("hash    {hash:#018x}"));
                    ui.monospace(format!("version {version}"));
                }
                None => {
                    ui.colored_label(Color32::from_gray(100), "no plugin loaded");
                }
            });
        });
}

/// Overlay shown while the plugin is paused.
pub fn show_error(ctx: &Context, msg: &str) {
    egui::Window::new("CRITICAL ERROR")
        .default_pos([400.0, 100.0])
        .show(ctx, |ui| {
            ui.colored_label(Color32::RED, format!("Plugin Error: {msg}"));
            ui.label("Fix source code and press F5 to reload.");
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn unloaded_plugin_reports_paused() {
        let manager = PluginManager::new("target/debug/libdino_plugin.so", Duration::ZERO);
        let status = PluginStatus::collect(&manager, 3, 12, 0.016);

        assert!(!status.running);
        assert!(status.error.is_some());
        assert_eq!(status.schema, None);
        assert_eq!(status.images_loaded, 3);
        assert_eq!(status.draw_ops, 12);
        assert!(status.path.ends_with("libdino_plugin.so"));
    }
}
