// crates/engine_core/src/hot_reload.rs
//! Watches the built plugin library and reports when it is rewritten.

use std::ffi::OsString;
use std::path::Path;

use crossbeam_channel::{Receiver, TryRecvError};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::error::HostError;

pub struct PluginWatcher {
    // Dropping the watcher stops the backend thread.
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    file_name: OsString,
}

impl PluginWatcher {
    /// Watches the directory holding `plugin_path`; the linker often replaces
    /// the file rather than writing it in place.
    pub fn new(plugin_path: &Path) -> Result<Self, HostError> {
        let file_name = plugin_path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| HostError::PluginMissing(plugin_path.to_path_buf()))?;
        let dir = match plugin_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let (tx, rx) = crossbeam_channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!(dir = %dir.display(), "watching plugin for changes");

        Ok(Self {
            _watcher: watcher,
            events: rx,
            file_name,
        })
    }

    /// Drains pending events. True if any of them touched the plugin file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(Ok(event)) => {
                    if is_plugin_write(&event, &self.file_name) {
                        debug!(kind = ?event.kind, "plugin file changed");
                        changed = true;
                    }
                }
                Ok(Err(err)) => warn!(error = %err, "file watcher error"),
                Err(TryRecvError::Empty) => return changed,
                Err(TryRecvError::Disconnected) => {
                    warn!("file watcher stopped");
                    return changed;
                }
            }
        }
    }
}

fn is_plugin_write(event: &Event, file_name: &OsString) -> bool {
    let writes = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    writes
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn only_writes_to_the_plugin_count() {
        let name = OsString::from("libdino_plugin.so");
        assert!(is_plugin_write(
            &event(EventKind::Create(CreateKind::File), "target/debug/libdino_plugin.so"),
            &name
        ));
        assert!(is_plugin_write(
            &event(EventKind::Modify(ModifyKind::Any), "target/debug/libdino_plugin.so"),
            &name
        ));
        assert!(!is_plugin_write(
            &event(EventKind::Create(CreateKind::File), "target/debug/libdino_plugin_loaded_17.so"),
            &name
        ));
        assert!(!is_plugin_write(
            &event(EventKind::Remove(notify::event::RemoveKind::File), "target/debug/libdino_plugin.so"),
            &name
        ));
    }
}
