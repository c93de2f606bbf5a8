// crates/dino_plugin/src/logging.rs
//! Routes the plugin's `tracing` events into the host log.
//!
//! The plugin is its own copy of `tracing` with its own global dispatcher, so
//! the host subscriber never sees plugin events. Instead each formatted line is
//! handed to `HostInterface::log`.

use std::io;

use engine_shared::LogLevel;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub type LogFn = extern "C" fn(LogLevel, *const u8, usize);

/// Env var read for the plugin's filter, e.g. `DINO_LOG=dino_plugin=debug`.
const FILTER_ENV: &str = "DINO_LOG";

#[derive(Clone, Copy)]
struct HostLog {
    log: LogFn,
}

/// One formatted event. Sent to the host when dropped.
pub struct HostLogLine {
    log: LogFn,
    level: LogLevel,
    buf: Vec<u8>,
}

impl HostLogLine {
    fn new(log: LogFn, level: LogLevel) -> Self {
        Self { log, level, buf: Vec::new() }
    }
}

impl io::Write for HostLogLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for HostLogLine {
    fn drop(&mut self) {
        let line = self.buf.trim_ascii_end();
        if !line.is_empty() {
            (self.log)(self.level, line.as_ptr(), line.len());
        }
    }
}

impl<'a> MakeWriter<'a> for HostLog {
    type Writer = HostLogLine;

    fn make_writer(&'a self) -> Self::Writer {
        HostLogLine::new(self.log, LogLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        HostLogLine::new(self.log, log_level(*meta.level()))
    }
}

fn log_level(level: Level) -> LogLevel {
    if level == Level::ERROR {
        LogLevel::Error
    } else if level == Level::WARN {
        LogLevel::Warn
    } else if level == Level::INFO {
        LogLevel::Info
    } else if level == Level::DEBUG {
        LogLevel::Debug
    } else {
        LogLevel::Trace
    }
}

/// Installs the forwarding subscriber. Without a host log callback events are dropped.
///
/// Every hot reload loads a fresh copy of the library with fresh globals, so
/// this succeeds once per copy; a second `on_load` on the same copy is a no-op.
pub fn init(log: Option<LogFn>) {
    let Some(log) = log else {
        return;
    };

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(HostLog { log })
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_level(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    static LINES: Mutex<Vec<(LogLevel, String)>> = Mutex::new(Vec::new());

    extern "C" fn capture(level: LogLevel, ptr: *const u8, len: usize) {
        let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
        let text = String::from_utf8_lossy(bytes).into_owned();
        LINES.lock().unwrap().push((level, text));
    }

    #[test]
    fn one_line_per_event_without_trailing_newline() {
        {
            let mut line = HostLogLine::new(capture, LogLevel::Warn);
            write!(line, "prop placed").unwrap();
            writeln!(line, " left=2").unwrap();
        }
        // Empty events are not forwarded.
        drop(HostLogLine::new(capture, LogLevel::Info));

        let lines = LINES.lock().unwrap();
        assert_eq!(lines.as_slice(), &[(LogLevel::Warn, "prop placed left=2".to_string())]);
    }

    #[test]
    fn levels_map_one_to_one() {
        assert_eq!(log_level(Level::ERROR), LogLevel::Error);
        assert_eq!(log_level(Level::DEBUG), LogLevel::Debug);
        assert_eq!(log_level(Level::TRACE), LogLevel::Trace);
    }
}
