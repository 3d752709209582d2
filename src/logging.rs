//! `tracing` output routed to the browser console.
//!
//! Each formatted event is buffered and handed to `console.log`,
//! `console.warn` or `console.error` according to its level. Off wasm the
//! same line goes to stderr.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber. Later calls are ignored.
pub fn init(max_level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(max_level)
        .with_target(false)
        .without_time()
        .try_init();
    if installed.is_ok() {
        tracing::debug!(%max_level, "logging initialised");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Collects one event and emits it on drop.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if !line.is_empty() {
            emit(self.level, line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else {
        web_sys::console::log_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tracing::callsite::{Callsite, Identifier};
    use tracing::field::FieldSet;
    use tracing::metadata::Kind;
    use tracing::subscriber::Interest;

    use super::*;

    #[test]
    fn writer_buffers_until_drop() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        writer.write_all(b" WARN autosave failed").unwrap();
        writer.write_all(b"\n").unwrap();
        assert_eq!(writer.buffer, b" WARN autosave failed\n");
    }

    struct WarnCallsite;
    static WARN_CALLSITE: WarnCallsite = WarnCallsite;
    static WARN_META: Metadata<'static> = Metadata::new(
        "autosave failed",
        "idle_cookie_clicker::clicker::engine",
        Level::WARN,
        Some(file!()),
        Some(line!()),
        Some(module_path!()),
        FieldSet::new(&[], Identifier(&WARN_CALLSITE)),
        Kind::EVENT,
    );

    impl Callsite for WarnCallsite {
        fn set_interest(&self, _: Interest) {}

        fn metadata(&self) -> &Metadata<'_> {
            &WARN_META
        }
    }

    #[test]
    fn make_writer_for_follows_event_level() {
        let make = MakeConsoleWriter;
        assert_eq!(make.make_writer_for(&WARN_META).level, Level::WARN);
    }

    #[test]
    fn plain_make_writer_defaults_to_info() {
        let make = MakeConsoleWriter;
        assert_eq!(make.make_writer().level, Level::INFO);
    }

    #[test]
    fn init_twice_is_harmless() {
        init(Level::DEBUG);
        init(Level::INFO);
        tracing::info!("still logging");
    }
}
