//! Console output for `tracing` events and panics.

use std::io;
use std::sync::Once;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Install the console subscriber and panic hook. Safe to call repeatedly.
pub fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        install_panic_hook();

        // Another subscriber may already be installed by the embedding app
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(ConsoleMakeWriter)
                    .without_time()
                    .with_ansi(false)
                    .with_target(false),
            )
            .with(
                EnvFilter::builder()
                    .with_default_directive(Level::INFO.into())
                    .parse_lossy(""),
            )
            .try_init();
    });
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = match info.location() {
            Some(loc) => format!(
                "checkout-rack panicked at {}:{}:{}: {info}",
                loc.file(),
                loc.line(),
                loc.column()
            ),
            None => format!("checkout-rack panicked: {info}"),
        };
        console::error_1(&JsValue::from_str(&msg));
    }));
}

/// Hands out one writer per event, routed by level
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it on drop
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(128),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }

        let msg = JsValue::from_str(line);
        if self.level == Level::ERROR {
            console::error_1(&msg);
        } else if self.level == Level::WARN {
            console::warn_1(&msg);
        } else if self.level == Level::INFO {
            console::log_1(&msg);
        } else {
            console::debug_1(&msg);
        }
    }
}
