//! `tracing` output for the browser: each formatted event is sent to the
//! devtools console at the matching severity.

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConsoleMakeWriter;

/// Buffers one event and emits it on drop.
pub(crate) struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
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
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }

        let msg = wasm_bindgen::JsValue::from_str(text);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&msg),
            Level::WARN => web_sys::console::warn_1(&msg),
            Level::INFO => web_sys::console::info_1(&msg),
            Level::DEBUG => web_sys::console::debug_1(&msg),
            Level::TRACE => web_sys::console::log_1(&msg),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// `LOG_LEVEL` from `window.ENV`; unknown or missing values mean `info`.
pub(crate) fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO)
}

pub(crate) fn init(level: Option<&str>) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_writer(ConsoleMakeWriter);

    // A second init (e.g. hot reload) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(parse_level(level))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_defaults_to_info() {
        assert_eq!(parse_level(None), LevelFilter::INFO);
        assert_eq!(parse_level(Some("verbose")), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_level_accepts_names() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::DEBUG);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::WARN);
        assert_eq!(parse_level(Some("off")), LevelFilter::OFF);
    }
}
