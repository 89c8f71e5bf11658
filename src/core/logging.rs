//! Console sink for the `log` facade
//!
//! The engine logs through `log::{debug, info, warn, error}`. In the browser
//! those records are forwarded to `console.*`; native hosts install their
//! own logger.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: Level,
}

impl ConsoleLogger {
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    fn format(record: &Record) -> String {
        format!("[{}] {}: {}", record.level(), record.target(), record.args())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);

        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::log_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger::new(Level::Info);

/// Install the console logger once. Later calls are ignored so a host that
/// already set a logger keeps it.
pub fn install_console_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_respects_level() {
        let logger = ConsoleLogger::new(Level::Warn);
        let warn = Metadata::builder().level(Level::Warn).target("thermal").build();
        let debug = Metadata::builder().level(Level::Debug).target("thermal").build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
