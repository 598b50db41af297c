// Support utilities for WASM bindings
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Routes `log` records from the core to the browser console
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::log_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger (first call only) and set the level.
/// Unknown level names fall back to `info`.
pub fn init_console_logging(level: &str) -> LevelFilter {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    // A second call only changes the level
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
    filter
}
