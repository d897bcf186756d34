use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::flags::Flags;

/// Writes `log` records to stderr as `[vena LEVEL] message`.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[vena {}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn level_for(flags: &Flags) -> LevelFilter {
    if flags.is_set("quiet") {
        LevelFilter::Off
    } else if flags.is_set("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the stderr logger. A second call only adjusts the level.
pub fn init(flags: &Flags) {
    let level = level_for(flags);
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
    if level >= Level::Debug {
        log::debug!("debug logging enabled");
    }
}
