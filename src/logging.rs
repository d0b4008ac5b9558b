use std::{io::Write, sync::OnceLock};

use log::{Level, Log, Metadata, Record};

static LOGGER: OnceLock<CliLogger> = OnceLock::new();

/// Writes `[LEVEL module] message` lines to stderr.
pub struct CliLogger {
    min_level: Level,
}

impl CliLogger {
    fn new(min_level: Level) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }
}

/// Warnings by default, every `-v` shows one more level.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

pub fn get_logger(verbosity: u8) -> &'static CliLogger {
    LOGGER.get_or_init(|| CliLogger::new(level_for_verbosity(verbosity)))
}

pub fn init(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let logger = get_logger(verbosity);
    log::set_logger(logger)?;
    log::set_max_level(logger.min_level().to_level_filter());
    Ok(())
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let source = record.module_path().unwrap_or("unknown");
            // nowhere left to report a failed write to stderr
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{} {}] {}",
                record.level(),
                source,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
