use std::{
    io::{self, Write as _},
    sync::{OnceLock, PoisonError, RwLock},
};

use colored::Colorize as _;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::Error;

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the stderr logger. Everything is forwarded to it, it filters by its own level.
pub fn init(level: LevelFilter) -> Result<(), Error> {
    let logger = get_logger();
    logger.set_min_level(level);

    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);

    Ok(())
}

pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    /// `LEVEL source -> message`, the level tag colored by severity.
    pub fn format(record: &Record) -> String {
        let level = format!("{:>5}", record.level());
        let level = match record.level() {
            Level::Error => level.red().bold(),
            Level::Warn => level.yellow(),
            Level::Info => level.white(),
            Level::Debug => level.blue(),
            Level::Trace => level.dimmed(),
        };
        let source = record.module_path().unwrap_or("unknown");

        format!("{} {} -> {}", level, source.dimmed(), record.args())
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
