use std::io::{self, Write};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Evaluates a `Result`, yielding `Some` on success. On failure the error is logged at `warn`
/// level and the macro yields `None`.
#[macro_export]
macro_rules! with_warn {
    ($expr: expr) => ($crate::with_warn!("{}", $expr));
    ($fmt: tt, $expr: expr) => (match $expr {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!($fmt, e);
            None
        },
    });
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Writes every enabled record to standard error as `[target] [LEVEL] message`.
pub struct SimpleLogger;

impl SimpleLogger {
    pub fn init(max_log_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(max_log_level);
        Ok(())
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(io::stderr(), "[{}] [{}] {}",
                             record.target(), record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Maps the number of `-v` flags given on the command line to a maximum log level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(7), LevelFilter::Trace);
    }

    #[test]
    fn with_warn_yields_option() {
        let ok: Result<u8, String> = Ok(3);
        let err: Result<u8, String> = Err(String::from("bad"));
        assert_eq!(with_warn!(ok), Some(3));
        assert_eq!(with_warn!("failed: {}", err), None);
    }
}
