use std::io::Write;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

/// Level used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct AliasLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    filter: LevelFilter,
    start: Instant,
}

impl Log for AliasLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let _ = writeln!(
            self.sink.lock(),
            "[{elapsed:.3}s] [{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

/// Parse a level from a `RUST_LOG`-style value.
#[must_use]
pub fn parse_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Initialize the global logger, writing to `log_file` if given and stderr otherwise.
///
/// Stdout is never used so the container runtime's output stays untouched.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger is already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = parse_filter(std::env::var("RUST_LOG").ok().as_deref());

    let sink: Box<dyn Write + Send> = match log_file {
        Some(file) => Box::new(file),
        None => Box::new(std::io::stderr()),
    };
    let logger = AliasLogger {
        sink: Mutex::new(sink),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_filter(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(parse_filter(Some("off")), LevelFilter::Off);
        assert_eq!(parse_filter(Some("docker_alias=debug")), DEFAULT_LEVEL);
        assert_eq!(parse_filter(None), DEFAULT_LEVEL);
    }
}
