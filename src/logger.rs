//! stderr log backend for the command-line tool
//!
//! Info records are printed as plain progress lines; every other level is
//! tagged with its name, and debug/trace records also carry the module path.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: StderrLogger = StderrLogger;

/// Logger writing every record to stderr
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format_record(record);
        let _ = std::io::stderr().lock().write_all(msg.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger; `verbosity` is the number of `-v` flags
pub fn init(verbosity: u8) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level_for(verbosity));
}

/// Maximum level for a verbosity count
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Format one record as a line
pub fn format_record(record: &Record) -> String {
    match record.level() {
        Level::Info => format!("{}\n", record.args()),
        Level::Error | Level::Warn => format!("{}: {}\n", record.level(), record.args()),
        Level::Debug | Level::Trace => match record.module_path() {
            Some(module) => format!("{} {module}: {}\n", record.level(), record.args()),
            None => format!("{}: {}\n", record.level(), record.args()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(3), LevelFilter::Trace);
        assert_eq!(level_for(u8::MAX), LevelFilter::Trace);
    }

    #[test]
    fn info_is_untagged() {
        let line = format_record(
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("Writing MDIO: port 0"))
                .build(),
        );
        assert_eq!(line, "Writing MDIO: port 0\n");
    }

    #[test]
    fn errors_are_tagged() {
        let line = format_record(
            &Record::builder()
                .level(Level::Error)
                .args(format_args!("Leaving 10GbE core in reset."))
                .build(),
        );
        assert_eq!(line, "ERROR: Leaving 10GbE core in reset.\n");
    }

    #[test]
    fn debug_carries_module() {
        let line = format_record(
            &Record::builder()
                .level(Level::Debug)
                .module_path(Some("tengbe_init::hal::mdio"))
                .args(format_args!("frame done"))
                .build(),
        );
        assert_eq!(line, "DEBUG tengbe_init::hal::mdio: frame done\n");
    }
}
