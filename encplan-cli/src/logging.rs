// ============================================================================
// encplan-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger backend for the core's `log` records
//
// encplan-core only emits records through the `log` facade; this module
// decides where they go. Records are written to stderr so that stdout only
// carries reports and JSON.
//
// USAGE:
// - default: info and above
// - --verbose: debug, including every intermediate resolution value
// - RUST_LOG overrides both (e.g. RUST_LOG=encplan_core=trace)

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};

/// Whether stderr output should be colored (respects NO_COLOR).
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

fn level_label(level: Level, color: bool) -> String {
    let label = match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };

    if !color {
        return label.to_string();
    }

    match level {
        Level::Error => label.bright_red().bold().to_string(),
        Level::Warn => label.yellow().to_string(),
        Level::Info => label.green().to_string(),
        Level::Debug => label.blue().to_string(),
        Level::Trace => label.magenta().to_string(),
    }
}

/// Initialise the logger. Call once, before any command runs.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let color = use_color();

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Stderr)
        .format(move |buf, record| {
            writeln!(buf, "{} {}", level_label(record.level(), color), record.args())
        })
        .init();

    log::debug!("Logger initialized with level: {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_level_labels_align() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level_label(level, false).len(), 5);
        }
    }
}
