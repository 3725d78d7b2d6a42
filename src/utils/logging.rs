use crate::utils::env::is_development;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logging system.
///
/// Debug level in development, Info in production; `RUST_LOG` still wins
/// when set. Safe to call more than once (subsequent calls are no-ops).
pub fn init() {
    let default_log_level = if is_development() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_level.as_str()),
    );

    builder
        .format(|out, record| {
            // Format: 2025-12-29 10:30:45.123 INFO [poller.rs:34] [clipkeeper] message
            let level_color = match record.level() {
                log::Level::Error => "\x1b[31;1m", // bold red
                log::Level::Warn => "\x1b[33m",    // yellow
                log::Level::Info => "\x1b[32m",    // green
                log::Level::Debug => "\x1b[34m",   // blue
                log::Level::Trace => "\x1b[36m",   // cyan
            };
            let reset = "\x1b[0m";

            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            let target = record.target();

            writeln!(
                out,
                "{} {}{} [{}:{}] [{}] {}{}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                level_color,
                record.level(),
                file,
                line,
                target,
                record.args(),
                reset
            )
        })
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger() {
        // Double init must not panic
        init();
        init();
    }
}
