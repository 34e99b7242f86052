// File: ./src/logging.rs
//! Logger setup. The TUI owns the terminal, so it logs to a file in the data
//! directory; headless commands log to stderr.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;

pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .add_filter_allow_str("plancraft")
        .build()
}

/// Appends to `<data dir>/plancraft.log`.
pub fn init_file_logger(ctx: &dyn AppContext, level: &str) -> Result<()> {
    let path = ctx
        .get_log_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file location"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    WriteLogger::init(parse_level(level), log_config(), file)
        .map_err(|e| anyhow::anyhow!("Logger already initialized: {}", e))
}

pub fn init_term_logger(level: &str) -> Result<()> {
    TermLogger::init(
        parse_level(level),
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| anyhow::anyhow!("Logger already initialized: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
