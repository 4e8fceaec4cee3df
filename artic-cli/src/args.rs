//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use artic_lib::config::DEFAULT_ENDPOINT;
use artic_lib::session::DEFAULT_ROWS;
use artic_lib::ClientConfig;
use clap::Parser;
use log::LevelFilter;

/// Page sizes offered by the paginator.
pub const ROWS_PER_PAGE_OPTIONS: [u32; 3] = [12, 25, 50];

/// Browse the Art Institute of Chicago collection from the terminal.
#[derive(Debug, Parser)]
#[command(name = "artic", version)]
pub struct Args {
    /// Collection endpoint to page through.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Rows per page (12, 25 or 50).
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = parse_rows)]
    pub rows: u32,

    /// Request timeout in seconds. No timeout when omitted.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Log file. Defaults to latest.log in the cache directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Client configuration derived from the arguments.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default().with_endpoint(self.endpoint.clone());
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Parses a rows-per-page value, accepting only the paginator's options.
pub fn parse_rows(value: &str) -> Result<u32, String> {
    let rows: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
        Ok(rows)
    } else {
        Err(format!("rows must be one of {:?}", ROWS_PER_PAGE_OPTIONS))
    }
}

/// Parses a log level name.
pub fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level '{}'", value))
}
