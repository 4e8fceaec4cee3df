mod app;
mod args;
mod command;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::path::PathBuf;

use artic_lib::session::{PageState, Session};
use artic_lib::ArticClient;
use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::args::Args;

/// Where this run logs to: the explicit path, or a freshly rotated latest.log.
fn log_path(args: &Args) -> Option<PathBuf> {
    if let Some(path) = &args.log_file {
        return Some(path.clone());
    }
    let cache = paths::cache_dir()?;
    fs::create_dir_all(&cache).ok()?;
    paths::rotate_logs(&cache);
    Some(paths::latest_log(&cache))
}

fn init_logging(args: &Args) {
    if args.log_level == LevelFilter::Off {
        return;
    }
    let Some(path) = log_path(args) else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(args.log_level, Config::default(), file) {
                eprintln!("Warning: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: cannot create log file {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);
    log::info!("Starting artic browser against {}", args.endpoint);

    let client = match ArticClient::from_config(args.client_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let session = match PageState::with_rows(args.rows) {
        Ok(state) => Session::with_page_state(state),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = App::new(client, session).run().await {
        log::error!("Browser stopped: {}", e);
        eprintln!("Error: {}", e);
    }
}
