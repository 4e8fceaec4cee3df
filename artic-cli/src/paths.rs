//! Where the browser keeps its log files.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Log file written by the running process.
const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to [`LATEST_LOG`].
const MAX_OLD_LOGS: usize = 10;

/// Cache directory for this application, if a home directory exists.
///
/// - Linux: `$XDG_CACHE_HOME/artic-browser` or `~/.cache/artic-browser`
/// - macOS: `~/Library/Caches/edu.artic.artic-browser`
/// - Windows: `C:\Users\<User>\AppData\Local\artic\artic-browser\cache`
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("edu", "artic", "artic-browser").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Log file for this run inside `dir`.
pub fn latest_log(dir: &Path) -> PathBuf {
    dir.join(LATEST_LOG)
}

/// Archives the previous run's log under a timestamp and prunes old archives.
///
/// Call at startup, before the new log file is created.
pub fn rotate_logs(dir: &Path) {
    let latest = latest_log(dir);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        if let Err(e) = fs::rename(&latest, dir.join(format!("{}.log", stamp))) {
            eprintln!("Warning: could not archive {}: {}", latest.display(), e);
        }
    }
    prune_archived_logs(dir, MAX_OLD_LOGS);
}

/// Deletes archived logs beyond the `keep` most recently modified.
fn prune_archived_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<(Option<std::time::SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .map(|entry| (entry.metadata().and_then(|m| m.modified()).ok(), entry.path()))
        .collect();

    // newest first
    archived.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in archived.into_iter().skip(keep) {
        let _ = fs::remove_file(path);
    }
}
