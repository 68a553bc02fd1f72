//! Elite Dangerous journal input.
//!
//! - `event`    — typed records parsed from journal lines
//! - `watcher`  — background tailing of the newest journal file
//! - `recovery` — one-shot scan of existing files at startup

pub mod event;
pub mod recovery;
pub mod watcher;

use std::path::{Path, PathBuf};

pub use event::{CommanderSnapshot, JournalEvent, ScanRecord};

/// Newest `Journal.*.log` in `dir`, by file name.
///
/// Journal names embed their creation timestamp, so lexical order is
/// chronological order.
pub fn latest_journal(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("Journal.") && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .max()
}
