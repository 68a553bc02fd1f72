//! Background journal tailing.
//!
//! A worker thread polls the newest journal file once a second and sends
//! every complete new line, parsed, over a channel. The UI thread drains
//! the channel on its own turn.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use super::event::JournalEvent;
use super::latest_journal;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Read position in the current journal file.
#[derive(Debug, Default)]
pub struct JournalTail {
    path: Option<PathBuf>,
    offset: u64,
    /// Bytes after the last newline, waiting for the rest of the line.
    partial: Vec<u8>,
}

impl JournalTail {
    /// Start at the end of whatever journal is newest now. History before
    /// this point is left to startup recovery.
    pub fn at_end(dir: &Path) -> Self {
        let path = latest_journal(dir);
        let offset = path
            .as_deref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len())
            .unwrap_or(0);
        Self {
            path,
            offset,
            partial: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Events appended since the last call. Switches to a newer journal
    /// when the game starts one, reading it from the beginning.
    pub fn read_new(&mut self, dir: &Path) -> Vec<JournalEvent> {
        if let Some(latest) = latest_journal(dir) {
            if self.path.as_deref() != Some(latest.as_path()) {
                log::info!("Following journal {}", latest.display());
                self.path = Some(latest);
                self.offset = 0;
                self.partial.clear();
            }
        }

        let Some(path) = self.path.clone() else {
            return Vec::new();
        };

        let mut chunk = Vec::new();
        let read = File::open(&path).and_then(|mut file| {
            file.seek(SeekFrom::Start(self.offset))?;
            file.read_to_end(&mut chunk)
        });
        match read {
            Ok(n) => self.offset += n as u64,
            Err(e) => {
                log::debug!("Journal read failed for {}: {}", path.display(), e);
                return Vec::new();
            }
        }

        self.partial.extend_from_slice(&chunk);
        let mut events = Vec::new();
        while let Some(end) = self.partial.iter().position(|b| *b == b'\n') {
            let bytes: Vec<u8> = self.partial.drain(..=end).collect();
            let line = String::from_utf8_lossy(&bytes);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match JournalEvent::parse(line) {
                Ok(event) => events.push(event),
                Err(e) => log::debug!("Skipping journal line: {}", e),
            }
        }
        events
    }
}

/// Owns the tailing thread. Dropping the watcher stops it.
pub struct JournalWatcher {
    rx: mpsc::Receiver<JournalEvent>,
    stop: Arc<AtomicBool>,
}

impl JournalWatcher {
    /// Follow journals in `dir`. `notify` is called after each batch is
    /// sent, typically to wake the UI.
    pub fn spawn<F>(dir: PathBuf, notify: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        std::thread::Builder::new()
            .name("journal watcher".into())
            .spawn(move || {
                let mut tail = JournalTail::at_end(&dir);
                while !stop_flag.load(Ordering::Relaxed) {
                    let events = tail.read_new(&dir);
                    if !events.is_empty() {
                        for event in events {
                            if tx.send(event).is_err() {
                                return;
                            }
                        }
                        notify();
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            })
            .map_err(|e| log::error!("Cannot start journal watcher: {}", e))
            .ok();

        Self { rx, stop }
    }

    /// Drain everything received so far.
    pub fn poll(&self) -> Vec<JournalEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for JournalWatcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn append(path: &Path, text: &str) {
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        f.write_all(text.as_bytes()).unwrap();
    }

    #[test]
    fn skips_history_and_reads_appended_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("Journal.2024-03-05T090000.01.log");
        append(&journal, "{\"event\":\"FSDJump\",\"StarSystem\":\"Old\"}\n");

        let mut tail = JournalTail::at_end(dir.path());
        assert!(tail.read_new(dir.path()).is_empty());

        append(&journal, "{\"event\":\"FSDJump\",\"StarSystem\":\"New\"}\n");
        let events = tail.read_new(dir.path());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].arrival_system(), Some("New"));
    }

    #[test]
    fn holds_partial_lines_until_complete() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("Journal.2024-03-05T090000.01.log");
        append(&journal, "");
        let mut tail = JournalTail::at_end(dir.path());

        append(&journal, "{\"event\":\"Location\",");
        assert!(tail.read_new(dir.path()).is_empty());
        append(&journal, "\"StarSystem\":\"Sol\"}\nnot json\n");
        let events = tail.read_new(dir.path());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].arrival_system(), Some("Sol"));
    }

    #[test]
    fn invalid_utf8_does_not_stall_the_tail() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("Journal.2024-03-05T090000.01.log");
        append(&journal, "");
        let mut tail = JournalTail::at_end(dir.path());

        let mut f = std::fs::OpenOptions::new().append(true).open(&journal).unwrap();
        f.write_all(b"{\"event\":\"Music\",\"MusicTrack\":\"\xff\xfe\"}\n").unwrap();
        f.write_all(b"{\"event\":\"FSDJump\",\"StarSystem\":\"Lave\"}\n").unwrap();
        drop(f);

        let events = tail.read_new(dir.path());
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].arrival_system(), Some("Lave"));

        append(&journal, "{\"event\":\"FSDJump\",\"StarSystem\":\"Sol\"}\n");
        let events = tail.read_new(dir.path());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].arrival_system(), Some("Sol"));
    }

    #[test]
    fn follows_a_newer_journal_from_the_start() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("Journal.2024-03-05T090000.01.log");
        append(&first, "{\"event\":\"Location\",\"StarSystem\":\"Sol\"}\n");
        let mut tail = JournalTail::at_end(dir.path());

        let second = dir.path().join("Journal.2024-03-06T090000.01.log");
        append(&second, "{\"event\":\"FSDJump\",\"StarSystem\":\"Lave\"}\n");
        let events = tail.read_new(dir.path());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].arrival_system(), Some("Lave"));
        assert_eq!(tail.path(), Some(second.as_path()));
    }

    #[test]
    fn no_journal_yet() {
        let dir = tempfile::tempdir().unwrap();
        let mut tail = JournalTail::at_end(dir.path());
        assert!(tail.read_new(dir.path()).is_empty());
        assert_eq!(tail.path(), None);
    }
}
