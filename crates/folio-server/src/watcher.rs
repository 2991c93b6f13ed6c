//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use folio_content::Section;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A section document under `data/` was modified
    DataModified(Section, PathBuf),

    /// The host page was modified
    PageModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification
    Modified(PathBuf),
}

impl WatchEvent {
    /// The file this event is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::DataModified(_, path)
            | Self::PageModified(path)
            | Self::Created(path)
            | Self::Deleted(path)
            | Self::Modified(path) => path,
        }
    }
}

/// Quiet period that ends a burst of file system events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events collected during one burst. A later event for a path replaces the
/// earlier one; paths keep the order they were first seen in.
#[derive(Debug, Default)]
struct PendingEvents {
    events: Vec<WatchEvent>,
}

impl PendingEvents {
    fn push(&mut self, event: WatchEvent) {
        match self.events.iter_mut().find(|e| e.path() == event.path()) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn take(&mut self) -> Vec<WatchEvent> {
        std::mem::take(&mut self.events)
    }
}

/// File watcher for detecting site changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// `page` is the host page file name, so its edits are reported as
    /// [`WatchEvent::PageModified`]. Returns the watcher and a channel to
    /// receive events.
    pub fn new(
        paths: &[PathBuf],
        page: &str,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        let page = page.to_string();
        std::thread::spawn(move || {
            let mut pending = PendingEvents::default();

            loop {
                // Block until a burst starts, then wait for it to go quiet.
                let received = if pending.is_empty() {
                    sync_rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
                } else {
                    sync_rx.recv_timeout(DEBOUNCE)
                };

                match received {
                    Ok(event) => {
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind, &page) {
                                pending.push(e);
                            }
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        for e in pending.take() {
                            if async_tx.blocking_send(e).is_err() {
                                return;
                            }
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        for e in pending.take() {
                            let _ = async_tx.blocking_send(e);
                        }
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind, page: &str) -> Option<WatchEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => {
            if let Some(section) = Section::ALL.into_iter().find(|s| path.ends_with(s.path())) {
                Some(WatchEvent::DataModified(section, path.to_path_buf()))
            } else if path.ends_with(page) {
                Some(WatchEvent::PageModified(path.to_path_buf()))
            } else {
                Some(WatchEvent::Modified(path.to_path_buf()))
            }
        }
        _ => None,
    }
}
