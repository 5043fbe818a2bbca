//! What a watcher observes and which events it reacts to.

use std::fmt;
use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecursiveMode};

/// A filesystem location whose changes trigger a store reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    /// A directory tree, watched recursively (the keyring).
    Tree(PathBuf),
    /// A single file (the config). Its parent directory is watched so that
    /// rename-based saves are seen too; events are filtered by file name.
    File(PathBuf),
}

impl WatchTarget {
    /// Path handed to the OS watcher.
    pub fn watch_path(&self) -> &Path {
        match self {
            Self::Tree(root) => root,
            Self::File(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            },
        }
    }

    pub fn recursive_mode(&self) -> RecursiveMode {
        match self {
            Self::Tree(_) => RecursiveMode::Recursive,
            Self::File(_) => RecursiveMode::NonRecursive,
        }
    }

    /// Whether `event` should (re)arm the debounce timer.
    ///
    /// Only creations, modifications and removals count. For a file target
    /// at least one event path must name the watched file.
    pub fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return false;
        }
        match self {
            Self::Tree(_) => true,
            Self::File(path) => {
                let Some(name) = path.file_name() else {
                    return false;
                };
                event
                    .paths
                    .iter()
                    .any(|changed| changed.file_name() == Some(name))
            }
        }
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(root) => write!(f, "tree: {}", root.display()),
            Self::File(path) => write!(f, "file: {}", path.display()),
        }
    }
}
