//! Storage for the admin bearer token
//!
//! The token lives in exactly one place. Stores hand out copies; `clear`
//! returns what it removed so that concurrent callers can tell which one of
//! them actually ended the session.

use parking_lot::Mutex;
use skillup_core::Result;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persisted session token
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Current token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Replace the token
    fn store(&self, token: &str) -> Result<()>;

    /// Remove the token, returning it if one was present
    fn clear(&self) -> Result<Option<String>>;
}

/// Token held in process memory only
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts with `token`
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl fmt::Debug for MemorySessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySessionStore")
            .field("has_token", &self.token.lock().is_some())
            .finish()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<Option<String>> {
        Ok(self.token.lock().take())
    }
}

/// Token persisted to a file, cached in memory
///
/// The cache is the source of truth while the process runs; the file only
/// carries the token across runs.
pub struct FileSessionStore {
    path: PathBuf,
    token: Mutex<Option<String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, reading any token already there
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), has_token = token.is_some(), "opened session store");
        Ok(Self {
            path,
            token: Mutex::new(token),
        })
    }

    /// Location of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        io::Write::write_all(&mut file, token.as_bytes())
    }
}

impl fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("path", &self.path)
            .field("has_token", &self.token.lock().is_some())
            .finish()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut guard = self.token.lock();
        self.write_file(token)?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<Option<String>> {
        let mut guard = self.token.lock();
        let previous = guard.take();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                *guard = previous;
                return Err(e.into());
            }
        }
        Ok(previous)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.store("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        assert_eq!(store.clear().unwrap().as_deref(), Some("abc"));
        assert_eq!(store.clear().unwrap(), None);
    }

    #[test]
    fn test_concurrent_clear_reports_once() {
        let store = Arc::new(MemorySessionStore::with_token("token"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.clear().unwrap().is_some())
            })
            .collect();

        let cleared = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&was_present| was_present)
            .count();
        assert_eq!(cleared, 1);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("admin_token");

        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.store("persisted-token").unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap().as_deref(), Some("persisted-token"));

        assert_eq!(reopened.clear().unwrap().as_deref(), Some("persisted-token"));
        assert!(!path.exists());
        assert_eq!(FileSessionStore::open(&path).unwrap().load().unwrap(), None);
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("admin_token");
        fs::write(&path, "  \n").unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
