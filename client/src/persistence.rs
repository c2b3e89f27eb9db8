//! Session persistence backends.
//!
//! Loading is synchronous so a restored session is visible the moment the
//! client is constructed.

use crate::error::{ClientError, Result};
use crate::session::AuthSession;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Where a session survives between runs.
pub trait SessionPersistence: Send + Sync {
    /// Read the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionStorage`] if the store exists but cannot be read.
    fn load(&self) -> Result<Option<AuthSession>>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionStorage`] if the session cannot be written.
    fn save(&self, session: &AuthSession) -> Result<()>;

    /// Remove the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionStorage`] if the session cannot be removed.
    fn clear(&self) -> Result<()>;
}

/// Keeps the session for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    session: Mutex<Option<AuthSession>>,
}

impl MemoryPersistence {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session, as if restored from an earlier run.
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<AuthSession>>> {
        self.session
            .lock()
            .map_err(|_| ClientError::SessionStorage("session lock poisoned".to_string()))
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<AuthSession>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Stores the session as JSON in a single file.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Persist to `path`. Parent directories are created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, error: impl std::fmt::Display) -> ClientError {
        ClientError::SessionStorage(format!("{action} {}: {error}", self.path.display()))
    }
}

impl SessionPersistence for FilePersistence {
    fn load(&self) -> Result<Option<AuthSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.storage_error("read", error)),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|error| self.storage_error("parse", error))
    }

    fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| self.storage_error("create directory for", error))?;
        }

        let contents =
            serde_json::to_string_pretty(session).map_err(|error| self.storage_error("serialize", error))?;
        fs::write(&self.path, contents).map_err(|error| self.storage_error("write", error))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.storage_error("remove", error)),
        }
    }
}
