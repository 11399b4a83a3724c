//! Storage for the "current user" marker.
//!
//! The marker is plain, readable state: it gates convenience commands and is
//! not a credential. Backends implement [`SessionStore`] so callers decide
//! where it lives.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Where the logged-in username is remembered between invocations.
pub trait SessionStore {
    /// Return the stored username, if any.
    fn load(&self) -> ResultEngine<Option<String>>;

    /// Remember `username` as the current user, replacing any previous one.
    fn save(&self, username: &str) -> ResultEngine<()>;

    /// Forget the current user. Returns `false` if nobody was stored.
    fn clear(&self) -> ResultEngine<bool>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    username: String,
}

/// JSON file backend: `{"username": "..."}`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ResultEngine<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: SessionFile = serde_json::from_str(&content)?;
        Ok(Some(file.username))
    }

    fn save(&self, username: &str) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&SessionFile {
            username: username.to_string(),
        })?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&self) -> ResultEngine<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process backend, used by tests and embedders.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    username: Mutex<Option<String>>,
}

impl MemorySessionStore {
    fn slot(&self) -> ResultEngine<std::sync::MutexGuard<'_, Option<String>>> {
        self.username
            .lock()
            .map_err(|_| EngineError::Session("session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ResultEngine<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, username: &str) -> ResultEngine<()> {
        *self.slot()? = Some(username.to_string());
        Ok(())
    }

    fn clear(&self) -> ResultEngine<bool> {
        Ok(self.slot()?.take().is_some())
    }
}
