//! Persisted admin session
//!
//! Every CLI invocation is a fresh process, so the signed-in session is kept
//! in a JSON file between runs and handed back to the client's session object
//! before any gated command runs.

use std::path::{Path, PathBuf};

use salon_client::{RestClient, Session};
use thiserror::Error;

/// Default location, relative to the working directory
pub const DEFAULT_SESSION_FILE: &str = ".salon-admin/session.json";

#[derive(Debug, Error)]
pub enum SessionFileError {
    /// No session file, or the stored session has expired
    #[error("Authentication required: run `salon-admin login` first")]
    AuthenticationRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session file on disk
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionFileError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Stored session, `None` when there is no file
    pub fn load(&self) -> Result<Option<Session>, SessionFileError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn delete(&self) -> Result<(), SessionFileError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::debug!(path = %self.path.display(), "Session removed");
        }
        Ok(())
    }

    /// Hand the stored session to `client`. Fails when there is none or it
    /// has expired; an expired file is removed.
    pub async fn restore_into(&self, client: &RestClient) -> Result<Session, SessionFileError> {
        let Some(session) = self.load()? else {
            return Err(SessionFileError::AuthenticationRequired);
        };
        if !client.session().restore(session.clone()).await {
            self.delete()?;
            return Err(SessionFileError::AuthenticationRequired);
        }
        Ok(session)
    }
}
