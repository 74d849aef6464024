//! Persisted login identifiers.
//!
//! Stores the agent and buyer ids as JSON under the user config directory
//! so dashboard commands can address `/agent/.../{agentId}` endpoints.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::Actor;
use crate::error::{SessionError, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<String>,
}

impl Session {
    /// Agent actor for the stored id
    pub fn agent(&self) -> Result<Actor, ValidationError> {
        self.agent_id
            .clone()
            .map(Actor::Agent)
            .ok_or(ValidationError::NoSession)
    }

    pub fn buyer_id(&self) -> Result<&str, ValidationError> {
        self.buyer_id.as_deref().ok_or(ValidationError::NoSession)
    }
}

/// Session file location and access
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/propdesk/session.json` or the platform equivalent
    pub fn default_location() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("propdesk");
        Self::new(dir.join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Read the session. A missing file is an empty session.
    pub fn load(&self) -> Result<Session, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&raw).map_err(|source| SessionError::Malformed {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(session).map_err(|source| SessionError::Malformed {
            path: self.path.display().to_string(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let session = store.load().unwrap();

        assert_eq!(session, Session::default());
        assert_eq!(session.agent(), Err(ValidationError::NoSession));
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        let session = Session {
            agent_id: Some("ag-7".to_string()),
            buyer_id: None,
        };

        store.save(&session).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"agentId\": \"ag-7\""));
        assert_eq!(store.load().unwrap().agent(), Ok(Actor::Agent("ag-7".to_string())));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = SessionStore::new(path).load();

        assert!(matches!(result, Err(SessionError::Malformed { .. })));
    }
}
