//! File-backed credential store
//!
//! The token is kept in `session.json` in the lmsctl directory under the
//! `lms-token` key, the same key the web client uses for its local storage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::SessionCredential;
use crate::ports::CredentialStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "lms-token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Credential store backed by `session.json`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(lmsctl_dir: &Path) -> Self {
        Self {
            path: lmsctl_dir.join("session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a credential obtained at sign-in
    pub fn save(&self, credential: &SessionCredential) -> Result<()> {
        if credential.token().trim().is_empty() {
            return Err(Error::validation("Token cannot be empty"));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = SessionFile {
            token: Some(credential.token().to_string()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<SessionCredential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: SessionFile = serde_json::from_str(&content)
            .map_err(|e| Error::credential(format!("Invalid session file: {}", e)))?;

        Ok(file
            .token
            .filter(|t| !t.is_empty())
            .map(SessionCredential::new))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_no_credential() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_save_get_clear() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());

        store.save(&SessionCredential::new("abc")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().token(), "abc");

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"lms-token\""));

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_reject_empty_token() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        let result = store.save(&SessionCredential::new("  "));
        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();

        let result = store.get();
        assert!(matches!(result, Err(Error::Credential(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        store.save(&SessionCredential::new("abc")).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
