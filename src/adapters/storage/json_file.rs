//! JSON File Persistence Adapter
//!
//! One pretty-printed JSON record per account at
//! `{data_dir}/accounts/user_{email}.json`. Writes go to a temporary file
//! first and are renamed into place.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::account::UserAccount;
use crate::domain::foundation::Email;
use crate::ports::{PersistenceError, PersistenceGateway};

const ACCOUNTS_DIR: &str = "accounts";

/// File-based account store.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    data_dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl JsonFilePersistence {
    /// Create a store rooted at `data_dir`.
    ///
    /// # Example
    /// ```ignore
    /// let storage = JsonFilePersistence::new("./data").with_quota(5 * 1024 * 1024);
    /// ```
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            quota_bytes: None,
        }
    }

    /// Caps the combined size of all account records.
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    fn accounts_dir(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_DIR)
    }

    /// Path of the record for `email`.
    pub fn record_path(&self, email: &Email) -> PathBuf {
        self.accounts_dir()
            .join(format!("user_{}.json", email.as_str()))
    }

    /// Bytes used by every record except `exclude`.
    async fn used_bytes(&self, exclude: &Path) -> Result<u64, PersistenceError> {
        let mut entries = match fs::read_dir(self.accounts_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(map_io("Failed to list records", e)),
        };

        let mut used = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| map_io("Failed to list records", e))?
        {
            let path = entry.path();
            if path == exclude || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| map_io("Failed to stat record", e))?;
            used += metadata.len();
        }
        Ok(used)
    }

    async fn check_quota(&self, path: &Path, record_len: u64) -> Result<(), PersistenceError> {
        let Some(limit) = self.quota_bytes else {
            return Ok(());
        };
        let needed = self.used_bytes(path).await? + record_len;
        if needed > limit {
            return Err(PersistenceError::QuotaExceeded { needed, limit });
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for JsonFilePersistence {
    async fn load(&self, email: &Email) -> Result<Option<UserAccount>, PersistenceError> {
        let path = self.record_path(email);

        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io("Cannot read record", e)),
        };

        let account = serde_json::from_str(&json)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        Ok(Some(account))
    }

    async fn save(&self, account: &UserAccount) -> Result<(), PersistenceError> {
        let path = self.record_path(account.email());
        let json = serde_json::to_string_pretty(account)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        self.check_quota(&path, json.len() as u64).await?;

        fs::create_dir_all(self.accounts_dir())
            .await
            .map_err(|e| map_io("Failed to create directory", e))?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| map_io("Failed to write temporary file", e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| map_io("Failed to rename file", e))?;

        tracing::debug!(email = %account.email(), path = %path.display(), "account saved");
        Ok(())
    }

    async fn delete(&self, email: &Email) -> Result<(), PersistenceError> {
        match fs::remove_file(self.record_path(email)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io("Cannot delete record", e)),
        }
    }
}

fn map_io(context: &str, err: io::Error) -> PersistenceError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        PersistenceError::PermissionDenied(format!("{}: {}", context, err))
    } else {
        PersistenceError::Io(format!("{}: {}", context, err))
    }
}
