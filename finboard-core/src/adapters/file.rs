//! Saved-response source
//!
//! Reads a `/transactions` response body that was saved to disk, for
//! viewing the dashboard offline.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::domain::TransactionsPayload;
use crate::ports::TransactionSource;

#[derive(Debug)]
pub struct FileTransactionSource {
    path: PathBuf,
}

impl FileTransactionSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TransactionSource for FileTransactionSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_transactions(&self) -> Result<TransactionsPayload> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::fetch(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
