//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! contactdir-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contactdir_domain::directory::{DirectoryEntry, Email};

use crate::{error::InfraError, repository::DirectoryRepository};

// ===== MockDirectoryRepository =====

#[derive(Clone, Default)]
pub struct MockDirectoryRepository {
    entries: Arc<Mutex<Vec<DirectoryEntry>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// 以降の呼び出しをすべて指定メッセージのエラーで失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    fn check_failure(&self) -> Result<(), InfraError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(InfraError::unexpected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DirectoryRepository for MockDirectoryRepository {
    async fn find_all(&self) -> Result<Vec<DirectoryEntry>, InfraError> {
        self.check_failure()?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<DirectoryEntry>, InfraError> {
        self.check_failure()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email() == email)
            .cloned())
    }
}
