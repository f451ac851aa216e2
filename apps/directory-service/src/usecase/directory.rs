//! # ディレクトリユースケース
//!
//! リポジトリへの薄い委譲。ストアのエラーには操作の文脈を付与する。

use std::sync::Arc;

use contactdir_domain::directory::{DirectoryEntry, Email};
use contactdir_infra::repository::DirectoryRepository;

use crate::error::CoreError;

/// ディレクトリユースケースの実装
pub struct DirectoryUseCaseImpl {
    repository: Arc<dyn DirectoryRepository>,
}

impl DirectoryUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self { repository }
    }

    /// 全エントリを取得する
    pub async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, CoreError> {
        self.repository
            .find_all()
            .await
            .map_err(|e| CoreError::store("エントリ一覧の取得に失敗しました", e))
    }

    /// メールアドレスでエントリを検索する
    pub async fn find_entry_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<DirectoryEntry>, CoreError> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(|e| CoreError::store("エントリの取得に失敗しました", e))
    }
}
