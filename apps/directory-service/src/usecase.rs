//! # ユースケース層
//!
//! Directory Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラを DB なしでテストできるようトレイトを定義
//! - **依存性注入**: リポジトリを外部から注入
//! - **薄いハンドラ**: ハンドラは HTTP の入出力変換のみを担当する

pub mod directory;

use async_trait::async_trait;
use contactdir_domain::directory::{DirectoryEntry, Email};
pub use directory::DirectoryUseCaseImpl;

use crate::error::CoreError;

/// ディレクトリユースケーストレイト
///
/// 具体的な実装は `DirectoryUseCaseImpl` で提供される。
#[async_trait]
pub trait DirectoryUseCase: Send + Sync {
    /// 全エントリを取得する
    ///
    /// エントリが 0 件の場合は空の Vec を返す（エラーではない）。
    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, CoreError>;

    /// メールアドレスでエントリを検索する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(Some(entry))`: 完全一致するエントリ
    /// - `Ok(None)`: 該当なし
    /// - `Err(CoreError::Store)`: ストアのエラー
    async fn find_entry_by_email(&self, email: &Email)
    -> Result<Option<DirectoryEntry>, CoreError>;
}

/// DirectoryUseCaseImpl に DirectoryUseCase トレイトを実装
#[async_trait]
impl DirectoryUseCase for DirectoryUseCaseImpl {
    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, CoreError> {
        self.list_entries().await
    }

    async fn find_entry_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<DirectoryEntry>, CoreError> {
        self.find_entry_by_email(email).await
    }
}
