//! # ContactDir インフラ層
//!
//! 外部システム（MySQL）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! リポジトリトレイトとその具体的な実装を提供する。外部システムの詳細を
//! カプセル化し、ユースケース層をインフラの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - MySQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと MySQL 実装
//! - `mock` - インメモリモック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use contactdir_infra::repository::{DirectoryRepository, MySqlDirectoryRepository};
//!
//! async fn setup(options: sqlx::mysql::MySqlConnectOptions) -> Result<(), contactdir_infra::InfraError> {
//!     let repository = MySqlDirectoryRepository::connect(options).await?;
//!     let entries = repository.find_all().await?;
//!     repository.close().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod repository;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
