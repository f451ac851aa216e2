//! # リポジトリ実装
//!
//! ストアへのアクセスをトレイトで抽象化し、その MySQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、MySQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod directory_repository;

pub use directory_repository::{DirectoryRepository, MySqlDirectoryRepository};
