//! # ContactDir ドメイン層
//!
//! 連絡先ディレクトリのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`directory`] - ディレクトリエントリと値オブジェクト
//! - [`error`] - ドメイン層で発生するエラーの定義

pub mod directory;
pub mod error;

pub use error::DomainError;
