//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//!
//! ## 使用例
//!
//! ```rust
//! use contactdir_domain::DomainError;
//!
//! fn validate_email(email: &str) -> Result<(), DomainError> {
//!     if email.is_empty() {
//!         return Err(DomainError::Validation("メールアドレスは必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 値オブジェクトの不変条件に違反した場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
