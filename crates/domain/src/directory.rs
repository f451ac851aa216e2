//! # ディレクトリエントリ
//!
//! 連絡先ディレクトリの 1 件分のデータ（メールアドレスと電話番号の組）を定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: メールアドレスと電話番号を別の型にし、取り違えを防ぐ
//! - **検索キーは完全一致**: `Email` は正規化（trim、小文字化）を行わない。
//!   どのキーが存在するかを決めるのはストア側であり、ドメイン層は形式を強制しない
//! - **読み取り専用**: エントリの作成・更新はこのシステムの外で行われる
//!
//! ## 使用例
//!
//! ```rust
//! use contactdir_domain::directory::{DirectoryEntry, Email, PhoneNumber};
//!
//! # fn main() -> Result<(), contactdir_domain::DomainError> {
//! let entry = DirectoryEntry::new(
//!     Email::new("homer@thesimpsons.com")?,
//!     PhoneNumber::new("+1 888 123 1111"),
//! );
//!
//! assert_eq!(entry.email().as_str(), "homer@thesimpsons.com");
//! assert_eq!(entry.phone_number().as_str(), "+1 888 123 1111");
//! # Ok(())
//! # }
//! ```

use derive_more::Display;

use crate::DomainError;

/// メールアドレス（値オブジェクト）
///
/// ディレクトリの検索キー。大文字・小文字を区別する完全一致で比較される。
///
/// # 不変条件
///
/// - 空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # エラー
    ///
    /// 空文字列の場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// 電話番号（値オブジェクト）
///
/// 書式は自由で、システムは中身を解釈しない。
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ディレクトリエントリ（エンティティ）
///
/// `directory` テーブルの 1 行に対応する。
///
/// # 不変条件
///
/// - `email` はディレクトリ内で一意（ストアの主キーで保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    email:        Email,
    phone_number: PhoneNumber,
}

impl DirectoryEntry {
    pub fn new(email: Email, phone_number: PhoneNumber) -> Self {
        Self {
            email,
            phone_number,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    /// エントリを構成要素に分解する
    pub fn into_parts(self) -> (Email, PhoneNumber) {
        (self.email, self.phone_number)
    }
}
