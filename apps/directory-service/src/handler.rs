//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `directory`: 一覧取得、メールアドレス検索、未定義ルート

pub mod directory;

pub use directory::{
    DirectoryEntryResponse,
    DirectoryState,
    SearchQuery,
    list_entries,
    not_found,
    search_entry,
};
