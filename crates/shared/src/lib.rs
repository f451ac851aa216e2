//! # ContactDir 共有ユーティリティ
//!
//! サービス横断で使用する Observability 基盤を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - HTTP / tracing への依存は `observability` feature の背後に置く

pub mod observability;
#[cfg(feature = "observability")]
pub mod request_log;
