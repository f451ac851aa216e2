//! # Directory Service ライブラリ
//!
//! 連絡先ディレクトリを HTTP で公開する読み取り専用サービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app`: ルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: ビジネスロジック

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

pub use app::build_app;
