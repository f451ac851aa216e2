//! # MySQL データベース接続管理
//!
//! データベース接続プールの作成とマイグレーションを行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 起動時に一度だけ作成し、全リクエストで共有する。
//!   同時クエリの安全性は `MySqlPool` に委ねる
//! - **接続情報は構造化して渡す**: URL 文字列を組み立てず、
//!   `MySqlConnectOptions` で渡す（パスワード中の記号をエスケープしなくてよい）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use contactdir_infra::db;
//! use sqlx::mysql::MySqlConnectOptions;
//!
//! async fn example() -> Result<(), sqlx::Error> {
//!     let options = MySqlConnectOptions::new()
//!         .host("127.0.0.1")
//!         .port(3306)
//!         .username("users_service")
//!         .password("123")
//!         .database("users");
//!     let pool = db::create_pool(options).await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM directory")
//!         .fetch_one(&pool)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use sqlx::{
    MySqlPool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
};

/// データベースマイグレーションを実行する
///
/// `sqlx::migrate!()` マクロで埋め込まれたマイグレーションファイルを
/// 順番に適用する。適用済みのマイグレーションはスキップされる。
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// MySQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// アプリケーション全体で共有する。
///
/// 接続を 1 本確立してから返すため、ホストに到達できない・認証に失敗する
/// といった問題はここでエラーになる。
///
/// # 設定値
///
/// - `max_connections(10)`: 最大接続数
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
pub async fn create_pool(options: MySqlConnectOptions) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}
