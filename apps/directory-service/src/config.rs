//! # Directory Service 設定
//!
//! 環境変数から Directory Service サーバーの設定を読み込む。
//!
//! 未設定・空文字列・パース不能な値はすべてデフォルト値にフォールバックする。
//! 設定の読み込みで起動が失敗することはない。

use std::{env, fmt, str::FromStr};

use sqlx::mysql::MySqlConnectOptions;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8123;
const DEFAULT_DATABASE_HOST: &str = "127.0.0.1";
const DEFAULT_DATABASE_PORT: u16 = 3306;
const DEFAULT_DATABASE_NAME: &str = "users";
const DEFAULT_DATABASE_USER: &str = "users_service";
const DEFAULT_DATABASE_PASSWORD: &str = "123";

/// Directory Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    /// データベース接続設定
    pub database: DatabaseConfig,
}

/// データベース接続設定
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host:           String,
    pub port:           u16,
    pub name:           String,
    pub user:           String,
    pub password:       String,
    /// 起動時に `migrations/` を適用するか
    pub run_migrations: bool,
}

// パスワードをログに出さない
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"********")
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl DatabaseConfig {
    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

impl DirectoryConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` が `None` または空文字列を返したキーはデフォルト値になる。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            host:     get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:     parse_or(get("PORT"), "PORT", DEFAULT_PORT),
            database: DatabaseConfig {
                host:           get("DATABASE_HOST")
                    .unwrap_or_else(|| DEFAULT_DATABASE_HOST.to_string()),
                port:           parse_or(
                    get("DATABASE_PORT"),
                    "DATABASE_PORT",
                    DEFAULT_DATABASE_PORT,
                ),
                name:           get("DATABASE_NAME")
                    .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
                user:           get("DATABASE_USER")
                    .unwrap_or_else(|| DEFAULT_DATABASE_USER.to_string()),
                password:       get("DATABASE_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_DATABASE_PASSWORD.to_string()),
                run_migrations: parse_or(
                    get("DATABASE_RUN_MIGRATIONS"),
                    "DATABASE_RUN_MIGRATIONS",
                    false,
                ),
            },
        }
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 値をパースし、失敗した場合は警告を出してデフォルト値を返す
fn parse_or<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "{key} の値 {raw:?} を解釈できないため、デフォルト値 {default} を使用します"
            );
            default
        }),
        None => default,
    }
}
