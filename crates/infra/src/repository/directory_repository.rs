//! # DirectoryRepository
//!
//! `directory` テーブルへの読み取り専用アクセスを担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: 一覧取得とメールアドレス検索の 2 クエリのみ
//! - **キャッシュなし**: すべての呼び出しで DB に問い合わせる
//! - **完全一致検索**: 列の照合順序に関わらず、メールアドレスは
//!   大文字・小文字を区別して比較する
//! - **先頭行優先**: 同じメールアドレスの行が複数あった場合は
//!   クエリが返した最初の行を採用する（通常は主キーで一意）

use async_trait::async_trait;
use contactdir_domain::directory::{DirectoryEntry, Email, PhoneNumber};
use sqlx::{MySqlPool, mysql::MySqlConnectOptions};

use crate::{db, error::InfraError};

/// ディレクトリリポジトリトレイト
///
/// ユースケース層はこのトレイト経由でストアにアクセスする。
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// 全エントリを取得する
    ///
    /// # 戻り値
    ///
    /// - `Ok(entries)`: ストアが返した順のエントリ（0 件なら空の Vec）
    /// - `Err(_)`: クエリの実行失敗、行のデコード失敗
    async fn find_all(&self) -> Result<Vec<DirectoryEntry>, InfraError>;

    /// メールアドレスでエントリを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(entry))`: エントリが見つかった場合
    /// - `Ok(None)`: エントリが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<DirectoryEntry>, InfraError>;
}

/// `directory` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct DirectoryRow {
    email:        String,
    phone_number: String,
}

impl DirectoryRow {
    fn into_entry(self) -> Result<DirectoryEntry, InfraError> {
        let email = Email::new(self.email).map_err(|e| InfraError::unexpected(e.to_string()))?;
        Ok(DirectoryEntry::new(email, PhoneNumber::new(self.phone_number)))
    }
}

/// クエリ結果から完全一致する最初の行を選ぶ
///
/// MySQL の既定照合順序は大文字・小文字を区別しないため、`WHERE email = ?` は
/// 大文字・小文字違いの行も返す。ここでバイト単位の一致に絞る。
fn select_exact(
    rows: Vec<DirectoryRow>,
    email: &Email,
) -> Result<Option<DirectoryEntry>, InfraError> {
    rows.into_iter()
        .find(|row| row.email == email.as_str())
        .map(DirectoryRow::into_entry)
        .transpose()
}

/// MySQL 実装の DirectoryRepository
///
/// 接続プールを所有する。プールはプロセス起動時に一度だけ作成され、
/// 終了時に [`close`](Self::close) で解放される。
#[derive(Debug, Clone)]
pub struct MySqlDirectoryRepository {
    pool: MySqlPool,
}

impl MySqlDirectoryRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// データベースに接続してリポジトリを作成する
    pub async fn connect(options: MySqlConnectOptions) -> Result<Self, InfraError> {
        let pool = db::create_pool(options).await?;
        Ok(Self::new(pool))
    }

    /// 内部の接続プールを取得する（マイグレーション実行用）
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// 接続プールを解放する
    ///
    /// 実行中のクエリの完了を待ってから全接続を閉じる。
    /// 既にクローズ済みの場合は [`InfraErrorKind::AlreadyClosed`](crate::error::InfraErrorKind::AlreadyClosed) を返す。
    pub async fn close(&self) -> Result<(), InfraError> {
        if self.pool.is_closed() {
            return Err(InfraError::already_closed());
        }
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl DirectoryRepository for MySqlDirectoryRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<DirectoryEntry>, InfraError> {
        let rows = sqlx::query_as::<_, DirectoryRow>("SELECT email, phone_number FROM directory")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(DirectoryRow::into_entry).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%email))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<DirectoryEntry>, InfraError> {
        let rows = sqlx::query_as::<_, DirectoryRow>(
            "SELECT email, phone_number FROM directory WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await?;

        select_exact(rows, email)
    }
}
