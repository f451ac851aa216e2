//! # Directory Service サーバー
//!
//! 連絡先ディレクトリ（メールアドレスと電話番号の組）を HTTP で公開する
//! 読み取り専用 API サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |----------|------|------|
//! | GET | `/users` | 全エントリの JSON 配列 |
//! | GET | `/search?email=...` | メールアドレスに完全一致するエントリ |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `8123`） |
//! | `DATABASE_HOST` | No | MySQL ホスト（デフォルト: `127.0.0.1`） |
//! | `DATABASE_PORT` | No | MySQL ポート（デフォルト: `3306`） |
//! | `DATABASE_NAME` | No | スキーマ名（デフォルト: `users`） |
//! | `DATABASE_USER` | No | ユーザー名（デフォルト: `users_service`） |
//! | `DATABASE_PASSWORD` | No | パスワード（デフォルト: `123`） |
//! | `DATABASE_RUN_MIGRATIONS` | No | 起動時にマイグレーションを適用（デフォルト: `false`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（MySQL を起動し、スキーマとシードデータを適用）
//! # （MySQL 8 が 127.0.0.1:3306 で起動している前提）
//! DATABASE_RUN_MIGRATIONS=true cargo run -p contactdir-service
//!
//! # 本番環境
//! LOG_FORMAT=json PORT=8123 DATABASE_HOST=... cargo run -p contactdir-service --release
//! ```

use std::sync::Arc;

use contactdir_infra::{
    db,
    repository::{DirectoryRepository, MySqlDirectoryRepository},
};
use contactdir_service::{build_app, config::DirectoryConfig, usecase::DirectoryUseCaseImpl};
use contactdir_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Directory Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("directory-service");
    let _tracing_guard = init_tracing(&tracing_config);

    // 設定読み込み
    let config = DirectoryConfig::from_env();
    tracing::debug!(?config, "設定を読み込みました");

    // データベース接続
    let repository = MySqlDirectoryRepository::connect(config.database.connect_options())
        .await
        .inspect_err(|e| {
            tracing::error!(
                "データベースに接続できませんでした: {}:{}: {}",
                config.database.host,
                config.database.port,
                e
            );
        })?;
    tracing::info!(
        "データベースに接続しました: {}:{}/{}",
        config.database.host,
        config.database.port,
        config.database.name
    );

    let result = serve(&config, &repository).await;

    // 成否に関わらず接続プールを解放する
    if let Err(e) = repository.close().await {
        tracing::warn!("接続プールのクローズに失敗しました: {}", e);
    } else {
        tracing::info!("データベース接続をクローズしました");
    }

    result
}

/// マイグレーション適用からサーバー停止までを実行する
async fn serve(
    config: &DirectoryConfig,
    repository: &MySqlDirectoryRepository,
) -> anyhow::Result<()> {
    if config.database.run_migrations {
        db::run_migrations(repository.pool())
            .await
            .inspect_err(|e| tracing::error!("マイグレーションの実行に失敗しました: {}", e))?;
        tracing::info!("マイグレーションを適用しました");
    }

    // 依存コンポーネントを初期化
    let directory_repo: Arc<dyn DirectoryRepository> = Arc::new(repository.clone());
    let usecase = DirectoryUseCaseImpl::new(directory_repo);
    let app = build_app(Arc::new(usecase));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .inspect_err(|e| tracing::error!("{} にバインドできませんでした: {}", addr, e))?;
    tracing::info!("Directory Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("サーバーを停止しました");
    Ok(())
}

/// 終了シグナル（Ctrl+C, SIGTERM）を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラを登録できませんでした: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラを登録できませんでした: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C を受信しました。シャットダウンします"),
        _ = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
