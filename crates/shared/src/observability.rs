//! # Observability 基盤
//!
//! tracing subscriber の初期化と、サービス・リクエスト単位のスパン生成を提供する。
//!
//! 出力形式は環境変数 `LOG_FORMAT`（`json` / `pretty`）で、
//! ログレベルは `RUST_LOG` で切り替える。

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,contactdir=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON オブジェクト（本番環境向け）
    Json,
    /// 人間向けの整形出力
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値から出力形式を決める
    ///
    /// 未設定・空文字列は `Pretty`。未知の値も `Pretty` にして stderr に警告する
    /// （subscriber 初期化前なので tracing には出せない）。
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("pretty") => Self::Pretty,
            Some("json") => Self::Json,
            Some(other) => {
                eprintln!("WARNING: LOG_FORMAT={other:?} は未対応のため pretty で出力します");
                Self::Pretty
            }
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// すべてのログに付与されるサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    /// 環境変数 `LOG_FORMAT` を読んで設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let log_format = std::env::var("LOG_FORMAT").ok();
        Self {
            service_name: service_name.into(),
            log_format:   LogFormat::from_value(log_format.as_deref()),
        }
    }

    /// プロセス全体を覆う `app` スパン
    ///
    /// JSON 出力では `span.service` としてサービス名が出力される。
    #[cfg(feature = "observability")]
    pub fn service_span(&self) -> tracing::Span {
        tracing::info_span!("app", service = %self.service_name)
    }
}

/// subscriber を登録し、サービススパンに入った状態を返す
///
/// 返り値のガードを `main` の終わりまで保持すること。
/// `tracing_error::ErrorLayer` を登録するため、インフラ層のエラーが捕捉した
/// `SpanTrace` にはスパン情報が含まれる。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) -> tracing::span::EnteredSpan {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    config.service_span().entered()
}

/// TraceLayer 用のリクエストスパンを作成する
///
/// `TraceLayer::new_for_http().make_span_with(make_request_span)` として使用する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
    )
}
