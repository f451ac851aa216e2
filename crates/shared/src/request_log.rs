//! # リクエストログミドルウェア
//!
//! すべての HTTP リクエストについて、ハンドラに委譲する前にメソッドとパスを記録し、
//! 完了時にステータスとレイテンシを記録する tower Layer。
//!
//! ## TraceLayer との責務分離
//!
//! - TraceLayer: スパン作成（method, uri）。リクエストスコープのコンテキスト管理
//! - RequestLogLayer: 受信ログ（method, path）と完了ログ（status, latency）の出力
//!
//! TraceLayer のスパン内に配置することで、スパンフィールドが JSON ログに含まれる。
//!
//! ```text
//! TraceLayer → RequestLogLayer → Router → handler
//! ```

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// リクエストログを出力する Layer
#[derive(Clone, Debug)]
pub struct RequestLogLayer;

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService { inner }
    }
}

/// リクエストログを出力する Service
///
/// [`RequestLogLayer`] が生成する Service 実装。
#[derive(Clone, Debug)]
pub struct RequestLogService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // clone-swap パターン: poll_ready で得た readiness を保持する inner を使う
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        tracing::info!(
            http.method = req.method().as_str(),
            http.path = req.uri().path(),
            "リクエスト受信"
        );

        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => {
                    tracing::info!(
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "リクエスト完了"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        http.latency_ms = latency_ms,
                        error.message = %err,
                        "リクエスト処理エラー"
                    );
                }
            }

            result
        })
    }
}
