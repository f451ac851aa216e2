//! # Directory Service エラー定義
//!
//! Directory Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! エラーレスポンスのボディはプレーンテキスト（`text/plain; charset=utf-8`）。
//! ステータスコードへの対応付けはこのモジュールだけが行う。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contactdir_infra::InfraError;
use thiserror::Error;

/// `email` クエリパラメータが欠けている場合のメッセージ
pub const MISSING_EMAIL_MESSAGE: &str =
    "When searching for a user, the email must be specified, e.g: '/search?email=homer@thesimpsons.com'";

/// 該当エントリがない場合のメッセージ
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Directory Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リクエストが不正
    #[error("{0}")]
    BadRequest(String),

    /// リソースが見つからない
    #[error("{0}")]
    NotFound(String),

    /// ストアでのエラー
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source:  InfraError,
    },
}

impl CoreError {
    /// `email` 未指定エラー
    pub fn missing_email() -> Self {
        Self::BadRequest(MISSING_EMAIL_MESSAGE.to_string())
    }

    /// エントリ未検出エラー
    pub fn user_not_found() -> Self {
        Self::NotFound(USER_NOT_FOUND_MESSAGE.to_string())
    }

    /// ストアエラーに文脈を付与する
    pub fn store(context: impl Into<String>, source: InfraError) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// 対応する HTTP ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let CoreError::Store { context, source } = &self {
            tracing::error!(
                error.kind = "store",
                error.span_trace = %source.span_trace(),
                "{}: {}",
                context,
                source
            );
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_bad_requestは400とメッセージを返す() {
        let response = CoreError::missing_email().into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, MISSING_EMAIL_MESSAGE);
    }

    #[tokio::test]
    async fn test_not_foundは404とメッセージを返す() {
        let response = CoreError::user_not_found().into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "User not found");
    }

    #[tokio::test]
    async fn test_storeエラーは500と文脈付きメッセージを返す() {
        let error = CoreError::store(
            "エントリ一覧の取得に失敗しました",
            InfraError::unexpected("connection refused"),
        );

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.starts_with("エントリ一覧の取得に失敗しました: "));
        assert!(body.contains("connection refused"));
    }
}
