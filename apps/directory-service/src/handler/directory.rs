//! # ディレクトリハンドラ
//!
//! 連絡先ディレクトリの読み取りエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /users` - 全エントリ一覧
//! - `GET /search?email={email}` - メールアドレスによる検索

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use contactdir_domain::directory::{DirectoryEntry, Email};
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, usecase::DirectoryUseCase};

/// ディレクトリハンドラの共有状態
pub struct DirectoryState {
    pub usecase: Arc<dyn DirectoryUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// 検索クエリパラメータ
///
/// 同じキーが複数回現れても拒否しないよう、キーと値の組をそのまま保持する。
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(Vec<(String, String)>);

impl SearchQuery {
    /// 最初に現れた `email` の値
    pub fn email(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == "email")
            .map(|(_, value)| value.as_str())
    }
}

/// ディレクトリエントリのレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntryResponse {
    pub email:        String,
    pub phone_number: String,
}

impl From<DirectoryEntry> for DirectoryEntryResponse {
    fn from(entry: DirectoryEntry) -> Self {
        let (email, phone_number) = entry.into_parts();
        Self {
            email:        email.into_string(),
            phone_number: phone_number.into_string(),
        }
    }
}

// --- ハンドラ ---

/// GET /users
///
/// 全エントリを JSON 配列で返す。0 件の場合は `[]`。
pub async fn list_entries(
    State(state): State<Arc<DirectoryState>>,
) -> Result<impl IntoResponse, CoreError> {
    let entries = state.usecase.list_entries().await?;

    let response: Vec<DirectoryEntryResponse> = entries
        .into_iter()
        .map(DirectoryEntryResponse::from)
        .collect();

    Ok(Json(response))
}

/// GET /search?email={email}
///
/// メールアドレスに完全一致するエントリを返す。
///
/// - `email` が複数ある場合は最初の値を使う
/// - 最初の `email` が未指定・空、またはクエリ文字列が解釈不能 → 400
/// - 該当なし → 404
pub async fn search_entry(
    State(state): State<Arc<DirectoryState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CoreError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let email = query
        .email()
        .and_then(|raw| Email::new(raw).ok())
        .ok_or_else(CoreError::missing_email)?;

    let entry = state
        .usecase
        .find_entry_by_email(&email)
        .await?
        .ok_or_else(CoreError::user_not_found)?;

    Ok(Json(DirectoryEntryResponse::from(entry)))
}

/// 未定義のパス・メソッドに対するフォールバック
pub async fn not_found() -> CoreError {
    CoreError::NotFound("Not Found".to_string())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
        routing::get,
    };
    use contactdir_domain::directory::PhoneNumber;
    use contactdir_infra::InfraError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;
    use crate::error::MISSING_EMAIL_MESSAGE;

    // テスト用スタブ
    struct StubDirectoryUseCase {
        entries: Vec<DirectoryEntry>,
        fail:    bool,
    }

    impl StubDirectoryUseCase {
        fn with_entries(entries: Vec<DirectoryEntry>) -> Self {
            Self {
                entries,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                entries: Vec::new(),
                fail:    true,
            }
        }

        fn store_error(&self) -> CoreError {
            CoreError::store(
                "エントリの取得に失敗しました",
                InfraError::unexpected("connection refused"),
            )
        }
    }

    #[async_trait]
    impl DirectoryUseCase for StubDirectoryUseCase {
        async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, CoreError> {
            if self.fail {
                return Err(self.store_error());
            }
            Ok(self.entries.clone())
        }

        async fn find_entry_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<DirectoryEntry>, CoreError> {
            if self.fail {
                return Err(self.store_error());
            }
            Ok(self.entries.iter().find(|e| e.email() == email).cloned())
        }
    }

    fn homer() -> DirectoryEntry {
        DirectoryEntry::new(
            Email::new("homer@thesimpsons.com").unwrap(),
            PhoneNumber::new("+1 888 123 1111"),
        )
    }

    fn create_test_app(usecase: StubDirectoryUseCase) -> Router {
        let state = Arc::new(DirectoryState {
            usecase: Arc::new(usecase),
        });

        Router::new()
            .route("/users", get(list_entries))
            .route("/search", get(search_entry))
            .with_state(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_list_entries_全エントリをjsonで返す() {
        // Given
        let sut = create_test_app(StubDirectoryUseCase::with_entries(vec![homer()]));

        // When
        let response = sut.oneshot(get_request("/users")).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_text(response).await,
            r#"[{"email":"homer@thesimpsons.com","phoneNumber":"+1 888 123 1111"}]"#
        );
    }

    #[tokio::test]
    async fn test_list_entries_0件なら空配列を返す() {
        let sut = create_test_app(StubDirectoryUseCase::with_entries(Vec::new()));

        let response = sut.oneshot(get_request("/users")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn test_list_entries_ストアエラーで500を返す() {
        let sut = create_test_app(StubDirectoryUseCase::failing());

        let response = sut.oneshot(get_request("/users")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_search_entry_一致するエントリを返す() {
        let sut = create_test_app(StubDirectoryUseCase::with_entries(vec![homer()]));

        let response = sut
            .oneshot(get_request("/search?email=homer@thesimpsons.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        let json: DirectoryEntryResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(json, DirectoryEntryResponse::from(homer()));
    }

    #[tokio::test]
    async fn test_search_entry_パーセントエンコードされたメールアドレスを復号する() {
        let sut = create_test_app(StubDirectoryUseCase::with_entries(vec![homer()]));

        let response = sut
            .oneshot(get_request("/search?email=homer%40thesimpsons.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case::パラメータなし("/search")]
    #[case::空文字列("/search?email=")]
    #[case::別のパラメータのみ("/search?name=homer")]
    #[case::最初のemailが空("/search?email=&email=homer@thesimpsons.com")]
    #[tokio::test]
    async fn test_search_entry_emailがなければ400を返す(#[case] uri: &str) {
        // ストアが失敗する状態でも 400 になる
        let sut = create_test_app(StubDirectoryUseCase::failing());

        let response = sut.oneshot(get_request(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, MISSING_EMAIL_MESSAGE);
    }

    #[rstest]
    #[case::後続の値は無視("/search?email=homer@thesimpsons.com&email=x@y.z")]
    #[case::後続の空値は無視("/search?email=homer@thesimpsons.com&email=")]
    #[case::他のパラメータと併用("/search?name=x&email=homer@thesimpsons.com")]
    #[tokio::test]
    async fn test_search_entry_emailが複数あれば最初の値で検索する(#[case] uri: &str) {
        let sut = create_test_app(StubDirectoryUseCase::with_entries(vec![homer()]));

        let response = sut.oneshot(get_request(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: DirectoryEntryResponse =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json.email, "homer@thesimpsons.com");
    }

    #[tokio::test]
    async fn test_search_entry_該当なしで404を返す() {
        let sut = create_test_app(StubDirectoryUseCase::with_entries(vec![homer()]));

        let response = sut
            .oneshot(get_request("/search?email=unknown@example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "User not found");
    }

    #[tokio::test]
    async fn test_search_entry_大文字小文字が異なれば404を返す() {
        let sut = create_test_app(StubDirectoryUseCase::with_entries(vec![homer()]));

        let response = sut
            .oneshot(get_request("/search?email=HOMER@thesimpsons.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_entry_ストアエラーで500を返す() {
        let sut = create_test_app(StubDirectoryUseCase::failing());

        let response = sut
            .oneshot(get_request("/search?email=homer@thesimpsons.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "エントリの取得に失敗しました: 予期しないエラー: connection refused"
        );
    }

    #[test]
    fn test_レスポンスのjsonフィールド名はemailとphone_numberのキャメルケース() {
        let response = DirectoryEntryResponse::from(homer());

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "email": "homer@thesimpsons.com",
                "phoneNumber": "+1 888 123 1111"
            })
        );
        let parsed: DirectoryEntryResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, response);
    }
}
