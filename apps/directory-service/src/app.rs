//! # アプリケーション構築
//!
//! ルーターとミドルウェアの構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## レイヤー構成
//!
//! ```text
//! TraceLayer → RequestLogLayer → Router → handler
//! ```
//!
//! 定義済みのパスでも GET / HEAD 以外のメソッドは 404 を返す。

use std::sync::Arc;

use axum::{Router, routing::get};
use contactdir_shared::{observability::make_request_span, request_log::RequestLogLayer};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{DirectoryState, list_entries, not_found, search_entry},
    usecase::DirectoryUseCase,
};

/// ルーターを構築する
pub fn build_app(usecase: Arc<dyn DirectoryUseCase>) -> Router {
    let state = Arc::new(DirectoryState { usecase });

    Router::new()
        .route("/users", get(list_entries).fallback(not_found))
        .route("/search", get(search_entry).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(RequestLogLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
