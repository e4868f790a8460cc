use askdocs_core::{Document, ScoredChunk, Session, DEFAULT_TOP_K};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    /// Matches before the relevance cutoff; stays nonzero when weak
    /// results were suppressed.
    pub total_matches: usize,
    pub results: Vec<ScoredChunk>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub documents: usize,
    pub chunks: usize,
}

#[derive(Serialize)]
pub struct LibraryResponse {
    pub documents: Vec<DocumentSummary>,
    pub chunks: usize,
}

#[derive(Serialize)]
pub struct DocumentSummary {
    pub filename: String,
    pub characters: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub min_score: f32,
}

pub fn build_app(min_score: f32) -> Router {
    let app_state = AppState {
        session: Arc::new(RwLock::new(Session::new())),
        min_score,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route(
            "/documents",
            get(list_documents)
                .post(upload_documents)
                .delete(clear_documents),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.max(1).min(100);

    let results = state.session.read().query(&params.q, k);
    let total_matches = results.len();
    // A best match below the threshold means nothing worth answering from.
    let results = match results.first() {
        Some(best) if best.score >= state.min_score => results,
        _ => Vec::new(),
    };

    tracing::debug!(query = %params.q, total_matches, returned = results.len(), "search");
    Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        total_matches,
        results,
    })
}

pub async fn upload_documents(
    State(state): State<AppState>,
    Json(documents): Json<Vec<Document>>,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    if documents.iter().all(|doc| doc.text.trim().is_empty()) {
        return Err((
            StatusCode::BAD_REQUEST,
            "no readable text detected in the uploaded documents".into(),
        ));
    }

    let mut session = state.session.write();
    let chunks = session.load_documents(documents);
    Ok(Json(UploadResponse {
        documents: session.documents().len(),
        chunks,
    }))
}

pub async fn list_documents(State(state): State<AppState>) -> Json<LibraryResponse> {
    let session = state.session.read();
    let documents = session
        .documents()
        .iter()
        .map(|doc| DocumentSummary {
            filename: doc.filename.clone(),
            characters: doc.text.chars().count(),
        })
        .collect();
    Json(LibraryResponse {
        documents,
        chunks: session.chunk_count(),
    })
}

pub async fn clear_documents(State(state): State<AppState>) -> StatusCode {
    state.session.write().clear();
    StatusCode::NO_CONTENT
}
