use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use recsys_core::{load_catalog, EngineConfig, Item, RecommendError, Recommendation, Recommender};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_RESULTS: usize = 100;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub title: String,
    #[serde(default = "default_n")]
    pub n: usize,
}
fn default_n() -> usize { 10 }

#[derive(Serialize)]
pub struct RecommendResponse {
    pub seed: String,
    pub took_s: f64,
    pub results: Vec<Recommendation>,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub row: usize,
    #[serde(flatten)]
    pub item: Item,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Read-only model plus the catalog rows it was built from.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub items: Arc<Vec<Item>>,
}

impl AppState {
    pub fn from_items(items: Vec<Item>, config: &EngineConfig) -> Self {
        let recommender = Recommender::build(&items, config);
        Self { recommender: Arc::new(recommender), items: Arc::new(items) }
    }
}

pub fn build_app(catalog: &str, config: &EngineConfig) -> Result<Router> {
    // Fit the model once at startup
    let items = load_catalog(catalog)?;
    Ok(router(AppState::from_items(items, config)))
}

pub fn router(state: AppState) -> Router {
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
        .route("/recommend", get(recommend_handler))
        .route("/item/:row", get(item_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn error_response(err: RecommendError) -> ApiError {
    let status = match err {
        RecommendError::NotFound { .. } | RecommendError::RowOutOfRange { .. } => StatusCode::NOT_FOUND,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let start = std::time::Instant::now();
    let n = params.n.min(MAX_RESULTS);
    let results = state.recommender.recommend_scored(&params.title, n).map_err(|err| {
        tracing::info!(title = %params.title, "unknown seed title");
        error_response(err)
    })?;
    let elapsed = start.elapsed();
    Ok(Json(RecommendResponse { seed: params.title, took_s: elapsed.as_secs_f64(), results }))
}

pub async fn item_handler(State(state): State<AppState>, Path(row): Path<usize>) -> Result<Json<ItemResponse>, ApiError> {
    match state.items.get(row) {
        Some(item) => Ok(Json(ItemResponse { row, item: item.clone() })),
        None => Err(error_response(RecommendError::RowOutOfRange { row, len: state.items.len() })),
    }
}
