use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use search_core::{InvertedIndex, QueryEngine, StopwordSource, Tokenizer};
use search_pages::Site;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub terms: Vec<String>,
    pub diagnostic: Option<String>,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: u32,
    pub file_name: String,
    pub score: f64,
    pub url: Option<String>,
    pub links: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub vocabulary_size: usize,
    pub total_hyperlinks: usize,
    pub top_terms: Vec<TermCount>,
}

#[derive(Serialize)]
pub struct TermCount {
    pub term: String,
    pub documents: u32,
}

/// Built once at startup, shared read-only between requests.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<Site>,
    pub index: Arc<InvertedIndex>,
}

impl AppState {
    pub fn load(webpages_dir: &str, stopwords: &StopwordSource) -> Result<Self> {
        let site = Site::load(webpages_dir)?;
        let index = site.build_index(Tokenizer::new(stopwords.load()?))?;
        Ok(Self { site: Arc::new(site), index: Arc::new(index) })
    }
}

pub fn build_app(webpages_dir: &str, stopwords: &StopwordSource) -> Result<Router> {
    let state = AppState::load(webpages_dir, stopwords)?;
    tracing::info!(num_docs = state.index.num_docs(), "index ready");
    Ok(router(state))
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
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let outcome = QueryEngine::new(&state.index).search(&params.q);
    let total_hits = outcome.hits.len();
    let k = params.k.clamp(1, 100);

    let results = outcome
        .hits
        .into_iter()
        .take(k)
        .map(|hit| SearchHit {
            url: state.site.url(&hit.external_id).map(str::to_string),
            links: state.site.links(&hit.external_id).map(|l| l.len()).unwrap_or(0),
            doc_id: hit.doc_id,
            file_name: hit.external_id,
            score: hit.score,
        })
        .collect();

    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, total_hits, took_s, "search served");
    Json(SearchResponse {
        query: params.q,
        took_s,
        terms: outcome.terms,
        diagnostic: outcome.diagnostic.map(|d| d.to_string()),
        total_hits,
        results,
    })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let top_terms = state
        .index
        .top_terms(10)
        .into_iter()
        .map(|(term, documents)| TermCount { term, documents })
        .collect();
    Json(StatsResponse {
        total_documents: state.index.num_docs(),
        vocabulary_size: state.index.vocabulary_size(),
        total_hyperlinks: state.site.total_links(),
        top_terms,
    })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<u32>) -> Result<Json<serde_json::Value>, StatusCode> {
    let stats = state.index.doc(doc_id).ok_or(StatusCode::NOT_FOUND)?;
    let page = state.site.page(&stats.external_id);
    Ok(Json(serde_json::json!({
        "doc_id": doc_id,
        "file_name": stats.external_id,
        "title": page.map(|p| p.title.as_str()),
        "url": state.site.url(&stats.external_id),
        "length": stats.length,
        "unique_terms": stats.term_counts.len(),
        "links": page.map(|p| &p.links),
    })))
}
