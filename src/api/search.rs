use axum::extract::State;
use axum::Json;

use crate::llm::rank::LlmRanker;
use crate::matcher;
use crate::models::{SearchRequest, SearchResponse};
use crate::state::AppState;

/// POST /api/search - Intent-based discovery search:
///   1. Empty query → full catalog, no ranking call
///   2. Project skills to {name, outcomes} and ask the LLM to rank by intent
///   3. Resolve returned names against the catalog (unknown names dropped)
///   4. Append local substring-fallback matches the ranking missed
///
/// This endpoint never fails: any ranking-service problem degrades to the
/// deterministic substring search, flagged via `degraded` in the response.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let query = req.query.trim().to_string();

    // Token handed out before the external call so responses from
    // overlapping searches can be ordered by the caller.
    let generation = state.next_search_generation();

    let llm_config = state.llm_config.read().clone();
    let ranker = LlmRanker::new(state.http_client.clone(), llm_config);

    let outcome = matcher::discover(&ranker, &query, &state.catalog.skills).await;

    tracing::info!(
        "Search gen={generation} query={query:?}: {} ranked, {} fallback, degraded={}",
        outcome.ranked,
        outcome.fallback,
        outcome.degraded
    );

    Json(SearchResponse {
        query,
        generation,
        results: outcome.skills,
        ranked: outcome.ranked,
        fallback: outcome.fallback,
        degraded: outcome.degraded,
    })
}
