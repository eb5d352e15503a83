use axum::{Json, extract::Query, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::query_engine::QueryEngine;

use super::models::{SearchHit, SearchParams};

pub async fn search_handler(
    State(query_engine): State<Arc<QueryEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, (StatusCode, String)> {
    let start = Instant::now();

    let query = match params.q {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "missing search query in URL params".to_string(),
            ));
        }
    };

    let scored = query_engine.search(&query).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search error: {}", e),
        )
    })?;

    let hits: Vec<SearchHit> = scored
        .into_iter()
        .map(|result| SearchHit {
            score: result.score,
            doc_size: result.doc_terms,
            snippet: query_engine.corpus().document_text(result.doc).to_string(),
            term_scores: result.term_scores,
        })
        .collect();

    log::debug!(
        "served query {:?}: {} hits in {}ms",
        query,
        hits.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(hits))
}
