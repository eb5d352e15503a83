use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// One ranked hit on the wire. Field names follow the response format the
/// frontend consumes: kebab-case for the multi-word keys.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: f64,
    #[serde(rename = "doc-size")]
    pub doc_size: u64,
    pub snippet: String,
    #[serde(rename = "term-scores")]
    pub term_scores: Vec<f64>,
}
