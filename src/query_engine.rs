use anyhow::Result;

use crate::analyzer::TextAnalyzer;
use crate::corpus::{Corpus, DocId};
use crate::index::CorpusIndex;

/// TF-IDF ranking over the corpus index.
///
/// Every document is scored against every query token:
/// ```text
///     idf(t)        = Nd / (df(t) + 1)
///     tf(t, d)      = TF(t, d) + sum over k in 1..window of (k + 1) * TF(ngram(t..t+k), d)
///     score(t, d)   = (tf / Nt) * ln(idf)
/// ```
/// where `Nd` is the corpus document count and `Nt` the document's token
/// count, regularized so documents under 100 tokens score as if they had
/// `Nt + 100`. The n-gram sum rewards documents containing the query tokens
/// adjacently. `ln(idf)` goes to zero (or below) for terms present in most
/// documents, so such terms contribute nothing; only documents with a
/// positive total score are returned.
pub struct QueryEngine {
    corpus: Corpus,
    index: CorpusIndex,
    analyzer: TextAnalyzer,
}

/// One ranked document with its per-query-token score breakdown.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub doc: DocId,
    pub score: f64,
    pub term_scores: Vec<f64>,
    pub doc_terms: u64,
}

impl QueryEngine {
    pub fn new(corpus: Corpus, index: CorpusIndex, analyzer: TextAnalyzer) -> Self {
        Self {
            corpus,
            index,
            analyzer,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn search(&self, query: &str) -> Result<Vec<ScoredDocument>> {
        // Queries go through the same pipeline as documents.
        let text_tokens = self.analyzer.analyze(query.to_string())?;

        let tokens = text_tokens
            .iter()
            .map(|t| t.term.clone())
            .collect::<Vec<String>>();

        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let num_docs = self.corpus.doc_count() as f64;
        let window = self.index.ngram_window();
        let mut results: Vec<ScoredDocument> = Vec::new();

        for doc in 0..self.corpus.doc_count() {
            let doc_terms = self.index.doc_term_count(doc);
            // Short documents would dominate the tf/Nt ratio otherwise.
            let normalizer = if doc_terms < 100 {
                (doc_terms + 100) as f64
            } else {
                doc_terms as f64
            };

            let mut total_score = 0.0;
            let mut term_scores = Vec::with_capacity(tokens.len());

            for (ti, term) in tokens.iter().enumerate() {
                let df = self.index.document_frequency(term) as f64;
                let idf = num_docs / (df + 1.0);

                let mut tf = self.index.term_frequency(term, doc) as f64;
                let mut ngram = term.clone();
                for (k, next) in tokens.iter().take(ti + window).skip(ti + 1).enumerate() {
                    ngram.push(' ');
                    ngram.push_str(next);
                    tf += (k + 2) as f64 * self.index.term_frequency(&ngram, doc) as f64;
                }

                let term_score = (tf / normalizer) * idf.ln();
                total_score += term_score;
                term_scores.push(term_score);
            }

            if total_score > 0.0 {
                results.push(ScoredDocument {
                    doc,
                    score: total_score,
                    term_scores,
                    doc_terms,
                });
            }
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        log::debug!(
            "query {:?} matched {} of {} documents",
            query,
            results.len(),
            self.corpus.doc_count()
        );

        Ok(results)
    }
}
