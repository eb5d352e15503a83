use anyhow::Result;
use std::collections::HashMap;

use crate::analyzer::TextAnalyzer;
use crate::corpus::{Corpus, DocId};

/// Per-term statistics: how many documents the term appears in, and how often
/// it appears in each of them.
pub struct PostingList {
    pub document_frequency: u64,
    pub term_frequencies: HashMap<DocId, u64>,
}

impl PostingList {
    fn new() -> Self {
        Self {
            document_frequency: 0,
            term_frequencies: HashMap::new(),
        }
    }
}

/// In-memory inverted statistics over a corpus, built in a single pass.
///
/// Every unigram term gets a posting list, and so does every space-joined
/// n-gram of up to `ngram_window` consecutive terms starting at each token
/// position. N-grams never cross document boundaries. Phrase queries score
/// against the n-gram entries at query time; the document term counts used
/// for length normalization count unigrams only.
pub struct CorpusIndex {
    postings: HashMap<String, PostingList>,
    doc_term_counts: Vec<u64>,
    ngram_window: usize,
}

impl CorpusIndex {
    pub fn build(corpus: &Corpus, analyzer: &TextAnalyzer, ngram_window: usize) -> Result<Self> {
        let mut postings: HashMap<String, PostingList> = HashMap::new();
        let mut doc_term_counts = vec![0u64; corpus.doc_count()];
        let mut total_tokens = 0usize;

        for (doc, text) in corpus.documents() {
            let tokens = analyzer.analyze(text.to_string())?;
            doc_term_counts[doc] = tokens.len() as u64;
            total_tokens += tokens.len();

            for (i, token) in tokens.iter().enumerate() {
                Self::record(&mut postings, token.term.clone(), doc);

                let mut ngram = token.term.clone();
                for next in tokens.iter().take(i + ngram_window).skip(i + 1) {
                    ngram.push(' ');
                    ngram.push_str(&next.term);
                    Self::record(&mut postings, ngram.clone(), doc);
                }
            }
        }

        log::info!(
            "Indexed {} documents ({} tokens, {} distinct terms, ngram window {})",
            corpus.doc_count(),
            total_tokens,
            postings.len(),
            ngram_window
        );

        Ok(Self {
            postings,
            doc_term_counts,
            ngram_window,
        })
    }

    fn record(postings: &mut HashMap<String, PostingList>, term: String, doc: DocId) {
        let posting = postings.entry(term).or_insert_with(PostingList::new);
        let tf = posting.term_frequencies.entry(doc).or_insert(0);
        if *tf == 0 {
            posting.document_frequency += 1;
        }
        *tf += 1;
    }

    /// Occurrences of `term` in `doc`; zero when either is unknown.
    pub fn term_frequency(&self, term: &str, doc: DocId) -> u64 {
        self.postings
            .get(term)
            .and_then(|p| p.term_frequencies.get(&doc))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> u64 {
        self.postings
            .get(term)
            .map(|p| p.document_frequency)
            .unwrap_or(0)
    }

    /// Unigram token count of `doc`.
    pub fn doc_term_count(&self, doc: DocId) -> u64 {
        self.doc_term_counts.get(doc).copied().unwrap_or(0)
    }

    pub fn unique_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn ngram_window(&self) -> usize {
        self.ngram_window
    }
}
