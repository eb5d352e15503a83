use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Documents are identified by their ordinal position in the corpus.
pub type DocId = usize;

// A run of two or more line breaks ends a document.
static DOC_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\r?\n){2,}").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corpus file {} contains no documents", path.display())]
    Empty { path: PathBuf },
}

/// The corpus is one owned text buffer plus the byte spans of its documents.
/// Snippets are served straight out of the buffer, so spans must stay within
/// char boundaries; the separator regex only matches ASCII line breaks, which
/// guarantees that.
pub struct Corpus {
    text: String,
    documents: Vec<Range<usize>>,
}

impl Corpus {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let corpus = Self::from_text(text);
        if corpus.doc_count() == 0 {
            return Err(CorpusError::Empty {
                path: path.to_path_buf(),
            });
        }

        log::info!(
            "Loaded corpus from {} ({} bytes, {} documents)",
            path.display(),
            corpus.text.len(),
            corpus.doc_count()
        );
        Ok(corpus)
    }

    pub fn from_text(text: String) -> Self {
        let mut documents = Vec::new();
        let mut doc_start = 0usize;
        for sep in DOC_SEPARATOR.find_iter(&text) {
            if sep.start() > doc_start {
                documents.push(doc_start..sep.start());
            }
            doc_start = sep.end();
        }
        if doc_start < text.len() {
            documents.push(doc_start..text.len());
        }

        Self { text, documents }
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document_text(&self, doc: DocId) -> &str {
        &self.text[self.documents[doc].clone()]
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocId, &str)> {
        self.documents
            .iter()
            .enumerate()
            .map(|(id, span)| (id, &self.text[span.clone()]))
    }
}
