use anyhow::Result;
use porter_stemmer::stem;
use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

fn get_stop_words() -> &'static HashSet<String> {
    STOP_WORDS.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|x| x.to_string())
            .collect()
    })
}

/// A character filter receives the original text as a stream of characters and can transform the
/// stream by adding, removing, or changing characters before tokenization, e.g. normalizing
/// typographic punctuation to its ASCII equivalent.
pub trait CharacterFilter: Send + Sync {
    fn filter(&self, text: String) -> String;
}

/// Maps typographic punctuation to ASCII: curly quotes and apostrophes become straight ones,
/// em/en dashes become spaces. Dash-joined words ("remember—thee") must split into separate
/// tokens before the alphanumeric filter sees them.
#[derive(Debug, Default)]
pub struct TypographyFilter;

impl CharacterFilter for TypographyFilter {
    fn filter(&self, text: String) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' | '\u{2015}' => ' ',
                other => other,
            })
            .collect()
    }
}

/// A tokenizer receives a stream of characters, breaks it up into individual tokens (usually
/// individual words), and outputs a stream of tokens. The whitespace tokenizer would convert the
/// text "Quick brown fox!" into the terms [Quick, brown, fox!].
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: String) -> Vec<String>;
}

pub struct WhiteSpaceTokenizer;

impl Tokenizer for WhiteSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.to_string())
            .collect::<Vec<String>>()
    }
}

/// A token filter receives the token stream and may add, remove, or change tokens.
/// For example, a lowercase token filter converts all tokens to lowercase, and a stop token
/// filter removes common words (stop words) like "the" from the token stream.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken>;
}

pub struct LowerCaseTokenFilter;

impl TokenFilter for LowerCaseTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = t.term.to_lowercase();
                t
            })
            .collect()
    }
}

pub struct StopWordTokenFilter;

impl TokenFilter for StopWordTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        let stop_words = get_stop_words();
        tokens.retain(|w| !stop_words.contains(&w.term));
        tokens
    }
}

pub struct PorterStemmerTokenFilter;

impl TokenFilter for PorterStemmerTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut w| {
                w.term = stem(&w.term);
                w
            })
            .collect::<Vec<TextToken>>()
    }
}

/// Removes every character that is not ASCII alphanumeric from each token and drops tokens that
/// end up empty. "lov'd" becomes "lovd", "world!" becomes "world", "..." is dropped entirely.
pub struct AlphanumericTokenFilter;

impl TokenFilter for AlphanumericTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .filter_map(|mut token| {
                let cleaned: String = token
                    .term
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect();
                if cleaned.is_empty() {
                    None
                } else {
                    token.term = cleaned;
                    Some(token)
                }
            })
            .collect()
    }
}

/// Pure text analysis pipeline - no async, no IO, just text transformations
pub struct TextAnalyzer {
    char_filters: Vec<Box<dyn CharacterFilter>>,
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub term: String,
    pub pos: usize,
}

impl std::ops::Deref for TextToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

impl TextAnalyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharacterFilter>>,
        tokenizer: Box<dyn Tokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    pub fn char_filter(&self, mut content: String) -> String {
        for filter in self.char_filters.iter() {
            content = filter.filter(content);
        }
        content
    }

    pub fn tokenize(&self, content: String) -> Vec<TextToken> {
        let tokens = self.tokenizer.tokenize(content);
        tokens
            .iter()
            .enumerate()
            .map(|(idx, tok)| TextToken {
                term: tok.clone(),
                pos: idx,
            })
            .collect()
    }

    pub fn token_filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw content and returns a list of tokens
    pub fn analyze(&self, raw_content: String) -> Result<Vec<TextToken>> {
        let content = self.char_filter(raw_content);

        let mut tokens = self.tokenize(content);

        tokens = self.token_filter(tokens);
        Ok(tokens)
    }
}

/// The analyzer used for both indexing and queries. Documents and queries must pass through the
/// same pipeline or term lookups silently miss.
/// Stop word removal and stemming change ranking, so they stay opt-in.
pub fn standard_analyzer(stop_words: bool, stemming: bool) -> TextAnalyzer {
    let mut token_filters: Vec<Box<dyn TokenFilter>> = vec![
        Box::new(AlphanumericTokenFilter),
        Box::new(LowerCaseTokenFilter),
    ];
    if stop_words {
        token_filters.push(Box::new(StopWordTokenFilter));
    }
    if stemming {
        token_filters.push(Box::new(PorterStemmerTokenFilter));
    }
    TextAnalyzer::new(
        vec![Box::new(TypographyFilter)],
        Box::new(WhiteSpaceTokenizer),
        token_filters,
    )
}
