use crate::stopwords::StopwordSet;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Result of normalizing one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Surviving terms, in text order, duplicates kept.
    pub terms: Vec<String>,
    /// Word tokens seen before stopword and length filtering.
    pub words_seen: usize,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Words were present but every one of them was a stopword or a single character.
    pub fn all_filtered(&self) -> bool {
        self.terms.is_empty() && self.words_seen > 0
    }
}

/// Turns raw text into terms. The same instance must serve indexing and
/// querying, which is why an [`InvertedIndex`](crate::InvertedIndex) keeps
/// the tokenizer it was built with.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopwordSet,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// Lowercase, extract maximal runs of word characters, drop stopwords and
    /// tokens of one character or less.
    pub fn analyze(&self, text: &str) -> Analysis {
        let normalized = text.to_lowercase();
        let mut terms = Vec::new();
        let mut words_seen = 0;
        for mat in RE.find_iter(&normalized) {
            words_seen += 1;
            let token = mat.as_str();
            if token.chars().count() <= 1 || self.stopwords.contains(token) {
                continue;
            }
            terms.push(token.to_string());
        }
        Analysis { terms, words_seen }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.analyze(text).terms
    }
}
