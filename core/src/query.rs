use crate::index::{DocId, InvertedIndex};
use crate::scorer::tf_idf;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Why a search produced no results. Advisory only: the hit list is always
/// well formed, just empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The raw query had no non-whitespace content.
    EmptyQuery,
    /// The query had content but every word was a stopword or too short.
    AllStopwords,
    /// A query term appears in no document, so the AND query cannot match.
    TermNotFound { term: String },
    /// Every term exists but no single document contains all of them.
    NoMatch,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyQuery => f.write_str("Empty query. Please enter some search terms."),
            Diagnostic::AllStopwords => {
                f.write_str("Query contains only stopwords. Please use more specific terms.")
            }
            Diagnostic::TermNotFound { term } => write!(f, "'{term}' was not found in any document."),
            Diagnostic::NoMatch => f.write_str("No documents found matching all query terms."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermPostings {
    pub term: String,
    pub doc_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub external_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Distinct normalized query terms, first occurrence first.
    pub terms: Vec<String>,
    /// Posting-set size of each term looked up, stopping at the first missing one.
    pub term_postings: Vec<TermPostings>,
    pub diagnostic: Option<Diagnostic>,
    pub hits: Vec<SearchHit>,
}

impl SearchOutcome {
    fn rejected(diagnostic: Diagnostic) -> Self {
        Self { diagnostic: Some(diagnostic), ..Default::default() }
    }
}

/// Conjunctive TF-IDF search over a built index.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Documents containing every query term, best score first and ties
    /// ordered by external id.
    pub fn search(&self, raw_query: &str) -> SearchOutcome {
        if raw_query.trim().is_empty() {
            return SearchOutcome::rejected(Diagnostic::EmptyQuery);
        }

        let analysis = self.index.tokenizer().analyze(raw_query);
        if analysis.is_empty() {
            tracing::debug!(
                words_seen = analysis.words_seen,
                all_filtered = analysis.all_filtered(),
                "query normalized to nothing"
            );
            return SearchOutcome::rejected(Diagnostic::AllStopwords);
        }

        let mut seen = HashSet::new();
        let terms: Vec<String> = analysis.terms.into_iter().filter(|t| seen.insert(t.clone())).collect();
        tracing::debug!(?terms, "search terms after filtering");

        let mut outcome = SearchOutcome { terms, ..Default::default() };
        let mut lists: Vec<&[DocId]> = Vec::with_capacity(outcome.terms.len());
        for term in &outcome.terms {
            let postings = self.index.postings(term);
            outcome.term_postings.push(TermPostings { term: term.clone(), doc_count: postings.len() });
            if postings.is_empty() {
                tracing::debug!(term = %term, "term not in index");
                outcome.diagnostic = Some(Diagnostic::TermNotFound { term: term.clone() });
                return outcome;
            }
            lists.push(postings);
        }

        let candidates = intersect(lists);
        if candidates.is_empty() {
            outcome.diagnostic = Some(Diagnostic::NoMatch);
            return outcome;
        }

        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .map(|doc_id| {
                let score: f64 = outcome.terms.iter().map(|t| tf_idf(self.index, t, doc_id)).sum();
                let external_id = self.index.external_id(doc_id).unwrap_or_default().to_string();
                SearchHit { doc_id, external_id, score }
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.external_id.cmp(&b.external_id)));

        tracing::debug!(hits = hits.len(), "search complete");
        outcome.hits = hits;
        outcome
    }
}

/// Intersect sorted posting lists, smallest first, stopping as soon as the
/// running set is empty.
fn intersect(mut lists: Vec<&[DocId]>) -> Vec<DocId> {
    lists.sort_by_key(|l| l.len());
    let mut iter = lists.into_iter();
    let mut acc: Vec<DocId> = match iter.next() {
        Some(first) => first.to_vec(),
        None => return Vec::new(),
    };
    for list in iter {
        if acc.is_empty() {
            break;
        }
        acc.retain(|d| list.binary_search(d).is_ok());
    }
    acc
}
