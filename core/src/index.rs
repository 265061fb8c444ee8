use crate::error::IndexError;
use crate::tokenizer::Tokenizer;
use serde::Serialize;
use std::collections::HashMap;

pub type DocId = u32;

/// Per-document statistics recorded at indexing time.
#[derive(Debug, Clone, Serialize)]
pub struct DocStats {
    pub external_id: String,
    /// Number of filtered tokens, duplicates included.
    pub length: u32,
    pub term_counts: HashMap<String, u32>,
}

/// Read-only inverted index over a fixed corpus.
///
/// Produced by [`IndexBuilder::finish`]; nothing mutates it afterwards, so a
/// shared reference (or an `Arc`) is enough to query it from many threads.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    tokenizer: Tokenizer,
    postings: HashMap<String, Vec<DocId>>, // sorted by doc_id
    df: HashMap<String, u32>,
    docs: Vec<DocStats>,
    doc_id_map: HashMap<String, DocId>,
}

impl InvertedIndex {
    /// The tokenizer the index was built with. Queries must use the same one.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Documents containing `term`, ascending. Empty when the term is unknown.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of documents containing `term`; 0 when unknown.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of `term` in `doc`; 0 when either is unknown.
    pub fn term_count(&self, term: &str, doc: DocId) -> u32 {
        self.doc(doc)
            .and_then(|d| d.term_counts.get(term).copied())
            .unwrap_or(0)
    }

    /// Filtered token count of `doc`; 0 when unknown.
    pub fn document_length(&self, doc: DocId) -> u32 {
        self.doc(doc).map(|d| d.length).unwrap_or(0)
    }

    pub fn doc(&self, doc: DocId) -> Option<&DocStats> {
        self.docs.get(doc as usize)
    }

    pub fn doc_id(&self, external_id: &str) -> Option<DocId> {
        self.doc_id_map.get(external_id).copied()
    }

    pub fn external_id(&self, doc: DocId) -> Option<&str> {
        self.doc(doc).map(|d| d.external_id.as_str())
    }

    /// External ids in the order they were indexed.
    pub fn corpus(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.external_id.as_str())
    }

    /// The `n` terms found in the most documents; ties broken by term.
    pub fn top_terms(&self, n: usize) -> Vec<(String, u32)> {
        let mut terms: Vec<(&String, u32)> = self.df.iter().map(|(t, c)| (t, *c)).collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms
            .into_iter()
            .take(n)
            .map(|(t, c)| (t.clone(), c))
            .collect()
    }
}

/// Single-writer, single-pass builder for an [`InvertedIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: InvertedIndex,
}

impl IndexBuilder {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { index: InvertedIndex { tokenizer, ..Default::default() } }
    }

    pub fn doc(&self, doc: DocId) -> Option<&DocStats> {
        self.index.doc(doc)
    }

    /// Tokenize `text` with the builder's tokenizer and index the result.
    pub fn add_text(&mut self, external_id: &str, text: &str) -> Result<DocId, IndexError> {
        let terms = self.index.tokenizer.tokenize(text);
        self.add_document(external_id, &terms)
    }

    /// Index an already-normalized term sequence under `external_id`.
    ///
    /// A second call with the same id is rejected and leaves the index untouched.
    pub fn add_document<S: AsRef<str>>(&mut self, external_id: &str, terms: &[S]) -> Result<DocId, IndexError> {
        if self.index.doc_id_map.contains_key(external_id) {
            return Err(IndexError::DuplicateDocument(external_id.to_string()));
        }
        let doc_id = self.index.docs.len() as DocId;

        let mut term_counts: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *term_counts.entry(term.as_ref().to_string()).or_insert(0) += 1;
        }

        for term in term_counts.keys() {
            let list = self.index.postings.entry(term.clone()).or_default();
            if list.last() != Some(&doc_id) {
                list.push(doc_id);
                *self.index.df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        tracing::debug!(doc_id, external_id, unique_terms = term_counts.len(), length = terms.len(), "indexed document");
        self.index.doc_id_map.insert(external_id.to_string(), doc_id);
        self.index.docs.push(DocStats {
            external_id: external_id.to_string(),
            length: terms.len() as u32,
            term_counts,
        });
        Ok(doc_id)
    }

    pub fn finish(self) -> InvertedIndex {
        tracing::debug!(num_docs = self.index.num_docs(), num_terms = self.index.vocabulary_size(), "index finished");
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(docs: &[(&str, &str)]) -> InvertedIndex {
        let mut b = IndexBuilder::new(Tokenizer::default());
        for (id, text) in docs {
            b.add_text(id, text).unwrap();
        }
        b.finish()
    }

    #[test]
    fn counts_and_lengths() {
        let idx = build(&[("a.html", "malware malware detection"), ("b.html", "malware the a")]);
        let a = idx.doc_id("a.html").unwrap();
        let b = idx.doc_id("b.html").unwrap();
        assert_eq!(idx.term_count("malware", a), 2);
        assert_eq!(idx.document_length(a), 3);
        assert_eq!(idx.document_length(b), 1);
        assert_eq!(idx.document_frequency("malware"), 2);
        assert_eq!(idx.document_frequency("detection"), 1);
        assert_eq!(idx.postings("malware"), &[a, b]);
    }

    #[test]
    fn unknown_lookups_default_to_zero() {
        let idx = build(&[("a.html", "firewall")]);
        assert_eq!(idx.document_frequency("nope"), 0);
        assert!(idx.postings("nope").is_empty());
        assert_eq!(idx.term_count("firewall", 99), 0);
        assert_eq!(idx.document_length(99), 0);
        assert!(!idx.contains_term("nope"));
    }

    #[test]
    fn duplicate_id_is_rejected_without_side_effects() {
        let mut b = IndexBuilder::new(Tokenizer::default());
        b.add_text("a.html", "cloud").unwrap();
        let err = b.add_text("a.html", "cloud cloud encryption").unwrap_err();
        assert_eq!(err, IndexError::DuplicateDocument("a.html".into()));
        let idx = b.finish();
        assert_eq!(idx.num_docs(), 1);
        assert_eq!(idx.document_frequency("cloud"), 1);
        assert!(!idx.contains_term("encryption"));
        assert_eq!(idx.document_length(0), 1);
    }

    #[test]
    fn empty_document_is_still_part_of_the_corpus() {
        let idx = build(&[("empty.html", "the of and"), ("b.html", "cloud")]);
        assert_eq!(idx.num_docs(), 2);
        assert_eq!(idx.document_length(idx.doc_id("empty.html").unwrap()), 0);
        assert_eq!(idx.corpus().collect::<Vec<_>>(), vec!["empty.html", "b.html"]);
    }

    #[test]
    fn top_terms_orders_by_frequency_then_term() {
        let idx = build(&[("1", "zeta alpha beta"), ("2", "zeta alpha"), ("3", "zeta gamma")]);
        let top = idx.top_terms(3);
        assert_eq!(
            top,
            vec![("zeta".to_string(), 3), ("alpha".to_string(), 2), ("beta".to_string(), 1)]
        );
    }
}
