//! TF-IDF weights for a (term, document) pair.
//!
//! TF is the raw count divided by the document's filtered length, IDF is
//! `ln(N / df)` with natural log and no smoothing. Terms present in every
//! document get an IDF of zero.

use crate::index::{DocId, InvertedIndex};

/// `count / length`, or 0 for a zero-length document.
pub fn term_frequency(index: &InvertedIndex, term: &str, doc: DocId) -> f64 {
    let len = index.document_length(doc);
    if len == 0 {
        return 0.0;
    }
    index.term_count(term, doc) as f64 / len as f64
}

/// `ln(num_docs / df)`, or 0 for a term absent from the corpus.
pub fn inverse_document_frequency(index: &InvertedIndex, term: &str) -> f64 {
    let df = index.document_frequency(term);
    if df == 0 {
        return 0.0;
    }
    (index.num_docs() as f64 / df as f64).ln()
}

pub fn tf_idf(index: &InvertedIndex, term: &str, doc: DocId) -> f64 {
    term_frequency(index, term, doc) * inverse_document_frequency(index, term)
}
