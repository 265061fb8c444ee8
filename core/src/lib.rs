//! In-memory inverted index with conjunctive TF-IDF ranking.
//!
//! Build once with [`IndexBuilder`], then query the resulting
//! [`InvertedIndex`] through a [`QueryEngine`].

pub mod error;
pub mod index;
pub mod query;
pub mod scorer;
pub mod stopwords;
pub mod tokenizer;

pub use error::IndexError;
pub use index::{DocId, DocStats, IndexBuilder, InvertedIndex};
pub use query::{Diagnostic, QueryEngine, SearchHit, SearchOutcome, TermPostings};
pub use stopwords::{StopwordSet, StopwordSource};
pub use tokenizer::{Analysis, Tokenizer};
