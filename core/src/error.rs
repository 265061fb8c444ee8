use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Re-indexing is not supported; the first version of the document wins.
    #[error("document `{0}` is already indexed")]
    DuplicateDocument(String),
}
