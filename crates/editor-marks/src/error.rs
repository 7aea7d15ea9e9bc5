use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by [`Document`](crate::document::Document) edits and config loading.
///
/// The per-line and per-position tables never fail; they return defaults for anything that does
/// not exist.
pub enum DocumentError {
    #[error("position {position} is past the end of the document (length {length})")]
    /// An insertion point lies beyond the last character.
    InvalidPosition {
        /// Requested character offset.
        position: usize,
        /// Document length in characters.
        length: usize,
    },

    #[error("range {start}..{end} is outside the document (length {length})")]
    /// A deletion range extends beyond the last character.
    InvalidRange {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Document length in characters.
        length: usize,
    },

    #[error("config parse error: {0}")]
    /// The JSON config could not be parsed or serialized.
    Config(#[from] serde_json::Error),

    #[error("tab width must be at least 1")]
    /// The config asked for a zero tab width.
    ZeroTabWidth,
}
