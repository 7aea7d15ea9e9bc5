#![warn(missing_docs)]
//! Editor Marks - side tables for a text editing engine
//!
//! # Overview
//!
//! `editor-marks` keeps the auxiliary data an editor attaches to its text consistent while the
//! text is edited: indicator values per position, and markers, fold levels, lexer states,
//! annotations and tab stops per line. It does not store or render text itself; the host reports
//! every insertion and deletion, and the tables shift, split and merge accordingly.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Document (rope-backed host driver)         │  ← Edit fan-out
//! ├──────────────────────┬──────────────────────┤
//! │  DecorationList      │  PerLine tables      │  ← Side tables
//! │  (per position)      │  markers / levels /  │
//! │                      │  states / annotations│
//! │                      │  / tab stops         │
//! ├──────────────────────┴──────────────────────┤
//! │  RunStyles (run-length encoded values)      │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_marks::Document;
//!
//! let mut doc = Document::new("fn main() {\n    todo!()\n}\n");
//!
//! // Bookmark line 1 and highlight `todo` with indicator 8.
//! let handle = doc.add_marker(1, 0).unwrap();
//! doc.decorations_mut().set_current_indicator(8);
//! doc.decorations_mut().fill_range(16, 1, 4);
//!
//! // Insert two lines above: the marker and the highlight follow the text.
//! doc.insert_text(0, "// a\n// b\n").unwrap();
//! assert_eq!(doc.markers().line_from_handle(handle), Some(3));
//! assert_eq!(doc.decorations().value_at(8, 26), 1);
//! ```
//!
//! # Module Description
//!
//! - [`run_styles`] - run-length encoded value sequence
//! - [`decorations`] - per-indicator decorations and the decoration list
//! - [`per_line`] - the contract shared by per-line tables
//! - [`markers`] - line markers with stable handles
//! - [`levels`] - fold levels
//! - [`line_state`] - lexer line states
//! - [`annotations`] - line annotations
//! - [`tabstops`] - custom tab stops
//! - [`document`] - rope-backed host document
//! - [`config`] - document configuration
//!
//! # Failure Model
//!
//! Reads never fail: missing lines, indicators and handles read as 0, empty, or `None`. Only
//! [`Document`] edits with out-of-range positions return a [`DocumentError`].

pub mod annotations;
pub mod config;
pub mod decorations;
pub mod document;
mod error;
pub mod levels;
pub mod line_state;
pub mod markers;
pub mod per_line;
pub mod run_styles;
pub mod tabstops;

pub use annotations::{Annotation, AnnotationStyle, LineAnnotation};
pub use config::DocumentConfig;
pub use decorations::{Decoration, DecorationList, INDICATOR_IME, INDICATOR_MAX};
pub use document::Document;
pub use error::DocumentError;
pub use levels::{
    FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG, FOLD_LEVEL_NUMBER_MASK, FOLD_LEVEL_WHITE_FLAG,
    LineLevels,
};
pub use line_state::LineState;
pub use markers::{
    ALL_MARKERS, LineMarkers, MARKER_MAX, MarkerHandle, MarkerHandleNumber, MarkerHandleSet,
};
pub use per_line::PerLine;
pub use run_styles::RunStyles;
pub use tabstops::LineTabstops;
