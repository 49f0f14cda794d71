//! Cursor-paged list retrieval entry points.
//!
//! # Responsibility
//! - Expose page-loading APIs with substring search and first-letter
//!   filtering, globally and per owner.
//! - Keep page shaping and cursor semantics inside core.

pub mod word_page;
