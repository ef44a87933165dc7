//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over the document
//! grammar used to locate section headings. Each format provides a tree-sitter
//! language and a query whose `@heading` captures delimit sections.

pub mod markdown;

/// Grammar and queries used to find section boundaries in a document.
pub trait Format {
    /// Tree-sitter grammar for the document's block structure.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading that opens a section as `@heading`.
    fn heading_query(&self) -> &str;
    /// Node kinds that may enclose a section heading without hiding it.
    ///
    /// Headings nested in anything else (quotes, list items) are not section boundaries.
    fn container_kinds(&self) -> &[&str];
}
