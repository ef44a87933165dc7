//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents
//! and extracting level-2 section structure from both ATX (`## Title`) and
//! setext (`Title` underlined with `---`) headings.

use crate::formats::Format;

/// Tree-sitter queries for level-2 markdown headings.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading (atx_h2_marker)) @heading
         (setext_heading (setext_h2_underline)) @heading"
    }

    fn container_kinds(&self) -> &[&str] {
        &["document", "section"]
    }
}
