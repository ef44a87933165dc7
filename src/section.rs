//! Section representation and extraction for markdown articles.
//!
//! A section is the span of a document opened by a level-2 heading and closed by
//! the next one (or the end of the document). Boundaries come from the tree-sitter
//! parse, so heading-like lines inside code fences or block quotes never split a
//! section. Text before the first level-2 heading belongs to no section.
//!
//! Line coordinates are 0-based indices into `source.split('\n')`. Each section's
//! `content` is exactly `lines[line_start..line_end].join("\n")`, and the sections
//! tile the document from the first heading onwards: `line_end` of one section is
//! `heading_line` of the next.

use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::slug::Slugger;
use serde::Serialize;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A titled, sluggable span of markdown between two level-2 headings.
pub struct Section {
    /// Anchor slug, unique within the document.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Raw markdown between this heading and the next.
    pub content: String,
    /// First line of the heading.
    pub heading_line: usize,
    /// First line of section content (after the heading).
    pub line_start: usize,
    /// Line where the next section begins or the document ends (exclusive).
    pub line_end: usize,
}

/// A located heading before content spans are assigned.
struct Heading {
    title: String,
    first_line: usize,
    last_line: usize,
}

/// Splits `markdown` into its level-2 sections.
///
/// Never fails: if the structural parse is unavailable the document is sectioned
/// line by line instead, still skipping fenced code.
#[must_use]
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    parse_sections_with(markdown, &MarkdownFormat)
}

/// Splits `markdown` into sections using the headings located by `format`.
#[must_use]
pub fn parse_sections_with(markdown: &str, format: &dyn Format) -> Vec<Section> {
    let lines: Vec<&str> = markdown.split('\n').collect();
    let headings = structural_headings(markdown, format).unwrap_or_else(|| {
        tracing::warn!("structural parse unavailable, sectioning line by line");
        line_headings(&lines)
    });
    build_sections(&lines, &headings)
}

fn build_sections(lines: &[&str], headings: &[Heading]) -> Vec<Section> {
    let mut slugger = Slugger::new();
    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let line_start = (heading.last_line + 1).min(lines.len());
            let line_end = headings
                .get(i + 1)
                .map_or(lines.len(), |next| next.first_line);
            let content = if line_start < line_end {
                lines[line_start..line_end].join("\n")
            } else {
                String::new()
            };
            Section {
                id: slugger.slug(&heading.title),
                title: heading.title.clone(),
                content,
                heading_line: heading.first_line,
                line_start,
                line_end: line_end.max(line_start),
            }
        })
        .collect()
}

fn structural_headings(source: &str, format: &dyn Format) -> Option<Vec<Heading>> {
    let language = format.language();
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&language) {
        tracing::warn!("cannot load grammar: {e}");
        return None;
    }
    let tree = parser.parse(source, None)?;
    let query = match Query::new(&language, format.heading_query()) {
        Ok(query) => query,
        Err(e) => {
            tracing::warn!("invalid heading query: {e}");
            return None;
        }
    };

    let mut nodes: Vec<Node> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            if is_top_level(node, format.container_kinds())
                && !nodes.iter().any(|n| n.id() == node.id())
            {
                nodes.push(node);
            }
        }
    }
    nodes.sort_by_key(Node::start_byte);

    Some(
        nodes
            .into_iter()
            .map(|node| Heading {
                title: heading_title(node, source),
                first_line: node.start_position().row,
                last_line: last_row(node),
            })
            .collect(),
    )
}

/// A heading counts only if every ancestor is a plain container.
fn is_top_level(node: Node, containers: &[&str]) -> bool {
    let mut parent = node.parent();
    while let Some(p) = parent {
        if !containers.contains(&p.kind()) {
            return false;
        }
        parent = p.parent();
    }
    true
}

/// Last row the node occupies; block nodes usually end at column 0 of the next row.
fn last_row(node: Node) -> usize {
    let start = node.start_position();
    let end = node.end_position();
    if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    }
}

fn heading_title(node: Node, source: &str) -> String {
    let mut cursor = node.walk();
    let raw = match node.kind() {
        "setext_heading" => node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "paragraph")
            .map(|p| {
                source[p.byte_range()]
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default(),
        _ => node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "inline")
            .map(|inline| strip_closing_sequence(&source[inline.byte_range()]).to_string())
            .unwrap_or_default(),
    };
    plain_text(&raw)
}

/// Drops an ATX closing sequence such as the trailing `##` in `## Title ##`.
pub(crate) fn strip_closing_sequence(text: &str) -> &str {
    let trimmed = text.trim_end();
    let without_hashes = trimmed.trim_end_matches('#');
    if without_hashes.len() == trimmed.len() {
        return trimmed;
    }
    if without_hashes.is_empty() || without_hashes.ends_with([' ', '\t']) {
        without_hashes.trim_end()
    } else {
        trimmed
    }
}

/// Reduces inline markdown to its visible text.
///
/// Handles emphasis and code-span markers, backslash escapes, and link/image syntax
/// (`[text](url)` keeps `text`).
#[must_use]
pub fn plain_text(inline: &str) -> String {
    let chars: Vec<char> = inline.chars().collect();
    let mut out = String::with_capacity(inline.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() && chars[i + 1].is_ascii_punctuation() => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '*' | '`' | '~' => i += 1,
            '!' if chars.get(i + 1) == Some(&'[') => i += 1,
            '[' => i += 1,
            ']' if chars.get(i + 1) == Some(&'(') => {
                // Skip the link destination.
                let mut depth = 0usize;
                let mut j = i + 1;
                while j < chars.len() {
                    match chars[j] {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    j += 1;
                }
                i = j + 1;
            }
            ']' => i += 1,
            ch => {
                out.push(ch);
                i += 1;
            }
        }
    }
    out.trim().to_string()
}

/// Best-effort headings from raw lines: ATX level-2 lines outside fenced code.
fn line_headings(lines: &[&str]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut fence: Option<(char, usize)> = None;

    for (row, line) in lines.iter().enumerate() {
        let indent = line.len() - line.trim_start_matches(' ').len();
        let body = line.trim_start_matches(' ');
        if indent > 3 {
            continue;
        }

        let marker = body.chars().next().filter(|c| *c == '`' || *c == '~');
        if let Some(ch) = marker {
            let run = body.chars().take_while(|c| *c == ch).count();
            if run >= 3 {
                fence = match fence {
                    None => Some((ch, run)),
                    Some((open, len)) if open == ch && run >= len => None,
                    open => open,
                };
                continue;
            }
        }
        if fence.is_some() {
            continue;
        }

        if let Some(rest) = body.strip_prefix("##") {
            if rest.is_empty() || rest.starts_with([' ', '\t']) {
                headings.push(Heading {
                    title: plain_text(strip_closing_sequence(rest.trim())),
                    first_line: row,
                    last_line: row,
                });
            }
        }
    }

    headings
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
