//! Heading slugs for section anchors.
//!
//! A slug is the lowercase ASCII alphanumerics of a title with every run of
//! separators collapsed to one hyphen. A [`Slugger`] remembers what it has
//! handed out so repeated titles within one document get `-1`, `-2`, ... suffixes.

use std::collections::HashMap;

/// Reduce a title to its base slug, without any disambiguation.
///
/// Whitespace, `-` and `_` act as separators; every other character outside
/// `[a-z0-9]` (after lowercasing) is dropped without splitting the word.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }
    slug
}

#[derive(Default, Debug)]
/// Hands out unique slugs for one document.
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    #[must_use]
    /// Creates a slugger with no slugs issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a slug for `title` that has not been returned before by this slugger.
    ///
    /// The first occurrence of a base slug is returned as is; later ones get the
    /// smallest counter suffix not already taken. An empty base never stands on its
    /// own, so blank titles are numbered `1`, `2`, ...
    pub fn slug(&mut self, title: &str) -> String {
        let base = slugify(title);
        let mut slug = base.clone();

        if base.is_empty() || self.occurrences.contains_key(&base) {
            loop {
                let count = self.occurrences.entry(base.clone()).or_insert(0);
                *count += 1;
                slug = if base.is_empty() {
                    count.to_string()
                } else {
                    format!("{base}-{count}")
                };
                if !self.occurrences.contains_key(&slug) {
                    break;
                }
            }
        }

        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}

#[cfg(test)]
#[path = "tests/slug.rs"]
mod tests;
