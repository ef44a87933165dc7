//! Section navigation: which section the reader is looking at, and where to jump.

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where a rendered section sits, in rows from the top of the scrollable content.
pub struct SectionExtent {
    /// Section slug.
    pub id: String,
    /// First row (the heading).
    pub top: usize,
    /// Row after the last row of the section.
    pub bottom: usize,
}

fn signed(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Picks the section to highlight for a viewport showing rows `scroll..scroll + height`.
///
/// The first section that is fully visible, or whose top sits in the upper 30% of the
/// viewport, or whose bottom sits in the lower 30%, wins. When none qualifies the
/// previous highlight is kept.
#[must_use]
pub fn active_section<'a>(
    sections: &'a [SectionExtent],
    scroll: usize,
    height: usize,
    previous: Option<&'a str>,
) -> Option<&'a str> {
    let height = signed(height);
    sections
        .iter()
        .find(|section| {
            let top = signed(section.top) - signed(scroll);
            let bottom = signed(section.bottom) - signed(scroll);
            let in_viewport = top >= 0 && bottom <= height;
            let near_top = top >= 0 && top * 10 <= height * 3;
            let near_bottom = bottom <= height && bottom * 10 >= height * 7;
            in_viewport || near_top || near_bottom
        })
        .map(|section| section.id.as_str())
        .or(previous)
}

/// Scroll position that brings the section `id` into view with `offset` rows above it.
#[must_use]
pub fn scroll_target(sections: &[SectionExtent], id: &str, offset: usize) -> Option<usize> {
    sections
        .iter()
        .find(|section| section.id == id)
        .map(|section| section.top.saturating_sub(offset))
}

/// The section after (or before, with `backwards`) the active one, for keyboard jumps.
#[must_use]
pub fn neighbour<'a>(
    sections: &'a [SectionExtent],
    active: Option<&str>,
    backwards: bool,
) -> Option<&'a SectionExtent> {
    let index = active.and_then(|id| sections.iter().position(|s| s.id == id));
    match (index, backwards) {
        (None, false) => sections.first(),
        (None, true) => sections.last(),
        (Some(i), false) => sections.get(i + 1),
        (Some(i), true) => i.checked_sub(1).and_then(|i| sections.get(i)),
    }
}

#[cfg(test)]
#[path = "tests/section_nav.rs"]
mod tests;
