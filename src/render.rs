//! Turns parsed sections into styled terminal lines.
//!
//! This is deliberately not a markdown renderer: paragraphs are wrapped, headings and
//! list markers are kept recognisable, and fenced code is highlighted with syntect in
//! a theme matching the current appearance. Alongside the lines it records where each
//! section starts and ends, which is what section navigation works from.

use crate::section::{plain_text, strip_closing_sequence, Section};
use crate::section_nav::SectionExtent;
use crate::theme::Appearance;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

/// syntect theme used on light backgrounds.
pub const LIGHT_THEME: &str = "InspiredGitHub";
/// syntect theme used on dark backgrounds.
pub const DARK_THEME: &str = "base16-ocean.dark";

/// Loaded syntax definitions and themes for code blocks.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .field("themes", &self.themes.themes.len())
            .finish()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    #[must_use]
    /// Loads syntect's bundled syntaxes and themes.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_nonewlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    fn theme(&self, appearance: Appearance) -> Option<&Theme> {
        let name = match appearance {
            Appearance::Light => LIGHT_THEME,
            Appearance::Dark => DARK_THEME,
        };
        self.themes
            .themes
            .get(name)
            .or_else(|| self.themes.themes.values().next())
    }

    /// Highlights `code` written in `lang` (a fence info string such as `rust`).
    ///
    /// Unknown languages and highlighting failures fall back to unstyled lines.
    #[must_use]
    pub fn highlight(
        &self,
        code: &[&str],
        lang: &str,
        appearance: Appearance,
    ) -> Vec<Line<'static>> {
        let plain = || {
            code.iter()
                .map(|line| Line::from(Span::styled((*line).to_string(), code_style())))
                .collect::<Vec<_>>()
        };
        let Some(syntax) = self
            .syntaxes
            .find_syntax_by_token(lang)
            .filter(|_| !lang.is_empty())
        else {
            return plain();
        };
        let Some(theme) = self.theme(appearance) else {
            return plain();
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::with_capacity(code.len());
        for line in code {
            match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => lines.push(Line::from(
                    ranges
                        .into_iter()
                        .map(|(style, text)| {
                            let fg = style.foreground;
                            let style = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
                            Span::styled(text.to_string(), style)
                        })
                        .collect::<Vec<_>>(),
                )),
                Err(e) => {
                    tracing::debug!(lang, "highlighting failed: {e}");
                    return plain();
                }
            }
        }
        lines
    }
}

fn code_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Breaks `text` into lines of at most `width` characters, preferring word boundaries.
///
/// Words longer than `width` are split. A zero width returns the text unwrapped.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Clone, Debug, Default)]
/// An article laid out for a given width.
pub struct RenderedArticle {
    /// All rows, header first.
    pub lines: Vec<Line<'static>>,
    /// Row range of each section within `lines`.
    pub extents: Vec<SectionExtent>,
}

/// Article header shown above the sections.
#[derive(Clone, Copy, Debug)]
pub struct Header<'a> {
    /// Article title.
    pub title: &'a str,
    /// Reading time label.
    pub reading_time: &'a str,
    /// Topic labels.
    pub tags: &'a [String],
}

/// Lays out a header and `sections` for a viewport `width` columns wide.
#[must_use]
pub fn render_article(
    header: Header<'_>,
    sections: &[Section],
    width: usize,
    highlighter: &Highlighter,
    appearance: Appearance,
) -> RenderedArticle {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let title_style = Style::default().add_modifier(Modifier::BOLD);
    for row in wrap(header.title, width) {
        lines.push(Line::from(Span::styled(row, title_style)));
    }
    let mut meta = vec![Span::styled(
        header.reading_time.to_string(),
        Style::default().fg(Color::DarkGray),
    )];
    for tag in header.tags {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(format!("#{tag}"), Style::default().fg(Color::Green)));
    }
    lines.push(Line::from(meta));
    lines.push(Line::default());

    let mut extents = Vec::with_capacity(sections.len());
    for section in sections {
        let top = lines.len();
        let heading_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        for row in wrap(&section.title, width) {
            lines.push(Line::from(Span::styled(row, heading_style)));
        }
        lines.push(Line::default());
        render_body(&section.content, width, highlighter, appearance, &mut lines);
        extents.push(SectionExtent {
            id: section.id.clone(),
            top,
            bottom: lines.len(),
        });
    }

    RenderedArticle { lines, extents }
}

fn render_body(
    content: &str,
    width: usize,
    highlighter: &Highlighter,
    appearance: Appearance,
    out: &mut Vec<Line<'static>>,
) {
    let mut paragraph: Vec<&str> = Vec::new();
    let mut fence: Option<(String, String)> = None;
    let mut code: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        let trimmed = line.trim_start();

        if let Some((marker, lang)) = fence.as_ref() {
            let closes = trimmed.starts_with(marker.as_str())
                && trimmed.trim_end().chars().all(|c| marker.starts_with(c));
            if closes {
                out.extend(highlighter.highlight(&code, lang, appearance));
                out.push(Line::default());
                code.clear();
                fence = None;
            } else {
                code.push(line);
            }
            continue;
        }

        if let Some(opening) = fence_marker(trimmed) {
            flush(&mut paragraph, width, out);
            let lang = trimmed[opening.len()..].trim().to_string();
            fence = Some((opening, lang));
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut paragraph, width, out);
        } else if let Some(heading) = atx_heading(trimmed) {
            flush(&mut paragraph, width, out);
            let text = plain_text(heading);
            for row in wrap(&text, width) {
                out.push(Line::from(Span::styled(
                    row,
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
        } else if let Some(item) = list_item(trimmed) {
            flush(&mut paragraph, width, out);
            let text = plain_text(item);
            for (i, row) in wrap(&text, width.saturating_sub(2)).into_iter().enumerate() {
                let bullet = if i == 0 { "• " } else { "  " };
                out.push(Line::from(vec![Span::raw(bullet), Span::raw(row)]));
            }
        } else {
            paragraph.push(trimmed);
        }
    }

    // An unclosed fence runs to the end of the section.
    if let Some((_, lang)) = fence.as_ref() {
        out.extend(highlighter.highlight(&code, lang, appearance));
    }
    flush(&mut paragraph, width, out);
}

fn flush(paragraph: &mut Vec<&str>, width: usize, out: &mut Vec<Line<'static>>) {
    if paragraph.is_empty() {
        return;
    }
    let text = plain_text(&paragraph.join(" "));
    out.extend(wrap(&text, width).into_iter().map(Line::from));
    out.push(Line::default());
    paragraph.clear();
}

fn fence_marker(line: &str) -> Option<String> {
    let ch = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run = line.chars().take_while(|c| *c == ch).count();
    (run >= 3).then(|| ch.to_string().repeat(run))
}

/// Text of an ATX heading: one to six `#` then a space, a tab or the end of the line.
/// An optional closing run of `#` is dropped.
fn atx_heading(line: &str) -> Option<&str> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }
    Some(strip_closing_sequence(rest.trim()))
}

fn list_item(line: &str) -> Option<&str> {
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
    {
        return Some(rest);
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        return line[digits..]
            .strip_prefix(". ")
            .or_else(|| line[digits..].strip_prefix(") "));
    }
    None
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
