//! Sitemap and per-route page metadata.
//!
//! Canonical URLs always point at a full-page route, so an article opened in the
//! drawer is attributed to `/article/<slug>` and the drawer URL itself is kept out of
//! search indexes. Case studies live at `/work/<slug>`.

use crate::content::{Article, Library};
use crate::error::{Error, Result};
use crate::route::{article_href, case_study_href, Route};
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How often a sitemap entry is expected to change.
pub enum ChangeFrequency {
    /// Listing pages.
    Weekly,
    /// Article and case study pages.
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One `<url>` element of the sitemap.
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    /// Expected change frequency.
    pub change_frequency: ChangeFrequency,
    /// Relative priority in `0.0..=1.0`.
    pub priority: f32,
}

/// Joins `base_url` and an absolute `path` without doubling the slash.
#[must_use]
pub fn absolute_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn detail_entry(base_url: &str, href: &str) -> SitemapEntry {
    SitemapEntry {
        loc: absolute_url(base_url, href),
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    }
}

/// The home page, then one entry per article, then one per case study.
#[must_use]
pub fn sitemap_entries(base_url: &str, library: &Library) -> Vec<SitemapEntry> {
    let articles = library.articles.articles().iter();
    let studies = library.case_studies.articles().iter();
    std::iter::once(SitemapEntry {
        loc: absolute_url(base_url, "/"),
        change_frequency: ChangeFrequency::Weekly,
        priority: 1.0,
    })
    .chain(articles.map(|a| detail_entry(base_url, &article_href(&a.slug))))
    .chain(studies.map(|s| detail_entry(base_url, &case_study_href(&s.slug))))
    .collect()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            ch => out.push(ch),
        }
    }
    out
}

/// Renders the sitemap as an XML document.
#[must_use]
pub fn sitemap_xml(base_url: &str, library: &Library) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in sitemap_entries(base_url, library) {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.loc),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Head metadata for one route.
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Document title.
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Meta description.
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Canonical URL.
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Robots directive, e.g. `noindex, follow`.
    pub robots: Option<String>,
}

fn detail_meta(entry: &Article, kind: &str, canonical: String) -> PageMeta {
    PageMeta {
        title: Some(entry.title.clone()),
        description: Some(
            entry
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| format!("{kind}: {}", entry.title)),
        ),
        canonical: Some(canonical),
        robots: None,
    }
}

/// Metadata for `route`.
///
/// The home page has none of its own; with an article in the drawer it points the
/// canonical URL at the article page and asks not to be indexed. Unknown drawer slugs
/// fall back to the plain home metadata.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for a full-page article or case study that does not
/// exist and for unknown routes.
pub fn page_meta(route: &Route, library: &Library, base_url: &str) -> Result<PageMeta> {
    match route {
        Route::Home { drawer } => Ok(drawer
            .as_deref()
            .and_then(|slug| library.articles.by_slug(slug))
            .map(|article| PageMeta {
                canonical: Some(absolute_url(base_url, &article_href(&article.slug))),
                robots: Some("noindex, follow".to_string()),
                ..PageMeta::default()
            })
            .unwrap_or_default()),
        Route::Article(slug) => {
            let article = library
                .articles
                .by_slug(slug)
                .ok_or_else(|| Error::not_found(format!("article '{slug}'")))?;
            let canonical = absolute_url(base_url, &article_href(slug));
            Ok(detail_meta(article, "Article", canonical))
        }
        Route::CaseStudy(slug) => {
            let study = library
                .case_studies
                .by_slug(slug)
                .ok_or_else(|| Error::not_found(format!("case study '{slug}'")))?;
            let canonical = absolute_url(base_url, &case_study_href(slug));
            Ok(detail_meta(study, "Case study", canonical))
        }
        Route::NotFound(href) => Err(Error::not_found(href.clone())),
    }
}

#[cfg(test)]
#[path = "tests/site.rs"]
mod tests;
