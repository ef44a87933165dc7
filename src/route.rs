//! Routing boundary: which page is shown and whether the article drawer is open.
//!
//! The drawer is entered and left purely by adding or removing the `a` query
//! parameter on the home route. `/article/<slug>` renders the same article as a
//! full page for direct links, and `/work/<slug>` renders a case study.

/// Query parameter carrying the slug shown in the drawer.
pub const DRAWER_PARAM: &str = "a";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A parsed location.
pub enum Route {
    /// The home page, optionally with an article shown in the drawer.
    Home {
        /// Slug from the `a` query parameter.
        drawer: Option<String>,
    },
    /// Full-page article view.
    Article(String),
    /// Full-page case study view.
    CaseStudy(String),
    /// Anything else.
    NotFound(String),
}

impl Route {
    #[must_use]
    /// Parses an href such as `/`, `/?a=intro`, `/article/intro` or `/work/acme`.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            let drawer = query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == DRAWER_PARAM)
                .map(|(_, value)| value.to_string())
                .filter(|value| !value.is_empty());
            return Self::Home { drawer };
        }

        if let Some(slug) = path.strip_prefix("/article/").filter(|s| is_segment(s)) {
            return Self::Article(slug.to_string());
        }
        if let Some(slug) = path.strip_prefix("/work/").filter(|s| is_segment(s)) {
            return Self::CaseStudy(slug.to_string());
        }

        Self::NotFound(href.to_string())
    }

    #[must_use]
    /// Canonical href for this route.
    pub fn href(&self) -> String {
        match self {
            Self::Home { drawer: None } => "/".to_string(),
            Self::Home {
                drawer: Some(slug),
            } => format!("/?{DRAWER_PARAM}={slug}"),
            Self::Article(slug) => format!("/article/{slug}"),
            Self::CaseStudy(slug) => format!("/work/{slug}"),
            Self::NotFound(href) => href.clone(),
        }
    }

    #[must_use]
    /// Slug shown in the drawer, if any.
    pub fn drawer_slug(&self) -> Option<&str> {
        match self {
            Self::Home { drawer } => drawer.as_deref(),
            _ => None,
        }
    }
}

fn is_segment(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains('/')
}

#[must_use]
/// Href that opens `slug` in the drawer over the home page.
pub fn drawer_href(slug: &str) -> String {
    Route::Home {
        drawer: Some(slug.to_string()),
    }
    .href()
}

#[must_use]
/// Href of the full-page article route.
pub fn article_href(slug: &str) -> String {
    Route::Article(slug.to_string()).href()
}

#[must_use]
/// Href of the full-page case study route.
pub fn case_study_href(slug: &str) -> String {
    Route::CaseStudy(slug.to_string()).href()
}

#[derive(Debug)]
/// Navigation history with browser-like push and back.
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    #[must_use]
    /// Starts a session at `href`.
    pub fn new(href: &str) -> Self {
        Self {
            history: vec![Route::parse(href)],
        }
    }

    #[must_use]
    /// The route currently shown.
    pub fn current(&self) -> &Route {
        // The history is never empty: `new` seeds it and `back` keeps the first entry.
        &self.history[self.history.len() - 1]
    }

    #[must_use]
    /// Number of entries in the session history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Navigates to `href`, adding a history entry.
    pub fn push(&mut self, href: &str) {
        let route = Route::parse(href);
        tracing::debug!(href = %route.href(), "push");
        self.history.push(route);
    }

    /// Returns to the previous entry. Returns false when there is nowhere to go back to.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            tracing::debug!(href = %self.current().href(), "back");
            true
        } else {
            false
        }
    }

    /// Leaves the current overlay route: back when history allows, else push `fallback`.
    pub fn navigate_away(&mut self, fallback: &str) {
        if !self.back() {
            self.push(fallback);
        }
    }
}

#[cfg(test)]
#[path = "tests/route.rs"]
mod tests;
