//! Content loading: articles and case studies from directories of markdown files
//! with YAML front matter, and the experience list from a YAML file.
//!
//! Each `*.md` file is one entry; its file stem is the slug. The header between
//! the leading `---` fences is deserialised with `serde_yaml`, and the remaining
//! body is kept verbatim for the section parser. Case studies share the article
//! shape and loader; only their directory and route differ.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Default words-per-minute used for reading time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Metadata block at the top of an article file.
pub struct FrontMatter {
    /// Headline of the article.
    pub title: String,
    #[serde(default, deserialize_with = "string_or_number")]
    /// Year the work took place, as written.
    pub year: String,
    #[serde(default, deserialize_with = "string_or_number")]
    /// Engagement length, free-form.
    pub duration: String,
    #[serde(default)]
    /// Industry or client sector shown on the card.
    pub industry: Option<String>,
    #[serde(default)]
    /// Topic labels.
    pub tags: Vec<String>,
    #[serde(default)]
    /// Featured articles are listed first on the home page.
    pub featured: bool,
    #[serde(default)]
    /// Summary used for page metadata.
    pub description: Option<String>,
    #[serde(default)]
    /// Publication date, as written.
    pub date: Option<String>,
    #[serde(default)]
    /// Path or URL of the cover image.
    pub cover_image: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A loaded article: metadata plus markdown body.
pub struct Article {
    /// URL identifier, taken from the file stem.
    pub slug: String,
    /// Markdown body with the front matter removed.
    pub content: String,
    /// Human-readable estimate such as "3 min read".
    pub reading_time: String,
    /// Headline of the article.
    pub title: String,
    /// Year the work took place.
    pub year: String,
    /// Engagement length.
    pub duration: String,
    /// Industry or client sector.
    pub industry: Option<String>,
    /// Topic labels.
    pub tags: Vec<String>,
    /// Whether the article is pinned to the top of listings.
    pub featured: bool,
    /// Summary used for page metadata.
    pub description: Option<String>,
    /// Publication date.
    pub date: Option<String>,
    /// Cover image path.
    pub cover_image: Option<String>,
}

impl Article {
    /// Builds an article from a file's text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrontMatter`] when the header is missing a title or is not valid YAML.
    pub fn parse(slug: &str, text: &str, words_per_minute: usize, path: &Path) -> Result<Self> {
        let (header, body) = split_front_matter(text);
        let meta: FrontMatter =
            serde_yaml::from_str(header.unwrap_or("{}")).map_err(|e| Error::FrontMatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            slug: slug.to_string(),
            reading_time: reading_time(body, words_per_minute),
            content: body.to_string(),
            title: meta.title,
            year: meta.year,
            duration: meta.duration,
            industry: meta.industry,
            tags: meta.tags,
            featured: meta.featured,
            description: meta.description,
            date: meta.date,
            cover_image: meta.cover_image,
        })
    }
}

/// Separates a leading `---` fenced header from the body.
///
/// Returns `(None, text)` when the text has no complete header.
#[must_use]
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(header), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Formats the reading estimate for `body`, never less than one minute.
#[must_use]
pub fn reading_time(body: &str, words_per_minute: usize) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    format!("{minutes} min read")
}

/// Loads every `*.md` file in `dir`, ordered by slug.
///
/// Files whose front matter cannot be parsed are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn load_articles(dir: &Path, words_per_minute: usize) -> Result<Vec<Article>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    let mut articles = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping unreadable article: {e}");
                continue;
            }
        };
        match Article::parse(slug, &text, words_per_minute, &path) {
            Ok(article) => articles.push(article),
            Err(e) => tracing::warn!("skipping article: {e}"),
        }
    }

    tracing::debug!(count = articles.len(), dir = %dir.display(), "loaded articles");
    Ok(articles)
}

#[derive(Clone, Debug, Default)]
/// In-memory article collection with slug lookup.
pub struct ContentStore {
    articles: Vec<Article>,
}

impl ContentStore {
    #[must_use]
    /// Wraps an already loaded list of articles.
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Loads the store from a content directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn load(dir: &Path, words_per_minute: usize) -> Result<Self> {
        load_articles(dir, words_per_minute).map(Self::new)
    }

    #[must_use]
    /// All articles in slug order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    #[must_use]
    /// Finds the article whose slug matches exactly.
    pub fn by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    #[must_use]
    /// Articles for the home listing: featured first, otherwise in slug order.
    pub fn featured_first(&self) -> Vec<&Article> {
        let mut listing: Vec<&Article> = self.articles.iter().collect();
        listing.sort_by_key(|a| !a.featured);
        listing
    }

    #[must_use]
    /// Number of loaded articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    /// Whether no articles were loaded.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// `end_date` of a role that is still held.
pub const PRESENT: &str = "Present";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// One past or current role.
pub struct Experience {
    /// Role title.
    pub title: String,
    /// Employer or client.
    pub company: String,
    #[serde(default)]
    /// Where the role was based.
    pub location: String,
    #[serde(deserialize_with = "string_or_number")]
    /// First month, `YYYY-MM`.
    pub start_date: String,
    #[serde(deserialize_with = "string_or_number")]
    /// Last month, `YYYY-MM`, or `Present`.
    pub end_date: String,
    #[serde(default)]
    /// What the role involved.
    pub description: String,
    #[serde(default)]
    /// Skills and topics.
    pub tags: Vec<String>,
}

impl Experience {
    #[must_use]
    /// Whether the role is still held.
    pub fn is_current(&self) -> bool {
        self.end_date == PRESENT
    }

    #[must_use]
    /// The tenure as shown on the home page, e.g. `Mar 2021 to Now`.
    pub fn period(&self) -> String {
        let end = if self.is_current() {
            "Now".to_string()
        } else {
            month_label(&self.end_date)
        };
        format!("{} to {end}", month_label(&self.start_date))
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `YYYY-MM` as `Mon YYYY`; anything else is returned unchanged.
fn month_label(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    let (Some(year), Some(month)) = (parts.next(), parts.next()) else {
        return date.to_string();
    };
    month
        .parse::<usize>()
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|m| MONTHS.get(m))
        .map_or_else(|| date.to_string(), |name| format!("{name} {year}"))
}

/// Orders roles as the home page lists them: current roles first, newest start
/// first; then the rest by end date, newest first.
pub fn sort_experience(roles: &mut [Experience]) {
    roles.sort_by(|a, b| match (a.is_current(), b.is_current()) {
        (true, true) => b.start_date.cmp(&a.start_date),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b.end_date.cmp(&a.end_date),
    });
}

/// Reads the experience list at `path`, sorted for display.
///
/// A missing file yields an empty list.
///
/// # Errors
///
/// Returns [`Error::Data`] when the file is not a YAML list of roles, or an I/O
/// error when it exists but cannot be read.
pub fn load_experience(path: &Path) -> Result<Vec<Experience>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no experience file");
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    let mut roles: Vec<Experience> = serde_yaml::from_str(&text).map_err(|e| Error::Data {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    sort_experience(&mut roles);
    Ok(roles)
}

#[derive(Clone, Debug, Default)]
/// Everything the site shows, loaded once at start-up.
pub struct Library {
    /// Articles, readable in the drawer and at `/article/<slug>`.
    pub articles: ContentStore,
    /// Case studies, readable at `/work/<slug>`.
    pub case_studies: ContentStore,
    /// Roles listed on the home page.
    pub experience: Vec<Experience>,
}

impl Library {
    /// Loads the directories and files named in `config`.
    ///
    /// The article directory must exist. The case study directory and the
    /// experience file are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the article directory cannot be listed or the experience
    /// file is invalid.
    pub fn load(config: &Config) -> Result<Self> {
        let wpm = config.words_per_minute;
        let articles = ContentStore::load(Path::new(&config.content_dir), wpm)?;
        let case_dir = Path::new(&config.case_studies_dir);
        let case_studies = if case_dir.is_dir() {
            ContentStore::load(case_dir, wpm)?
        } else {
            tracing::debug!(dir = %case_dir.display(), "no case studies");
            ContentStore::default()
        };
        let experience = load_experience(Path::new(&config.experience_file))?;
        tracing::info!(
            articles = articles.len(),
            case_studies = case_studies.len(),
            roles = experience.len(),
            "content loaded"
        );
        Ok(Self {
            articles,
            case_studies,
            experience,
        })
    }
}

#[cfg(test)]
#[path = "tests/content.rs"]
mod tests;
