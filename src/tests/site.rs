use super::{absolute_url, page_meta, sitemap_entries, sitemap_xml, ChangeFrequency, PageMeta};
use crate::content::{Article, ContentStore, Library};
use crate::error::Error;
use crate::route::Route;
use std::path::Path;

fn store() -> Library {
    let described = "---\ntitle: Alpha\ndescription: All about alpha\n---\n## A\na";
    let plain = "---\ntitle: Beta & Co\n---\n## B\nb";
    let study = "---\ntitle: Acme rebrand\nindustry: Retail\n---\n## Brief\nb";
    Library {
        articles: ContentStore::new(vec![
            Article::parse("alpha", described, 200, Path::new("alpha.md")).unwrap(),
            Article::parse("beta", plain, 200, Path::new("beta.md")).unwrap(),
        ]),
        case_studies: ContentStore::new(vec![
            Article::parse("acme", study, 200, Path::new("acme.md")).unwrap()
        ]),
        experience: Vec::new(),
    }
}

#[test]
fn test_absolute_url_trims_trailing_slash() {
    assert_eq!(absolute_url("https://x.dev/", "/"), "https://x.dev/");
    assert_eq!(absolute_url("https://x.dev", "/article/a"), "https://x.dev/article/a");
}

#[test]
fn test_sitemap_entries() {
    let store = store();
    let entries = sitemap_entries("https://x.dev", &store);

    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].loc, "https://x.dev/");
    assert_eq!(entries[0].change_frequency, ChangeFrequency::Weekly);
    assert!((entries[0].priority - 1.0).abs() < f32::EPSILON);
    assert_eq!(entries[1].loc, "https://x.dev/article/alpha");
    assert_eq!(entries[1].change_frequency, ChangeFrequency::Monthly);
    assert!((entries[1].priority - 0.8).abs() < f32::EPSILON);
    assert_eq!(entries[3].loc, "https://x.dev/work/acme");
    assert_eq!(entries[3].change_frequency, ChangeFrequency::Monthly);
}

#[test]
fn test_sitemap_xml() {
    let store = store();
    let xml = sitemap_xml("https://x.dev", &store);

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<loc>https://x.dev/article/beta</loc>"));
    assert!(xml.contains("<changefreq>weekly</changefreq>"));
    assert!(xml.contains("<priority>0.8</priority>"));
    assert!(xml.trim_end().ends_with("</urlset>"));
}

#[test]
fn test_article_page_meta() {
    let store = store();
    let meta = page_meta(&Route::parse("/article/alpha"), &store, "https://x.dev").unwrap();

    assert_eq!(meta.title.as_deref(), Some("Alpha"));
    assert_eq!(meta.description.as_deref(), Some("All about alpha"));
    assert_eq!(
        meta.canonical.as_deref(),
        Some("https://x.dev/article/alpha")
    );
    assert_eq!(meta.robots, None);
}

#[test]
fn test_description_defaults_to_title() {
    let store = store();
    let meta = page_meta(&Route::parse("/article/beta"), &store, "https://x.dev").unwrap();
    assert_eq!(meta.description.as_deref(), Some("Article: Beta & Co"));
}

#[test]
fn test_case_study_page_meta() {
    let store = store();
    let meta = page_meta(&Route::parse("/work/acme"), &store, "https://x.dev").unwrap();

    assert_eq!(meta.title.as_deref(), Some("Acme rebrand"));
    assert_eq!(meta.description.as_deref(), Some("Case study: Acme rebrand"));
    assert_eq!(meta.canonical.as_deref(), Some("https://x.dev/work/acme"));
    assert_eq!(meta.robots, None);
}

#[test]
fn test_drawer_route_is_noindex() {
    let store = store();
    let meta = page_meta(&Route::parse("/?a=alpha"), &store, "https://x.dev").unwrap();

    assert_eq!(
        meta.canonical.as_deref(),
        Some("https://x.dev/article/alpha")
    );
    assert_eq!(meta.robots.as_deref(), Some("noindex, follow"));
    assert_eq!(meta.title, None);
}

#[test]
fn test_home_meta_is_empty() {
    let store = store();
    let home = page_meta(&Route::parse("/"), &store, "https://x.dev").unwrap();
    let unknown = page_meta(&Route::parse("/?a=nope"), &store, "https://x.dev").unwrap();

    assert_eq!(home, PageMeta::default());
    assert_eq!(unknown, PageMeta::default());
}

#[test]
fn test_missing_pages_are_not_found() {
    let store = store();
    let missing = page_meta(&Route::parse("/article/nope"), &store, "https://x.dev");
    let study = page_meta(&Route::parse("/work/x"), &store, "https://x.dev");
    let unknown = page_meta(&Route::parse("/blog/x"), &store, "https://x.dev");

    assert!(matches!(missing, Err(Error::NotFound(_))));
    assert!(matches!(study, Err(Error::NotFound(_))));
    assert!(matches!(unknown, Err(Error::NotFound(_))));
}

#[test]
fn test_meta_serializes_without_empty_fields() {
    let store = store();
    let meta = page_meta(&Route::parse("/?a=beta"), &store, "https://x.dev").unwrap();
    let json = serde_json::to_value(&meta).unwrap();

    assert!(json.get("title").is_none());
    assert_eq!(json["robots"], "noindex, follow");
}
