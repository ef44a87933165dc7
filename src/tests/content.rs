use super::{
    load_articles, load_experience, reading_time, sort_experience, split_front_matter, Article,
    ContentStore, Experience, Library,
};
use crate::config::Config;
use crate::error::Error;
use std::fs;
use std::path::Path;

fn article(slug: &str, featured: bool) -> Article {
    let text = format!("---\ntitle: {slug}\nfeatured: {featured}\n---\n## One\nbody\n");
    Article::parse(slug, &text, 200, Path::new("test.md")).unwrap()
}

#[test]
fn test_split_front_matter() {
    let (header, body) = split_front_matter("---\ntitle: X\n---\nbody");

    assert_eq!(header, Some("title: X\n"));
    assert_eq!(body, "body");
}

#[test]
fn test_split_front_matter_crlf_and_bom() {
    let (header, body) = split_front_matter("\u{feff}---\r\ntitle: X\r\n---\r\nbody");

    assert_eq!(header, Some("title: X\r\n"));
    assert_eq!(body, "body");
}

#[test]
fn test_no_or_unterminated_header() {
    assert_eq!(split_front_matter("Just text"), (None, "Just text"));
    assert_eq!(
        split_front_matter("---\ntitle: X\n"),
        (None, "---\ntitle: X\n")
    );
}

#[test]
fn test_reading_time_rounds_up() {
    assert_eq!(reading_time("", 200), "1 min read");
    assert_eq!(reading_time("word ".repeat(200).as_str(), 200), "1 min read");
    assert_eq!(reading_time("word ".repeat(450).as_str(), 200), "3 min read");
}

#[test]
fn test_parse_front_matter_fields() {
    let text = "---\n\
                title: Hello\n\
                year: 2024\n\
                duration: 6 months\n\
                industry: Fintech\n\
                tags: [design, research]\n\
                featured: true\n\
                coverImage: cover.png\n\
                ---\n\
                ## One\n\
                body\n";
    let article = Article::parse("hello", text, 200, Path::new("hello.md")).unwrap();

    assert_eq!(article.slug, "hello");
    assert_eq!(article.title, "Hello");
    assert_eq!(article.year, "2024");
    assert_eq!(article.duration, "6 months");
    assert_eq!(article.industry.as_deref(), Some("Fintech"));
    assert_eq!(article.tags, ["design", "research"]);
    assert!(article.featured);
    assert_eq!(article.cover_image.as_deref(), Some("cover.png"));
    assert_eq!(article.content, "## One\nbody\n");
    assert_eq!(article.reading_time, "1 min read");
}

#[test]
fn test_missing_title_is_an_error() {
    let err = Article::parse("x", "---\nyear: 2020\n---\nbody", 200, Path::new("x.md"))
        .unwrap_err();
    assert!(matches!(err, Error::FrontMatter { .. }));
}

#[test]
fn test_load_articles_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("zeta.md"), "---\ntitle: Zeta\n---\n## Z\nz").unwrap();
    fs::write(dir.path().join("alpha.md"), "---\ntitle: Alpha\n---\n## A\na").unwrap();
    fs::write(dir.path().join("broken.md"), "---\ntitle: [unclosed\n---\nbody").unwrap();
    fs::write(dir.path().join("notes.txt"), "not an article").unwrap();

    let articles = load_articles(dir.path(), 200).unwrap();
    let slugs: Vec<&str> = articles.iter().map(|a| a.slug.as_str()).collect();

    assert_eq!(slugs, ["alpha", "zeta"]);
}

#[test]
fn test_load_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_articles(&dir.path().join("nope"), 200);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_featured_first_is_stable() {
    let store = ContentStore::new(vec![
        article("a", false),
        article("b", true),
        article("c", false),
        article("d", true),
    ]);
    let order: Vec<&str> = store
        .featured_first()
        .into_iter()
        .map(|a| a.slug.as_str())
        .collect();

    assert_eq!(order, ["b", "d", "a", "c"]);
}

#[test]
fn test_by_slug() {
    let store = ContentStore::new(vec![article("a", false), article("b", false)]);

    assert_eq!(store.by_slug("b").map(|a| a.title.as_str()), Some("b"));
    assert!(store.by_slug("missing").is_none());
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
}

fn role(title: &str, start: &str, end: &str) -> Experience {
    Experience {
        title: title.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..Experience::default()
    }
}

#[test]
fn test_experience_current_roles_first() {
    let mut roles = vec![
        role("old", "2019-07", "2021-06"),
        role("consulting", "2022-01", "Present"),
        role("lead", "2024-03", "2025-05"),
        role("founder", "2023-02", "Present"),
        role("head", "2021-07", "2022-10"),
    ];
    sort_experience(&mut roles);
    let order: Vec<&str> = roles.iter().map(|r| r.title.as_str()).collect();

    assert_eq!(order, ["founder", "consulting", "lead", "head", "old"]);
}

#[test]
fn test_experience_period() {
    assert_eq!(role("a", "2021-03", "Present").period(), "Mar 2021 to Now");
    assert_eq!(role("b", "2019-07", "2021-12").period(), "Jul 2019 to Dec 2021");
    assert_eq!(role("c", "2019", "spring").period(), "2019 to spring");
}

#[test]
fn test_load_experience_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experience.yaml");
    fs::write(
        &path,
        "- title: Designer\n  company: Acme\n  startDate: 2020-01\n  endDate: 2021-01\n\
         - title: Lead\n  company: Initech\n  startDate: 2021-02\n  endDate: Present\n  tags: [ux]\n",
    )
    .unwrap();

    let roles = load_experience(&path).unwrap();

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].title, "Lead");
    assert!(roles[0].is_current());
    assert_eq!(roles[0].tags, ["ux"]);
    assert_eq!(roles[1].company, "Acme");
}

#[test]
fn test_missing_experience_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_experience(&dir.path().join("none.yaml")).unwrap().is_empty());
}

#[test]
fn test_invalid_experience_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experience.yaml");
    fs::write(&path, "title: not a list\n").unwrap();

    assert!(matches!(load_experience(&path), Err(Error::Data { .. })));
}

#[test]
fn test_library_loads_case_studies_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let articles = dir.path().join("articles");
    let studies = dir.path().join("case-studies");
    fs::create_dir(&articles).unwrap();
    fs::create_dir(&studies).unwrap();
    fs::write(articles.join("a.md"), "---\ntitle: A\n---\n## One\na").unwrap();
    fs::write(
        studies.join("acme.md"),
        "---\ntitle: Acme\nindustry: Retail\n---\n## Brief\nb",
    )
    .unwrap();

    let mut config = Config::defaults().unwrap();
    config.content_dir = articles.to_string_lossy().into_owned();
    config.case_studies_dir = studies.to_string_lossy().into_owned();
    config.experience_file = dir.path().join("none.yaml").to_string_lossy().into_owned();
    let library = Library::load(&config).unwrap();

    assert_eq!(library.articles.len(), 1);
    let study = library.case_studies.by_slug("acme").unwrap();
    assert_eq!(study.industry.as_deref(), Some("Retail"));
    assert!(library.experience.is_empty());

    config.case_studies_dir = dir.path().join("absent").to_string_lossy().into_owned();
    assert!(Library::load(&config).unwrap().case_studies.is_empty());
}
