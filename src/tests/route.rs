use super::{article_href, case_study_href, drawer_href, Route, Router};

fn home(drawer: Option<&str>) -> Route {
    Route::Home {
        drawer: drawer.map(str::to_string),
    }
}

#[test]
fn test_parse_home_and_drawer() {
    assert_eq!(Route::parse("/"), home(None));
    assert_eq!(Route::parse(""), home(None));
    assert_eq!(Route::parse("/#top"), home(None));
    assert_eq!(Route::parse("/?a=intro"), home(Some("intro")));
    assert_eq!(Route::parse("/?utm=x&a=intro"), home(Some("intro")));
    assert_eq!(Route::parse("/?a="), home(None));
}

#[test]
fn test_parse_article_and_unknown() {
    assert_eq!(
        Route::parse("/article/intro"),
        Route::Article("intro".to_string())
    );
    assert_eq!(
        Route::parse("/article/intro/"),
        Route::Article("intro".to_string())
    );
    assert_eq!(
        Route::parse("/article/"),
        Route::NotFound("/article/".to_string())
    );
    assert_eq!(Route::parse("/blog/x"), Route::NotFound("/blog/x".to_string()));
}

#[test]
fn test_parse_case_study() {
    assert_eq!(Route::parse("/work/acme"), Route::CaseStudy("acme".to_string()));
    assert_eq!(Route::parse("/work/acme/"), Route::CaseStudy("acme".to_string()));
    assert_eq!(Route::parse("/work/"), Route::NotFound("/work/".to_string()));
    assert_eq!(
        Route::parse("/work/acme/extra"),
        Route::NotFound("/work/acme/extra".to_string())
    );
    assert_eq!(case_study_href("acme"), "/work/acme");
    assert_eq!(Route::parse("/work/acme").drawer_slug(), None);
}

#[test]
fn test_hrefs() {
    assert_eq!(drawer_href("intro"), "/?a=intro");
    assert_eq!(article_href("intro"), "/article/intro");
    assert_eq!(home(None).href(), "/");
    assert_eq!(Route::parse("/?a=intro").drawer_slug(), Some("intro"));
    assert_eq!(Route::parse("/article/intro").drawer_slug(), None);
}

#[test]
fn test_back_keeps_first_entry() {
    let mut router = Router::new("/");
    assert!(!router.back());
    router.push("/?a=x");
    assert_eq!(router.history_len(), 2);
    assert!(router.back());
    assert_eq!(router.current(), &home(None));
}

#[test]
fn test_navigate_away_goes_back_when_possible() {
    let mut router = Router::new("/");
    router.push("/?a=x");
    router.navigate_away("/");

    assert_eq!(router.current(), &home(None));
    assert_eq!(router.history_len(), 1);
}

#[test]
fn test_navigate_away_pushes_fallback_on_deep_link() {
    let mut router = Router::new("/?a=x");
    router.navigate_away("/");

    assert_eq!(router.current(), &home(None));
    assert_eq!(router.history_len(), 2);
}
