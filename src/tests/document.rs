use super::{BackgroundLock, Document, Element, Overflow, PointerEvents};

fn page() -> super::SharedDocument {
    let mut labelled = Element::new("nav");
    labelled.aria_hidden = Some("false".to_string());
    Document::new(vec![
        Element::new("main"),
        labelled,
        Element::new("toolbar").exempt(),
    ])
    .shared()
}

#[test]
fn test_lock_occludes_background() {
    let doc = page();
    let _lock = BackgroundLock::acquire(&doc);
    let doc = doc.borrow();

    let main = doc.element("main").unwrap();
    assert_eq!(main.aria_hidden.as_deref(), Some("true"));
    assert!(main.inert);
    assert_eq!(main.pointer_events, PointerEvents::None);
    assert!(!main.is_interactive());
    assert_eq!(doc.overflow, Overflow::Hidden);
    assert!(doc.scroll_locked());
    assert!(doc.overlay_open());
}

#[test]
fn test_exempt_elements_stay_interactive() {
    let doc = page();
    let _lock = BackgroundLock::acquire(&doc);

    let doc = doc.borrow();
    let toolbar = doc.element("toolbar").unwrap();
    assert!(toolbar.is_interactive());
    assert_eq!(toolbar.aria_hidden, None);
}

#[test]
fn test_drop_restores_prior_values() {
    let doc = page();
    drop(BackgroundLock::acquire(&doc));

    let doc = doc.borrow();
    assert_eq!(doc.element("main").unwrap().aria_hidden, None);
    assert_eq!(
        doc.element("nav").unwrap().aria_hidden.as_deref(),
        Some("false")
    );
    assert!(doc.element("main").unwrap().is_interactive());
    assert_eq!(doc.overflow, Overflow::Visible);
    assert!(!doc.overlay_open());
}

#[test]
fn test_nested_locks_unwind_in_order() {
    let doc = page();
    let outer = BackgroundLock::acquire(&doc);
    let inner = BackgroundLock::acquire(&doc);

    drop(inner);
    {
        let doc = doc.borrow();
        assert!(doc.overlay_open());
        assert!(doc.element("main").unwrap().inert);
        assert!(doc.scroll_locked());
    }

    drop(outer);
    let doc = doc.borrow();
    assert!(!doc.overlay_open());
    assert!(!doc.element("main").unwrap().inert);
    assert!(!doc.scroll_locked());
}

#[test]
fn test_restore_skips_removed_elements() {
    let doc = page();
    let lock = BackgroundLock::acquire(&doc);
    doc.borrow_mut().elements.retain(|el| el.id != "main");

    drop(lock);
    let doc = doc.borrow();
    assert!(doc.element("nav").unwrap().is_interactive());
    assert_eq!(doc.elements.len(), 2);
}
