//! Page-level state shared by every overlay: background inertness and the scroll lock.
//!
//! The document is single-threaded shared state (`Rc<RefCell<_>>`). An overlay takes a
//! [`BackgroundLock`] when it mounts; the lock records each background element's prior
//! `aria-hidden`, `inert` and `pointer-events` values and the body overflow, applies the
//! occluded treatment, and writes the recorded values back when dropped. Locks restore
//! whatever they saw, so nested overlays unwind cleanly in reverse order.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// CSS `pointer-events` as far as the reader cares.
pub enum PointerEvents {
    #[default]
    /// Element receives pointer input.
    Auto,
    /// Element ignores pointer input.
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// CSS `overflow` on the body.
pub enum Overflow {
    #[default]
    /// Page scrolls normally.
    Visible,
    /// Page scrolling is suspended.
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A top-level page element that an overlay may occlude.
pub struct Element {
    /// Stable identifier used to match saved state on restore.
    pub id: String,
    /// Current `aria-hidden` attribute, `None` when absent.
    pub aria_hidden: Option<String>,
    /// Whether the subtree is non-interactive.
    pub inert: bool,
    /// Pointer input handling.
    pub pointer_events: PointerEvents,
    /// Exempt elements (the floating toolbar) stay interactive under overlays.
    pub exempt: bool,
}

impl Element {
    #[must_use]
    /// An interactive element with no accessibility overrides.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aria_hidden: None,
            inert: false,
            pointer_events: PointerEvents::Auto,
            exempt: false,
        }
    }

    #[must_use]
    /// Marks the element as exempt from overlay occlusion.
    pub fn exempt(mut self) -> Self {
        self.exempt = true;
        self
    }

    #[must_use]
    /// Whether the element currently accepts input.
    pub fn is_interactive(&self) -> bool {
        !self.inert && self.pointer_events == PointerEvents::Auto
    }
}

#[derive(Debug, Default)]
/// The page: its top-level elements and body scroll state.
pub struct Document {
    /// Top-level elements in layout order.
    pub elements: Vec<Element>,
    /// Body overflow; `Hidden` while an overlay holds the scroll lock.
    pub overflow: Overflow,
    locks: usize,
}

/// Shared handle to the page state.
pub type SharedDocument = Rc<RefCell<Document>>;

impl Document {
    #[must_use]
    /// A page made of `elements`.
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            overflow: Overflow::Visible,
            locks: 0,
        }
    }

    #[must_use]
    /// Wraps the document for sharing between the app and overlays.
    pub fn shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    /// Looks up an element by id.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    #[must_use]
    /// Whether any overlay currently holds the background lock.
    pub fn overlay_open(&self) -> bool {
        self.locks > 0
    }

    #[must_use]
    /// Whether the page may scroll.
    pub fn scroll_locked(&self) -> bool {
        self.overflow == Overflow::Hidden
    }
}

#[derive(Debug)]
struct Saved {
    id: String,
    aria_hidden: Option<String>,
    inert: bool,
    pointer_events: PointerEvents,
}

#[derive(Debug)]
/// Occludes the page background for as long as it is alive.
pub struct BackgroundLock {
    document: SharedDocument,
    saved: Vec<Saved>,
    overflow: Overflow,
}

impl BackgroundLock {
    #[must_use]
    /// Hides and disables every non-exempt element and suspends page scrolling.
    pub fn acquire(document: &SharedDocument) -> Self {
        let mut doc = document.borrow_mut();
        let saved = doc
            .elements
            .iter_mut()
            .filter(|el| !el.exempt)
            .map(|el| Saved {
                id: el.id.clone(),
                aria_hidden: el.aria_hidden.replace("true".to_string()),
                inert: std::mem::replace(&mut el.inert, true),
                pointer_events: std::mem::replace(&mut el.pointer_events, PointerEvents::None),
            })
            .collect::<Vec<_>>();
        let overflow = std::mem::replace(&mut doc.overflow, Overflow::Hidden);
        doc.locks += 1;
        tracing::debug!(occluded = saved.len(), depth = doc.locks, "background locked");
        drop(doc);

        Self {
            document: Rc::clone(document),
            saved,
            overflow,
        }
    }
}

impl Drop for BackgroundLock {
    fn drop(&mut self) {
        let mut doc = self.document.borrow_mut();
        for saved in self.saved.drain(..) {
            if let Some(el) = doc.elements.iter_mut().find(|el| el.id == saved.id) {
                el.aria_hidden = saved.aria_hidden;
                el.inert = saved.inert;
                el.pointer_events = saved.pointer_events;
            }
        }
        doc.overflow = self.overflow;
        doc.locks = doc.locks.saturating_sub(1);
        tracing::debug!(depth = doc.locks, "background restored");
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
