//! Focus containment inside the drawer panel.
//!
//! Focus is either on the panel container itself or on one of its focusable
//! descendants. Tab and Shift+Tab cycle through the enabled descendants and never
//! leave the panel.

#[derive(Clone, Debug, PartialEq, Eq)]
/// Something inside the panel that can take focus.
pub struct Focusable {
    /// Identifier the application uses to act on the focused item.
    pub id: String,
    /// Disabled items are skipped.
    pub disabled: bool,
    /// The first autofocus item receives focus when the panel mounts.
    pub autofocus: bool,
}

impl Focusable {
    #[must_use]
    /// An enabled item without autofocus.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disabled: false,
            autofocus: false,
        }
    }

    #[must_use]
    /// Marks the item as the initial focus target.
    pub fn autofocus(mut self) -> Self {
        self.autofocus = true;
        self
    }

    #[must_use]
    /// Marks the item as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Tracks which item inside the panel has focus.
pub struct FocusTrap {
    items: Vec<Focusable>,
    /// Index into `items`; `None` means the panel container itself.
    active: Option<usize>,
}

impl FocusTrap {
    #[must_use]
    /// Focuses the autofocus item if one is enabled, else the container.
    pub fn new(items: Vec<Focusable>) -> Self {
        let active = items.iter().position(|i| i.autofocus && !i.disabled);
        Self { items, active }
    }

    #[must_use]
    /// Id of the focused item, or `None` when the container has focus.
    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.items[i].id.as_str())
    }

    /// Moves focus forward (or backward with `shift`), wrapping at either end.
    ///
    /// Returns the newly focused id. With no enabled items focus stays where it is.
    pub fn cycle(&mut self, shift: bool) -> Option<&str> {
        let enabled: Vec<usize> = (0..self.items.len())
            .filter(|&i| !self.items[i].disabled)
            .collect();
        let (Some(&first), Some(&last)) = (enabled.first(), enabled.last()) else {
            return self.active();
        };

        let position = self
            .active
            .and_then(|current| enabled.iter().position(|&i| i == current));
        self.active = Some(match (position, shift) {
            (None, false) => first,
            (None, true) => last,
            (Some(p), false) => enabled.get(p + 1).copied().unwrap_or(first),
            (Some(0), true) => last,
            (Some(p), true) => enabled[p - 1],
        });
        self.active()
    }
}
