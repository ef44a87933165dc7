//! Horizontal swipe tracking for dismissing the drawer.

#[derive(Clone, Copy, Debug, PartialEq)]
/// An in-progress drag, measured from where the finger went down.
pub struct Drag {
    start_x: f32,
    origin: f32,
    offset: f32,
}

impl Drag {
    #[must_use]
    /// Starts a drag at `x` (pixels from the panel's leading edge) while the panel sits
    /// `origin` pixels from rest.
    pub fn start(x: f32, origin: f32) -> Self {
        Self {
            start_x: x,
            origin,
            offset: origin,
        }
    }

    /// Follows the pointer to `x`, keeping the offset within `0..=max`.
    pub fn update(&mut self, x: f32, max: f32) -> f32 {
        self.offset = (self.origin + (x - self.start_x)).clamp(0.0, max.max(0.0));
        self.offset
    }

    #[must_use]
    /// Current offset in pixels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[must_use]
    /// Offset when the drag began.
    pub fn origin(&self) -> f32 {
        self.origin
    }

    #[must_use]
    /// How far the panel has moved since the drag began; positive towards dismissal.
    pub fn distance(&self) -> f32 {
        self.offset - self.origin
    }
}
