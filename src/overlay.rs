//! The article drawer: a dismissible side panel layered over the page.
//!
//! The drawer is a presentation layer over navigation state. Which article is shown
//! lives in the route; the controller only owns how the panel arrives, how it leaves,
//! and what the page around it may do meanwhile. Its lifecycle is:
//!
//! ```text
//! Closed --open()--> Opening --entry done--> Open
//!                       |                     |
//!                       +---- close() --------+--> Closing --exit done--> Closed
//!                                                              (emits NavigateAway)
//! ```
//!
//! Mounting a controller takes the page's [`BackgroundLock`] and dropping it gives the
//! lock back, so unmounting at any point restores the page and cancels every pending
//! tween. Animations only advance through [`OverlayController::tick`]; with reduced
//! motion every transition settles immediately but the phases and side effects are
//! the same.

pub mod focus;
pub mod gesture;
pub mod tween;

use crate::document::{BackgroundLock, SharedDocument};
use focus::{FocusTrap, Focusable};
use gesture::Drag;
use std::time::Duration;
use tween::{Easing, Timeline, Tween};

/// Backdrop opacity when the drawer is fully shown.
pub const BACKDROP_OPACITY: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the drawer is in its lifecycle.
pub enum Phase {
    /// Not shown.
    Closed,
    /// Entry animation running.
    Opening,
    /// Settled and interactive.
    Open,
    /// Exit animation running; further close requests are ignored.
    Closing,
}

#[derive(Clone, Debug, PartialEq)]
/// Geometry and timing for one drawer.
pub struct OverlayConfig {
    /// Panel width in pixels; also the fully hidden offset.
    pub panel_width: f32,
    /// Releasing a drag beyond this many pixels closes the drawer.
    pub swipe_threshold: f32,
    /// Drags must start within this many pixels of the panel's leading edge.
    pub edge_zone: f32,
    /// Length of the entry animation.
    pub open_duration: Duration,
    /// Length of the exit animation.
    pub close_duration: Duration,
    /// Length of the return-to-rest animation after a short drag.
    pub snap_duration: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            panel_width: 360.0,
            swipe_threshold: 80.0,
            edge_zone: 48.0,
            open_duration: Duration::from_millis(300),
            close_duration: Duration::from_millis(200),
            snap_duration: Duration::from_millis(200),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Work the application must do on the controller's behalf.
pub enum Effect {
    /// Remove the drawer's query parameter: go back if there is history, else push `fallback`.
    NavigateAway {
        /// Route used when there is no history to return to.
        fallback: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Keys the drawer reacts to.
pub enum Key {
    /// Close the drawer.
    Escape,
    /// Move focus forward.
    Tab,
    /// Move focus backward.
    BackTab,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The sliding panel as last rendered.
pub struct Panel {
    /// Distance from the resting position towards the trailing edge, in pixels.
    pub offset: f32,
    /// Whether the panel accepts pointer input.
    pub interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The dimming layer behind the panel.
pub struct Backdrop {
    /// Current opacity.
    pub opacity: f32,
    /// Whether clicks on the backdrop are handled.
    pub interactive: bool,
}

/// Owns the drawer's state machine, animations, gesture and focus handling.
#[derive(Debug)]
pub struct OverlayController {
    config: OverlayConfig,
    fallback: String,
    reduced_motion: bool,
    phase: Phase,
    panel: Option<Panel>,
    backdrop: Option<Backdrop>,
    entry: Option<Timeline>,
    exit: Option<Timeline>,
    snap: Option<Tween>,
    drag: Option<Drag>,
    focus: FocusTrap,
    _lock: BackgroundLock,
}

impl OverlayController {
    #[must_use]
    /// Mounts a drawer: occludes the page, locks scrolling and places initial focus.
    ///
    /// `reduced_motion` is read once here and holds for the controller's lifetime.
    /// The drawer starts `Closed` and hidden; call [`open`](Self::open) to show it.
    pub fn mount(
        document: &SharedDocument,
        config: OverlayConfig,
        fallback: impl Into<String>,
        reduced_motion: bool,
        focusables: Vec<Focusable>,
    ) -> Self {
        let panel_width = config.panel_width;
        tracing::debug!(panel_width, reduced_motion, "drawer mounted");
        Self {
            config,
            fallback: fallback.into(),
            reduced_motion,
            phase: Phase::Closed,
            panel: Some(Panel {
                offset: panel_width,
                interactive: true,
            }),
            backdrop: Some(Backdrop {
                opacity: 0.0,
                interactive: true,
            }),
            entry: None,
            exit: None,
            snap: None,
            drag: None,
            focus: FocusTrap::new(focusables),
            _lock: BackgroundLock::acquire(document),
        }
    }

    #[must_use]
    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    /// The panel, if it is laid out.
    pub fn panel(&self) -> Option<Panel> {
        self.panel
    }

    #[must_use]
    /// The backdrop, if it is laid out.
    pub fn backdrop(&self) -> Option<Backdrop> {
        self.backdrop
    }

    #[must_use]
    /// The geometry and timing in use.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    /// Whether any tween is scheduled; false means no further frames are needed.
    pub fn is_animating(&self) -> bool {
        self.entry.as_ref().is_some_and(|t| !t.is_paused())
            || self.exit.is_some()
            || self.snap.is_some()
    }

    #[must_use]
    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    /// Id of the focused item inside the panel, `None` for the panel container.
    pub fn focused(&self) -> Option<&str> {
        self.focus.active()
    }

    /// Detaches the panel and backdrop, e.g. when there is no room to lay them out.
    ///
    /// Later actions become no-ops until [`attach`](Self::attach) is called.
    pub fn detach(&mut self) {
        self.panel = None;
        self.backdrop = None;
    }

    /// Re-attaches the panel and backdrop with a new width, keeping the phase.
    ///
    /// An attached panel keeps its relative position; a detached one is placed where
    /// the current phase says it should rest.
    pub fn attach(&mut self, panel_width: f32) {
        let previous = self.config.panel_width;
        self.config.panel_width = panel_width;
        let interactive = self.phase != Phase::Closing;
        let offset = match self.panel {
            Some(panel) if previous > 0.0 => panel.offset / previous * panel_width,
            _ if self.phase == Phase::Open => 0.0,
            _ => panel_width,
        };
        self.panel = Some(Panel {
            offset,
            interactive,
        });
        if self.backdrop.is_none() {
            let opacity = if self.phase == Phase::Open {
                BACKDROP_OPACITY
            } else {
                0.0
            };
            self.backdrop = Some(Backdrop {
                opacity,
                interactive,
            });
        }
    }

    /// Starts showing the drawer. Only valid from `Closed`; otherwise a no-op.
    pub fn open(&mut self) {
        if self.phase != Phase::Closed {
            return;
        }
        let (Some(panel), Some(backdrop)) = (self.panel.as_mut(), self.backdrop.as_mut()) else {
            return;
        };
        panel.interactive = true;
        backdrop.interactive = true;

        if self.reduced_motion {
            panel.offset = 0.0;
            backdrop.opacity = BACKDROP_OPACITY;
            self.phase = Phase::Open;
            tracing::debug!("drawer open (reduced motion)");
            return;
        }

        panel.offset = self.config.panel_width;
        backdrop.opacity = 0.0;
        self.entry = Some(Timeline::new(
            Tween::new(
                self.config.panel_width,
                0.0,
                self.config.open_duration,
                Easing::CubicOut,
            ),
            Tween::new(0.0, BACKDROP_OPACITY, self.config.open_duration, Easing::CubicOut),
        ));
        self.phase = Phase::Opening;
        tracing::debug!("drawer opening");
    }

    /// Starts dismissing the drawer from wherever it currently is.
    ///
    /// Ignored while already closing or closed, and when the panel is detached. Any
    /// in-flight entry or snap-back animation is killed first.
    #[must_use]
    pub fn close(&mut self) -> Option<Effect> {
        if matches!(self.phase, Phase::Closing | Phase::Closed) {
            return None;
        }
        let (Some(panel), Some(backdrop)) = (self.panel.as_mut(), self.backdrop.as_mut()) else {
            return None;
        };

        self.entry = None;
        self.snap = None;
        self.drag = None;
        panel.interactive = false;
        backdrop.interactive = false;
        self.phase = Phase::Closing;
        tracing::debug!(from = panel.offset, "drawer closing");

        if self.reduced_motion {
            panel.offset = self.config.panel_width;
            backdrop.opacity = 0.0;
            return Some(self.finish_close());
        }

        self.exit = Some(Timeline::new(
            Tween::new(
                panel.offset,
                self.config.panel_width,
                self.config.close_duration,
                Easing::CubicIn,
            ),
            Tween::new(backdrop.opacity, 0.0, self.config.close_duration, Easing::QuadOut),
        ));
        None
    }

    fn finish_close(&mut self) -> Effect {
        self.exit = None;
        self.phase = Phase::Closed;
        tracing::debug!(fallback = %self.fallback, "drawer closed");
        Effect::NavigateAway {
            fallback: self.fallback.clone(),
        }
    }

    /// Advances running animations by `dt`.
    ///
    /// Returns [`Effect::NavigateAway`] exactly once, on the tick that completes the
    /// exit animation.
    #[must_use]
    pub fn tick(&mut self, dt: Duration) -> Option<Effect> {
        if let Some(snap) = self.snap.as_mut() {
            snap.advance(dt);
            let value = snap.value();
            let finished = snap.is_finished();
            if let Some(panel) = self.panel.as_mut() {
                panel.offset = value;
            }
            if finished {
                self.snap = None;
                if let Some(entry) = self.entry.as_mut() {
                    entry.resume();
                }
            }
            return None;
        }

        if let Some(entry) = self.entry.as_mut() {
            entry.advance(dt);
            if !entry.is_paused() {
                let (offset, opacity) = (entry.panel.value(), entry.backdrop.value());
                let finished = entry.is_finished();
                self.apply(offset, opacity);
                if finished {
                    self.entry = None;
                    self.phase = Phase::Open;
                    tracing::debug!("drawer open");
                }
            }
        }

        if let Some(exit) = self.exit.as_mut() {
            exit.advance(dt);
            let (offset, opacity) = (exit.panel.value(), exit.backdrop.value());
            let finished = exit.is_finished();
            self.apply(offset, opacity);
            if finished {
                return Some(self.finish_close());
            }
        }

        None
    }

    fn apply(&mut self, offset: f32, opacity: f32) {
        if let Some(panel) = self.panel.as_mut() {
            panel.offset = offset;
        }
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.opacity = opacity;
        }
    }

    /// Begins a swipe at `x` pixels from the panel's leading edge.
    ///
    /// Only honoured while opening or open and within the edge zone. The entry
    /// animation pauses for the duration of the drag.
    pub fn touch_start(&mut self, x: f32) {
        if !matches!(self.phase, Phase::Opening | Phase::Open) || self.panel.is_none() {
            return;
        }
        if !(0.0..=self.config.edge_zone).contains(&x) {
            return;
        }
        self.snap = None;
        let origin = self.panel.as_ref().map_or(0.0, |panel| panel.offset);
        self.drag = Some(Drag::start(x, origin));
        if !self.reduced_motion {
            if let Some(entry) = self.entry.as_mut() {
                entry.pause();
            }
        }
    }

    /// Follows the swipe to `x`; the panel moves with the finger from wherever it was
    /// when the drag began, within `0..=panel_width`.
    pub fn touch_move(&mut self, x: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let offset = drag.update(x, self.config.panel_width);
        if let Some(panel) = self.panel.as_mut() {
            panel.offset = offset;
        }
    }

    /// Ends the swipe: dragged further than the threshold the drawer closes from where
    /// it is, otherwise it returns to where the paused entry left it (or to rest) and the
    /// entry animation resumes.
    #[must_use]
    pub fn touch_end(&mut self) -> Option<Effect> {
        let drag = self.drag.take()?;
        let offset = drag.offset();

        if drag.distance() > self.config.swipe_threshold {
            tracing::debug!(offset, origin = drag.origin(), "swipe dismiss");
            return self.close();
        }

        let rest = self.entry.as_ref().map_or(0.0, |entry| entry.panel.value());
        if self.reduced_motion || (offset - rest).abs() < f32::EPSILON {
            if let Some(panel) = self.panel.as_mut() {
                panel.offset = rest;
            }
            if let Some(entry) = self.entry.as_mut() {
                entry.resume();
            }
            return None;
        }

        self.snap = Some(Tween::new(
            offset,
            rest,
            self.config.snap_duration,
            Easing::CubicOut,
        ));
        None
    }

    /// Handles a key press while the drawer is mounted.
    #[must_use]
    pub fn key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape => self.close(),
            Key::Tab | Key::BackTab => {
                if matches!(self.phase, Phase::Opening | Phase::Open) {
                    self.focus.cycle(key == Key::BackTab);
                }
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/overlay.rs"]
mod tests;
