//! The reader's single source of truth.
//!
//! What the UI shows is derived from the current route plus a little view state
//! (selection, scroll positions). Navigation always goes through the [`Router`];
//! after every change [`AppState::sync_route`] mounts or drops the drawer controller
//! so that it matches the route. The controller never navigates by itself: it hands
//! back an [`Effect`] and the app performs it.

use crate::config::Config;
use crate::content::{Article, ContentStore, Experience, Library};
use crate::document::{Document, Element, SharedDocument};
use crate::overlay::focus::Focusable;
use crate::overlay::{Effect, Key, OverlayConfig, OverlayController, Phase};
use crate::render::{render_article, Header, Highlighter, RenderedArticle};
use crate::route::{article_href, case_study_href, drawer_href, Route, Router};
use crate::section::{parse_sections, Section};
use crate::section_nav::{active_section, neighbour, scroll_target, SectionExtent};
use crate::theme::{Appearance, PreferenceStore};
use ratatui::text::Line;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Page element holding the bio.
pub const ABOUT: &str = "about";
/// Page element holding the article list.
pub const ARTICLES: &str = "articles";
/// The floating toolbar; stays interactive while the drawer is open.
pub const FLOATING_BAR: &str = "floating-bar";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which page is rendered underneath any overlay.
pub enum View {
    /// Bio and article cards.
    Home,
    /// A full-page article.
    Article,
    /// A full-page case study followed by its siblings.
    CaseStudy,
    /// Unknown route or missing article.
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Terminal columns occupied by the drawer panel at rest.
pub struct DrawerArea {
    /// First column of the panel.
    pub left: u16,
    /// Panel width in columns.
    pub width: u16,
}

#[derive(Debug)]
/// One article being read, with its scroll position and section highlight.
pub struct ArticleView {
    /// The article shown.
    pub article: Article,
    /// Its level-2 sections.
    pub sections: Vec<Section>,
    /// First visible row.
    pub scroll: usize,
    /// Visible rows.
    pub height: usize,
    /// Section highlighted in the navigation bar.
    pub active: Option<String>,
    layout: Option<(usize, Appearance, RenderedArticle)>,
}

impl ArticleView {
    #[must_use]
    /// Parses `article` into sections, scrolled to the top.
    pub fn new(article: &Article) -> Self {
        let sections = parse_sections(&article.content);
        tracing::debug!(slug = %article.slug, sections = sections.len(), "article view");
        Self {
            article: article.clone(),
            sections,
            scroll: 0,
            height: 0,
            active: None,
            layout: None,
        }
    }

    /// Lays the article out for `width` columns, reusing the previous layout when
    /// neither the width nor the appearance changed.
    pub fn layout(&mut self, width: usize, highlighter: &Highlighter, appearance: Appearance) {
        let fresh = matches!(&self.layout, Some((w, a, _)) if *w == width && *a == appearance);
        if fresh {
            return;
        }
        let header = Header {
            title: &self.article.title,
            reading_time: &self.article.reading_time,
            tags: &self.article.tags,
        };
        let rendered = render_article(header, &self.sections, width, highlighter, appearance);
        self.layout = Some((width, appearance, rendered));
        self.settle();
    }

    #[must_use]
    /// Rows of the current layout; empty before the first [`layout`](Self::layout).
    pub fn lines(&self) -> &[Line<'static>] {
        self.layout
            .as_ref()
            .map(|(_, _, r)| r.lines.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    /// Section row ranges of the current layout.
    pub fn extents(&self) -> &[SectionExtent] {
        self.layout
            .as_ref()
            .map(|(_, _, r)| r.extents.as_slice())
            .unwrap_or_default()
    }

    /// Records how many rows are visible.
    pub fn set_viewport(&mut self, height: usize) {
        if self.height != height {
            self.height = height;
            self.settle();
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(self.height)
    }

    fn settle(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
        self.active = active_section(
            self.extents(),
            self.scroll,
            self.height,
            self.active.as_deref(),
        )
        .map(str::to_string);
    }

    /// Scrolls by `delta` rows and recomputes the highlighted section.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.settle();
    }

    /// Jumps to the next (or previous) section, leaving `offset` rows above its heading.
    pub fn jump(&mut self, backwards: bool, offset: usize) {
        let Some(target) = neighbour(self.extents(), self.active.as_deref(), backwards) else {
            return;
        };
        let id = target.id.clone();
        if let Some(row) = scroll_target(self.extents(), &id, offset) {
            self.scroll = row.min(self.max_scroll());
        }
        self.active = Some(id);
    }
}

/// Application state shared by the event loop and the renderer.
pub struct AppState {
    /// Site preferences.
    pub config: Config,
    /// Loaded articles.
    pub store: ContentStore,
    /// Loaded case studies.
    pub case_studies: ContentStore,
    /// Past roles in display order.
    pub experience: Vec<Experience>,
    /// Session history.
    pub router: Router,
    /// Page-level accessibility and scroll state.
    pub document: SharedDocument,
    /// Theme preference.
    pub prefs: PreferenceStore,
    /// The drawer controller while the route has a drawer slug.
    pub overlay: Option<OverlayController>,
    /// Article shown in the drawer.
    pub drawer: Option<ArticleView>,
    /// Article or case study shown as a full page.
    pub page: Option<ArticleView>,
    /// Highlighted card in the home listing.
    pub selected: usize,
    /// First visible row of the home page.
    pub home_scroll: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Code block highlighter.
    pub highlighter: Highlighter,
    /// Where the drawer panel was last laid out.
    pub drawer_area: Option<DrawerArea>,
    appearance: Rc<Cell<Appearance>>,
    drag_origin: Option<f32>,
}

impl AppState {
    #[must_use]
    /// Starts a session at `href` and subscribes to theme changes.
    pub fn new(config: Config, library: Library, mut prefs: PreferenceStore, href: &str) -> Self {
        let appearance = Rc::new(Cell::new(prefs.appearance()));
        let sink = Rc::clone(&appearance);
        prefs.subscribe(move |next| sink.set(next));

        let document = Document::new(vec![
            Element::new(ABOUT),
            Element::new(ARTICLES),
            Element::new(FLOATING_BAR).exempt(),
        ])
        .shared();

        let mut app = Self {
            config,
            store: library.articles,
            case_studies: library.case_studies,
            experience: library.experience,
            router: Router::new(href),
            document,
            prefs,
            overlay: None,
            drawer: None,
            page: None,
            selected: 0,
            home_scroll: 0,
            message: None,
            highlighter: Highlighter::new(),
            drawer_area: None,
            appearance,
            drag_origin: None,
        };
        app.sync_route();
        app
    }

    #[must_use]
    /// The appearance currently in effect.
    pub fn appearance(&self) -> Appearance {
        self.appearance.get()
    }

    #[must_use]
    /// The page rendered under any overlay.
    pub fn view(&self) -> View {
        match self.router.current() {
            Route::Home { .. } => View::Home,
            Route::Article(_) if self.page.is_some() => View::Article,
            Route::CaseStudy(_) if self.page.is_some() => View::CaseStudy,
            Route::Article(_) | Route::CaseStudy(_) | Route::NotFound(_) => View::NotFound,
        }
    }

    #[must_use]
    /// Articles in home listing order.
    pub fn listing(&self) -> Vec<&Article> {
        self.store.featured_first()
    }

    #[must_use]
    /// Whether the page element `id` currently accepts input.
    pub fn accepts_input(&self, id: &str) -> bool {
        self.document
            .borrow()
            .element(id)
            .is_some_and(Element::is_interactive)
    }

    #[must_use]
    /// Whether a drawer is mounted.
    pub fn overlay_open(&self) -> bool {
        self.document.borrow().overlay_open()
    }

    /// Brings views and the drawer controller in line with the current route.
    pub fn sync_route(&mut self) {
        match self.router.current().clone() {
            Route::Home { drawer } => {
                self.page = None;
                match drawer.and_then(|slug| self.store.by_slug(&slug).cloned()) {
                    Some(article) => self.show_drawer(&article),
                    None => {
                        self.overlay = None;
                        self.drawer = None;
                    }
                }
            }
            Route::Article(slug) => {
                self.overlay = None;
                self.drawer = None;
                self.page = self.store.by_slug(&slug).map(ArticleView::new);
                if self.page.is_none() {
                    tracing::info!(%slug, "no such article");
                }
            }
            Route::CaseStudy(slug) => {
                self.overlay = None;
                self.drawer = None;
                self.page = self.case_studies.by_slug(&slug).map(ArticleView::new);
                if self.page.is_none() {
                    tracing::info!(%slug, "no such case study");
                }
            }
            Route::NotFound(href) => {
                self.overlay = None;
                self.drawer = None;
                self.page = None;
                tracing::info!(%href, "no such page");
            }
        }
    }

    fn show_drawer(&mut self, article: &Article) {
        let same = self
            .drawer
            .as_ref()
            .is_some_and(|view| view.article.slug == article.slug);
        let live = self
            .overlay
            .as_ref()
            .is_some_and(|o| matches!(o.phase(), Phase::Opening | Phase::Open));
        if same && live {
            return;
        }

        // The previous lock must be released before the next one records the page.
        self.overlay = None;
        self.drawer = Some(ArticleView::new(article));
        let mut overlay = OverlayController::mount(
            &self.document,
            self.overlay_config(),
            self.config.close_href.clone(),
            self.config.reduced_motion,
            self.focusables(&article.slug),
        );
        if self.drawer_area.is_some_and(|area| area.width == 0) {
            overlay.detach();
        }
        overlay.open();
        self.overlay = Some(overlay);
    }

    fn overlay_config(&self) -> OverlayConfig {
        let defaults = OverlayConfig::default();
        OverlayConfig {
            panel_width: self
                .drawer_area
                .filter(|area| area.width > 0)
                .map_or(defaults.panel_width, |area| {
                    f32::from(area.width) * self.config.cell_width_px
                }),
            swipe_threshold: self.config.swipe_threshold,
            edge_zone: self.config.edge_zone,
            ..defaults
        }
    }

    fn focusables(&self, current: &str) -> Vec<Focusable> {
        self.store
            .articles()
            .iter()
            .map(|article| {
                let item = Focusable::new(article.slug.clone());
                if article.slug == current {
                    item.disabled()
                } else {
                    item
                }
            })
            .collect()
    }

    fn apply(&mut self, effect: Option<Effect>) {
        if let Some(Effect::NavigateAway { fallback }) = effect {
            self.drag_origin = None;
            self.router.navigate_away(&fallback);
            self.sync_route();
        }
    }

    /// Opens the selected home card in the drawer.
    pub fn open_selected(&mut self) {
        if !self.accepts_input(ARTICLES) {
            return;
        }
        let Some(slug) = self.listing().get(self.selected).map(|a| a.slug.clone()) else {
            return;
        };
        self.router.push(&drawer_href(&slug));
        self.sync_route();
    }

    /// Opens the article in view (drawer or selected card) as a full page.
    pub fn open_full_page(&mut self) {
        let slug = match &self.drawer {
            Some(view) => Some(view.article.slug.clone()),
            None if self.view() == View::Home && self.accepts_input(ARTICLES) => {
                self.listing().get(self.selected).map(|a| a.slug.clone())
            }
            None => None,
        };
        if let Some(slug) = slug {
            self.router.push(&article_href(&slug));
            self.sync_route();
        }
    }

    /// Follows the link focused inside the drawer to its full page.
    pub fn activate_focused(&mut self) {
        let Some(slug) = self
            .overlay
            .as_ref()
            .filter(|o| matches!(o.phase(), Phase::Opening | Phase::Open))
            .and_then(|o| o.focused().map(str::to_string))
        else {
            return;
        };
        self.router.push(&article_href(&slug));
        self.sync_route();
    }

    /// Moves from the case study on screen to the next (or previous) one in the list.
    pub fn open_sibling(&mut self, backwards: bool) {
        if self.view() != View::CaseStudy {
            return;
        }
        let studies = self.case_studies.articles();
        let Some(current) = self.page.as_ref().map(|view| view.article.slug.as_str()) else {
            return;
        };
        let Some(index) = studies.iter().position(|s| s.slug == current) else {
            return;
        };
        let next = if backwards {
            index.checked_sub(1)
        } else {
            Some(index + 1)
        };
        let Some(slug) = next.and_then(|i| studies.get(i)).map(|s| s.slug.clone()) else {
            return;
        };
        self.router.push(&case_study_href(&slug));
        self.sync_route();
    }

    /// Asks the drawer to close; navigation happens when its exit animation ends.
    pub fn close_drawer(&mut self) {
        let effect = self.overlay.as_mut().and_then(OverlayController::close);
        self.apply(effect);
    }

    /// The floating bar's close button: closes the drawer if one is mounted, else leaves
    /// the current route.
    pub fn floating_close(&mut self) {
        if self.overlay_open() {
            self.close_drawer();
        } else if self.view() != View::Home {
            let fallback = self.config.close_href.clone();
            self.router.navigate_away(&fallback);
            self.sync_route();
        }
    }

    /// The floating bar's home link.
    pub fn go_home(&mut self) {
        if *self.router.current() != (Route::Home { drawer: None }) {
            self.router.push("/");
            self.sync_route();
        }
    }

    /// Browser-style back.
    pub fn go_back(&mut self) {
        if self.router.back() {
            self.sync_route();
        }
    }

    /// Forwards a key to the drawer.
    pub fn drawer_key(&mut self, key: Key) {
        let effect = self.overlay.as_mut().and_then(|o| o.key(key));
        self.apply(effect);
    }

    /// Advances drawer animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let effect = self.overlay.as_mut().and_then(|o| o.tick(dt));
        self.apply(effect);
    }

    #[must_use]
    /// Whether the next frame should come soon rather than on input.
    pub fn is_animating(&self) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(OverlayController::is_animating)
    }

    /// Flips the theme between light and dark.
    pub fn toggle_theme(&mut self) {
        match self.prefs.toggle() {
            Ok(choice) => {
                tracing::debug!(?choice, "theme toggled");
                self.message = None;
            }
            Err(e) => {
                tracing::warn!("could not save theme: {e}");
                self.message = Some(format!("Could not save theme: {e}"));
            }
        }
    }

    /// Records a change of the terminal's colour scheme; only visible while the
    /// preference follows the system.
    pub fn set_system_dark(&mut self, dark: bool) {
        self.prefs.set_system_dark(dark);
    }

    /// Moves the home selection by `delta` cards.
    pub fn select_by(&mut self, delta: isize) {
        if !self.accepts_input(ARTICLES) {
            return;
        }
        let last = self.store.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Scrolls the home page, unless an overlay holds the scroll lock.
    pub fn scroll_home(&mut self, delta: isize) {
        if self.document.borrow().scroll_locked() {
            return;
        }
        self.home_scroll = self.home_scroll.saturating_add_signed(delta);
    }

    /// The article view receiving reading input: the drawer if mounted, else the page.
    pub fn reading_view(&mut self) -> Option<&mut ArticleView> {
        match self.drawer.as_mut() {
            Some(view) => Some(view),
            None => self.page.as_mut(),
        }
    }

    /// Jumps the reading view to the next or previous section.
    pub fn jump_section(&mut self, backwards: bool) {
        let offset = self.config.nav_offset;
        if let Some(view) = self.reading_view() {
            view.jump(backwards, offset);
        }
    }

    /// Records the drawer's layout; a zero-width area detaches the panel.
    pub fn set_drawer_area(&mut self, area: Option<DrawerArea>) {
        self.drawer_area = area;
        let cell = self.config.cell_width_px;
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        match area.filter(|area| area.width > 0) {
            Some(area) => {
                let width = f32::from(area.width) * cell;
                let resized = (overlay.config().panel_width - width).abs() > f32::EPSILON;
                if overlay.panel().is_none() || resized {
                    overlay.attach(width);
                }
            }
            None => {
                if overlay.panel().is_some() {
                    overlay.detach();
                }
            }
        }
    }

    /// Pointer pressed at `column`: on the backdrop this closes the drawer, on the panel
    /// it starts a swipe.
    pub fn pointer_down(&mut self, column: u16) {
        let cell = self.config.cell_width_px;
        let (Some(area), Some(overlay)) = (self.drawer_area, self.overlay.as_mut()) else {
            return;
        };
        let Some(panel) = overlay.panel() else {
            return;
        };
        let x = f32::from(column.saturating_sub(area.left)) * cell;
        if column < area.left || x < panel.offset {
            if overlay.backdrop().is_some_and(|b| b.interactive) {
                let effect = overlay.close();
                self.apply(effect);
            }
            return;
        }
        overlay.touch_start(x - panel.offset);
        if overlay.is_dragging() {
            self.drag_origin = Some(panel.offset);
        }
    }

    /// Pointer dragged to `column`.
    pub fn pointer_drag(&mut self, column: u16) {
        let cell = self.config.cell_width_px;
        let (Some(area), Some(origin), Some(overlay)) =
            (self.drawer_area, self.drag_origin, self.overlay.as_mut())
        else {
            return;
        };
        let x = f32::from(column.saturating_sub(area.left)) * cell;
        overlay.touch_move(x - origin);
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        if self.drag_origin.take().is_none() {
            return;
        }
        let effect = self.overlay.as_mut().and_then(OverlayController::touch_end);
        self.apply(effect);
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
