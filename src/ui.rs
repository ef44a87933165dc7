//! The UI renders the application state into something visible and clickable.
//!
//! The draw function lays out the floating bar, the page for the current route (home,
//! article, case study or not found), the drawer on top when one is mounted, and a help
//! line. The drawer panel is drawn at its
//! animated offset, and the page behind it is dimmed while the backdrop is showing.

use crate::app_state::{AppState, ArticleView, DrawerArea, View};
use crate::content::{Article, Experience};
use crate::render::{wrap, Highlighter};
use crate::theme::{Appearance, ThemeChoice};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Terminals narrower than this have no room for the drawer; the panel is detached.
pub const MIN_DRAWER_COLUMNS: u16 = 24;

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Floating bar
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    draw_floating_bar(f, chunks[0], app);
    match app.view() {
        View::Home => draw_home(f, chunks[1], app),
        View::Article | View::CaseStudy => draw_page(f, chunks[1], app),
        View::NotFound => draw_not_found(f, chunks[1], app),
    }
    if app.overlay.is_some() {
        draw_drawer(f, chunks[1], app);
    } else {
        app.set_drawer_area(None);
    }
    draw_help(f, chunks[2], app);
}

fn draw_floating_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let button = Style::default().fg(Color::Gray);
    let mut right = Vec::new();
    if app.view() != View::Home {
        right.push(Span::styled("[← home] ", button));
    }
    if app.overlay_open() {
        right.push(Span::styled("[x close] ", button));
    }
    let theme = match (app.prefs.get(), app.appearance()) {
        (ThemeChoice::System, Appearance::Dark) => "[t ☾ auto]",
        (ThemeChoice::System, Appearance::Light) => "[t ☀ auto]",
        (_, Appearance::Dark) => "[t ☾]",
        (_, Appearance::Light) => "[t ☀]",
    };
    right.push(Span::styled(theme, button));

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(area);
    let title = Paragraph::new(Span::styled(
        app.config.site_title.to_uppercase(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, halves[0]);
    f.render_widget(
        Paragraph::new(Line::from(right)).alignment(ratatui::layout::Alignment::Right),
        halves[1],
    );
}

fn card_lines(article: &Article, selected: bool, width: usize) -> Vec<Line<'static>> {
    let title_style = if selected {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut lines: Vec<Line<'static>> = wrap(&article.title, width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, title_style)))
        .collect();

    let mut meta: Vec<String> = [&article.year, &article.duration]
        .into_iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();
    if let Some(industry) = article.industry.as_ref().filter(|s| !s.is_empty()) {
        meta.push(industry.clone());
    }
    meta.push(article.reading_time.clone());
    if article.featured {
        meta.push("featured".to_string());
    }
    lines.push(Line::from(Span::styled(
        meta.join(" · "),
        Style::default().fg(Color::DarkGray),
    )));
    if !article.tags.is_empty() {
        let tags = article
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(tags, Style::default().fg(Color::Green))));
    }
    lines.push(Line::default());
    lines
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))
}

fn experience_lines(role: &Experience, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(role.period(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            role.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let mut at = role.company.clone();
    if !role.location.is_empty() {
        at.push_str(" · ");
        at.push_str(&role.location);
    }
    lines.push(Line::from(Span::styled(at, Style::default().fg(Color::Gray))));
    lines.extend(
        wrap(&role.description, width)
            .into_iter()
            .filter(|row| !row.is_empty())
            .map(Line::from),
    );
    lines.push(Line::default());
    lines
}

fn draw_home(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default().borders(Borders::ALL).title("Home");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let width = usize::from(inner.width);

    let mut lines: Vec<Line<'static>> = Vec::new();
    if !app.config.bio.is_empty() {
        lines.extend(wrap(&app.config.bio, width).into_iter().map(Line::from));
        lines.push(Line::default());
    }
    lines.push(heading("ARTICLES"));
    lines.push(Line::default());

    let mut selected_rows = 0..0;
    for (i, article) in app.listing().into_iter().enumerate() {
        let start = lines.len();
        lines.extend(card_lines(article, i == app.selected, width));
        if i == app.selected {
            selected_rows = start..lines.len();
        }
    }
    if app.store.is_empty() {
        lines.push(Line::from("No articles found."));
    }
    if !app.experience.is_empty() {
        lines.push(Line::default());
        lines.push(heading("EXPERIENCE"));
        lines.push(Line::default());
        for role in &app.experience {
            lines.extend(experience_lines(role, width));
        }
    }

    // Keep the selected card on screen unless scrolling is locked.
    let height = usize::from(inner.height);
    if !app.document.borrow().scroll_locked() {
        if selected_rows.start < app.home_scroll {
            app.home_scroll = selected_rows.start;
        } else if selected_rows.end > app.home_scroll + height {
            app.home_scroll = selected_rows.end.saturating_sub(height);
        }
    }
    app.home_scroll = app.home_scroll.min(lines.len().saturating_sub(height));

    let scroll = u16::try_from(app.home_scroll).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn nav_line(view: &ArticleView) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, section) in view.sections.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        let style = if view.active.as_deref() == Some(section.id.as_str()) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(section.title.clone(), style));
    }
    Line::from(spans)
}

fn article_list(
    title: &'static str,
    articles: &[Article],
    current: &str,
    focused: Option<&str>,
) -> Vec<Line<'static>> {
    let mut lines = vec![heading(title)];
    for article in articles {
        if article.slug == current {
            lines.push(Line::from(vec![
                Span::styled(article.title.clone(), Style::default().fg(Color::Green)),
                Span::styled("  Currently Reading", Style::default().fg(Color::DarkGray)),
            ]));
        } else {
            let mut style = Style::default().add_modifier(Modifier::UNDERLINED);
            if focused == Some(article.slug.as_str()) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(article.title.clone(), style)));
        }
    }
    lines
}

/// Nav bar, scrolling article body and the article list, stacked in `area`.
fn draw_reader(
    f: &mut Frame,
    area: Rect,
    view: &mut ArticleView,
    highlighter: &Highlighter,
    appearance: Appearance,
    list: Vec<Line<'static>>,
) {
    let list_height = u16::try_from(list.len())
        .unwrap_or(u16::MAX)
        .min(area.height / 3);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(list_height),
        ])
        .split(area);

    view.layout(usize::from(rows[1].width), highlighter, appearance);
    view.set_viewport(usize::from(rows[1].height));

    f.render_widget(Paragraph::new(nav_line(view)), rows[0]);
    let scroll = u16::try_from(view.scroll).unwrap_or(u16::MAX);
    f.render_widget(
        Paragraph::new(view.lines().to_vec()).scroll((scroll, 0)),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(list).block(Block::default().borders(Borders::TOP)),
        rows[2],
    );
}

fn draw_page(f: &mut Frame, area: Rect, app: &mut AppState) {
    let appearance = app.appearance();
    let case_study = app.view() == View::CaseStudy;
    let AppState {
        page,
        highlighter,
        store,
        case_studies,
        ..
    } = app;
    let Some(view) = page.as_mut() else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view.article.title.clone());
    let inner = block.inner(area);
    f.render_widget(block, area);
    let list = if case_study {
        article_list("MORE SELECTED WORK", case_studies.articles(), &view.article.slug, None)
    } else {
        article_list("ARTICLES", store.articles(), &view.article.slug, None)
    };
    draw_reader(f, inner, view, highlighter, appearance, list);
}

fn draw_not_found(f: &mut Frame, area: Rect, app: &AppState) {
    let text = vec![
        Line::from(Span::styled(
            "Not found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("Nothing lives at {}", app.router.current().href())),
    ];
    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("404")),
        area,
    );
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn offset_columns(offset_px: f32, cell_width_px: f32, max: u16) -> u16 {
    if cell_width_px <= 0.0 {
        return 0;
    }
    let columns = (offset_px / cell_width_px).round().max(0.0);
    (columns as u16).min(max)
}

fn draw_drawer(f: &mut Frame, area: Rect, app: &mut AppState) {
    let width = if area.width >= MIN_DRAWER_COLUMNS * 2 {
        area.width / 2
    } else if area.width >= MIN_DRAWER_COLUMNS {
        area.width
    } else {
        0
    };
    let resting = Rect {
        x: area.x + area.width - width,
        width,
        ..area
    };
    app.set_drawer_area(Some(DrawerArea {
        left: resting.x,
        width,
    }));

    let appearance = app.appearance();
    let cell = app.config.cell_width_px;
    let AppState {
        overlay,
        drawer,
        highlighter,
        store,
        ..
    } = app;
    let (Some(overlay), Some(view)) = (overlay.as_ref(), drawer.as_mut()) else {
        return;
    };
    let (Some(panel), Some(backdrop)) = (overlay.panel(), overlay.backdrop()) else {
        return;
    };

    if backdrop.opacity > 0.0 {
        let dim = if backdrop.opacity >= 0.15 {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        f.render_widget(Block::default().style(dim), area);
    }

    let shift = offset_columns(panel.offset, cell, width);
    if shift >= width {
        return;
    }
    let shown = Rect {
        x: resting.x + shift,
        width: width - shift,
        ..resting
    };
    f.render_widget(Clear, shown);
    let border = if panel.interactive {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(view.article.title.clone());
    let inner = block.inner(shown);
    f.render_widget(block, shown);
    let list = article_list(
        "ARTICLES",
        store.articles(),
        &view.article.slug,
        overlay.focused(),
    );
    draw_reader(f, inner, view, highlighter, appearance, list);
}

fn draw_help(f: &mut Frame, area: Rect, app: &AppState) {
    let help_text = if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.overlay.is_some() {
        "Esc/x: Close | j/k: Scroll | n/p: Section | Tab: Links | Enter: Follow | o: Full page | drag: Swipe".to_string()
    } else {
        match app.view() {
            View::Home => "↑/↓: Select | Enter: Read | o: Full page | t: Theme | q: Quit".to_string(),
            View::Article => "j/k: Scroll | n/p: Section | Backspace: Back | h: Home | q: Quit".to_string(),
            View::CaseStudy => "j/k: Scroll | n/p: Section | ]/[: Next/prev work | Backspace: Back | h: Home | q: Quit".to_string(),
            View::NotFound => "Backspace: Back | h: Home | q: Quit".to_string(),
        }
    };

    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
