//! folio: read a portfolio's articles in the terminal, or emit its sitemap and metadata.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use folio::app_state::{AppState, ABOUT, FLOATING_BAR};
use folio::config::Config;
use folio::content::Library;
use folio::error::Result;
use folio::logging::{self, LogTarget};
use folio::overlay::Key;
use folio::route::Route;
use folio::section::parse_sections;
use folio::site::{page_meta, sitemap_xml};
use folio::theme::{system_prefers_dark, FileStorage, PreferenceStore};
use folio::{app_state, ui};
use ratatui::crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Frame interval while an animation is running.
const FRAME: Duration = Duration::from_millis(16);
/// Poll interval while idle.
const IDLE: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio and article reader", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the site interactively (the default)
    Browse {
        /// Content directory, overriding the configured one
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Route to start at, e.g. "/?a=intro", "/article/intro" or "/work/acme"
        #[arg(long, default_value = "/")]
        at: String,

        /// Disable drawer animations
        #[arg(long)]
        reduced_motion: bool,
    },
    /// Print the sections of a markdown file as JSON
    Sections {
        /// Markdown file to split
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the sitemap as XML
    Sitemap,
    /// Print the page metadata of a route as JSON
    Meta {
        /// Route such as "/article/intro"
        #[arg(value_name = "HREF")]
        href: String,
    },
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut cfg = Config::load(args.config.as_deref())?;
    let command = args.command.unwrap_or(Command::Browse {
        dir: None,
        at: "/".to_string(),
        reduced_motion: false,
    });

    match command {
        Command::Browse {
            dir,
            at,
            reduced_motion,
        } => {
            // The terminal belongs to the UI, so logs only go to a file.
            logging::init(&LogTarget::File(&cfg.log_file), args.verbose, args.quiet)?;
            if let Some(dir) = dir {
                cfg.content_dir = dir.to_string_lossy().into_owned();
            }
            cfg.reduced_motion |= reduced_motion;
            browse(cfg, &at)
        }
        Command::Sections { file } => {
            logging::init(&LogTarget::Stderr, args.verbose, args.quiet)?;
            let text = fs::read_to_string(&file)?;
            let (_, body) = folio::content::split_front_matter(&text);
            let sections = parse_sections(body);
            println!("{}", serde_json::to_string_pretty(&sections)?);
            Ok(())
        }
        Command::Sitemap => {
            logging::init(&LogTarget::Stderr, args.verbose, args.quiet)?;
            let library = Library::load(&cfg)?;
            print!("{}", sitemap_xml(&cfg.base_url, &library));
            Ok(())
        }
        Command::Meta { href } => {
            logging::init(&LogTarget::Stderr, args.verbose, args.quiet)?;
            let library = Library::load(&cfg)?;
            let meta = page_meta(&Route::parse(&href), &library, &cfg.base_url)?;
            println!("{}", serde_json::to_string_pretty(&meta)?);
            Ok(())
        }
    }
}

fn browse(cfg: Config, href: &str) -> Result<()> {
    let library = Library::load(&cfg)?;
    let prefs = PreferenceStore::new(
        Box::new(FileStorage::open(&cfg.preference_file)),
        system_prefers_dark(),
    );
    let app = AppState::new(cfg, library, prefs, href);
    run_tui(app)
}

fn run_tui(mut app: AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        app.tick(now - last);
        last = now;

        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = if app.is_animating() { FRAME } else { IDLE };
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => app.pointer_down(mouse.column),
                MouseEventKind::Drag(MouseButton::Left) => app.pointer_drag(mouse.column),
                MouseEventKind::Up(MouseButton::Left) => app.pointer_up(),
                MouseEventKind::ScrollDown => scroll(app, 3),
                MouseEventKind::ScrollUp => scroll(app, -3),
                _ => {}
            },
            // The colour scheme may have changed while another window had focus.
            Event::FocusGained => app.set_system_dark(system_prefers_dark()),
            _ => {}
        }
    }
}

fn scroll(app: &mut AppState, delta: isize) {
    if let Some(view) = app.reading_view() {
        view.scroll_by(delta);
    } else if app.accepts_input(ABOUT) {
        app.scroll_home(delta);
    }
}

/// Routes one key press. Returns true when the reader should quit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    app.message = None;

    // The floating bar is exempt from the drawer's inertness.
    if app.accepts_input(FLOATING_BAR) {
        match key.code {
            KeyCode::Char('t') => {
                app.toggle_theme();
                return false;
            }
            KeyCode::Char('x') => {
                app.floating_close();
                return false;
            }
            KeyCode::Char('h') => {
                app.go_home();
                return false;
            }
            _ => {}
        }
    }

    if app.overlay.is_some() {
        match key.code {
            KeyCode::Esc => app.drawer_key(Key::Escape),
            KeyCode::Tab => app.drawer_key(Key::Tab),
            KeyCode::BackTab => app.drawer_key(Key::BackTab),
            KeyCode::Enter => app.activate_focused(),
            KeyCode::Char('o') => app.open_full_page(),
            KeyCode::Char('n') => app.jump_section(false),
            KeyCode::Char('p') => app.jump_section(true),
            KeyCode::Down | KeyCode::Char('j') => scroll(app, 1),
            KeyCode::Up | KeyCode::Char('k') => scroll(app, -1),
            KeyCode::PageDown => scroll(app, 10),
            KeyCode::PageUp => scroll(app, -10),
            _ => {}
        }
        return false;
    }

    match app.view() {
        app_state::View::Home => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => app.select_by(1),
            KeyCode::Up | KeyCode::Char('k') => app.select_by(-1),
            KeyCode::PageDown => app.scroll_home(10),
            KeyCode::PageUp => app.scroll_home(-10),
            KeyCode::Enter => app.open_selected(),
            KeyCode::Char('o') => app.open_full_page(),
            KeyCode::Backspace => app.go_back(),
            _ => {}
        },
        view @ (app_state::View::Article | app_state::View::CaseStudy) => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char(']') if view == app_state::View::CaseStudy => app.open_sibling(false),
            KeyCode::Char('[') if view == app_state::View::CaseStudy => app.open_sibling(true),
            KeyCode::Char('n') => app.jump_section(false),
            KeyCode::Char('p') => app.jump_section(true),
            KeyCode::Down | KeyCode::Char('j') => scroll(app, 1),
            KeyCode::Up | KeyCode::Char('k') => scroll(app, -1),
            KeyCode::PageDown => scroll(app, 10),
            KeyCode::PageUp => scroll(app, -10),
            KeyCode::Backspace | KeyCode::Esc => app.go_back(),
            _ => {}
        },
        app_state::View::NotFound => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Backspace | KeyCode::Esc => app.go_back(),
            _ => {}
        },
    }
    false
}
