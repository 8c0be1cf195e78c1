mod app;
mod config;
mod error;
mod event;
mod session;
mod ui;
mod words;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::list_picker::ListPickerView;
use ui::components::typing_area::TypingArea;
use ui::layout::AppLayout;
use ui::theme::Theme;
use words::bundled::BundledSource;
use words::user_dir::UserDirSource;
use words::{ChainSource, WordSource};

#[derive(Parser)]
#[command(name = "wordtap", version, about = "Terminal word-by-word typing practice")]
struct Cli {
    #[arg(short, long, help = "Word list to practise (see --available)")]
    list: Option<String>,

    #[arg(short, long, help = "Number of words per run (0 = whole list)")]
    count: Option<usize>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Keep the list order instead of drawing random words")]
    no_shuffle: bool,

    #[arg(long, help = "Print the available word lists and exit")]
    available: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = init_tracing() {
        eprintln!("wordtap: logging disabled: {err:#}");
    }

    // Command line flags only touch this run; the file keeps its own values.
    let (mut config, config_path) = match Config::load() {
        Ok(config) => (config, Some(Config::config_path())),
        Err(err) => {
            tracing::warn!(
                error = %format!("{err:#}"),
                "invalid config, using defaults and leaving the file untouched"
            );
            (Config::default(), None)
        }
    };
    if let Some(list) = cli.list {
        config.word_list = list;
    }
    if let Some(count) = cli.count {
        config.word_count = count;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.no_shuffle {
        config.shuffle = false;
    }
    config.normalize();

    let source = word_source(&config);

    if cli.available {
        for id in source.list() {
            println!("{id}");
        }
        return Ok(());
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(config.tick_rate_ms));
    let mut app = App::new(config, theme, source, events.sender()).with_config_path(config_path);
    app.load_word_list();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %format!("{err:#}"), "exiting on error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// User files first, then bundled lists, then the network when configured.
fn word_source(config: &Config) -> Arc<dyn WordSource> {
    let mut sources: Vec<Box<dyn WordSource>> = Vec::new();
    if let Some(user) = UserDirSource::new() {
        sources.push(Box::new(user));
    }
    sources.push(Box::new(BundledSource));
    if let Some(remote) = remote_source(config) {
        sources.push(remote);
    }
    Arc::new(ChainSource::new(sources))
}

#[cfg(feature = "network")]
fn remote_source(config: &Config) -> Option<Box<dyn WordSource>> {
    let url = config.remote_base_url.as_deref()?;
    Some(Box::new(words::remote::RemoteSource::new(url)))
}

#[cfg(not(feature = "network"))]
fn remote_source(config: &Config) -> Option<Box<dyn WordSource>> {
    if config.remote_base_url.is_some() {
        tracing::warn!("remote_base_url set but built without the `network` feature");
    }
    None
}

/// Log to `<data_dir>/wordtap/wordtap.log`; the terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordtap");
    fs::create_dir_all(&dir)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(dir.join("wordtap.log"))?;

    let filter = EnvFilter::try_from_env("WORDTAP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))?;

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::WordsLoaded(outcome) => app.on_words_loaded(outcome),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only Press: Release/Repeat would double up input on some terminals.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Typing => handle_typing_key(app, key),
        AppScreen::ListSelect => handle_picker_key(app, key),
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.open_list_picker(),
        KeyCode::Tab => app.restart(),
        KeyCode::Enter if app.store.is_finished() => app.retry(),
        code => {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return;
            }
            app.type_key(event::typing_key(code));
        }
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_list_picker(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.picker.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.picker.next(),
        KeyCode::Enter => app.select_list(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match app.screen {
        AppScreen::Typing => {
            let surface = app.surface();
            let typing = TypingArea::new(&surface, &app.theme);
            frame.render_stateful_widget(typing, ui::layout::typing_rect(layout.main), &mut app.typing_state);
        }
        AppScreen::ListSelect => {
            let current = app.config.word_list.as_str();
            let picker = ListPickerView::new(&app.picker, current, &app.theme);
            frame.render_widget(picker, ui::layout::centered_rect(40, 60, layout.main));
        }
    }

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let (done, total) = app.progress();
    let list = app
        .current_list
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let loading = if app.is_loading() { " | loading..." } else { "" };
    let info = format!(" {list} | {done}/{total}{loading}");

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordtap ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.text_pending()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    if let Some(ref status) = app.status {
        let footer = Paragraph::new(Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(footer, area);
        return;
    }

    let hints: &[&str] = match (app.screen, app.store.is_finished()) {
        (AppScreen::ListSelect, _) => &["[Enter] Switch", "[Esc] Back", "[q] Quit"],
        (AppScreen::Typing, true) => &["Done!", "[Enter] Again", "[Tab] New words", "[Esc] Lists"],
        (AppScreen::Typing, false) => &["[Space] Next word", "[Tab] New words", "[Esc] Lists", "[Ctrl+C] Quit"],
    };
    let line = ui::layout::pack_hint_lines(hints, usize::from(area.width))
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        line,
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, area);
}
