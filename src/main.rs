use std::io;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::warn;

use spellathon::app::{App, AppScreen};
use spellathon::config::Config;
use spellathon::event::{AppEvent, EventHandler};
use spellathon::logging;
use spellathon::session::{Controller, Mode};
use spellathon::speech;
use spellathon::store::{self, JsonStore, NullStore, ScoreStore};
use spellathon::ui::components::letter_grid::LetterGrid;
use spellathon::ui::components::menu::MenuScreen;
use spellathon::ui::components::progress_bar::ProgressBar;
use spellathon::ui::components::summary::SummaryScreen;
use spellathon::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use spellathon::words::{Category, WordSource};

#[derive(Parser)]
#[command(
    name = "spellathon",
    version,
    about = "Spoken spelling quiz for the terminal"
)]
struct Cli {
    #[arg(short, long, help = "Start straight away with this word list (e.g. week1, all)")]
    category: Option<String>,

    #[arg(short, long, help = "Give each word a countdown")]
    timed: bool,

    #[arg(long, help = "Shorter countdown (implies --timed)")]
    hard: bool,

    #[arg(short, long, help = "Do not read words aloud")]
    mute: bool,

    #[arg(long, help = "Seed for the order of the combined word list")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&store::data_dir());

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!("unreadable config, using defaults: {err:#}");
        Config::default()
    });
    if !Config::exists()
        && let Err(err) = config.save()
    {
        warn!("could not write default config: {err:#}");
    }
    if cli.mute {
        config.speech_enabled = false;
    }
    if cli.seed.is_some() {
        config.shuffle_seed = cli.seed;
    }

    let words = WordSource::embedded(config.shuffle_seed)?;
    let category = match cli.category {
        Some(id) => {
            let category = Category::new(id);
            if !words.contains(&category) {
                let known: Vec<String> =
                    words.categories().iter().map(|c| c.to_string()).collect();
                bail!(
                    "unknown word list `{category}`, expected one of: {}",
                    known.join(", ")
                );
            }
            Some(category)
        }
        None => None,
    };

    let narrator = speech::narrator(config.speech_enabled);
    let store: Box<dyn ScoreStore> = match JsonStore::new() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("high score will not be kept: {err:#}");
            Box::new(NullStore)
        }
    };

    let controller = Controller::new(
        words,
        narrator,
        store,
        config.voice(),
        SmallRng::from_entropy(),
    );
    let mut app = App::new(controller);
    if let Some(category) = category {
        app.start(category, Mode::from_flags(cli.timed, cli.hard), Instant::now());
    } else {
        app.menu.mode = Mode::from_flags(cli.timed, cli.hard);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

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
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Playing => handle_play_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Left | KeyCode::Char('h') => app.menu.prev_mode(),
        KeyCode::Right | KeyCode::Char('l') => app.menu.next_mode(),
        KeyCode::Char(digit @ '1'..='3') => {
            let index = digit as usize - '1' as usize;
            app.menu.mode = Mode::ALL[index];
            app.start_selected(now);
        }
        KeyCode::Enter => app.start_selected(now),
        _ => {}
    }
}

fn handle_play_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.submit(Instant::now()),
        KeyCode::Tab => app.request_narration(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.play_again(Instant::now()),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_summary(false),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_summary(true),
        KeyCode::Char('q') | KeyCode::Char('m') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Playing => render_play(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str], layout: &AppLayout) {
    let lines: Vec<Line> = pack_hint_lines(hints, layout.footer.width as usize)
        .into_iter()
        .map(|text| {
            Line::from(Span::styled(
                text,
                Style::default().fg(app.theme.colors.text_pending()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.footer);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let colors = &app.theme.colors;

    let header = Paragraph::new(Line::from(Span::styled(
        " spellathon ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let menu_area = centered_rect(60, 80, 60, 18, layout.main);
    frame.render_widget(
        MenuScreen::new(&app.menu, app.controller.high_score(), &app.theme),
        menu_area,
    );

    render_footer(
        frame,
        app,
        &[
            "[Up/Down] Word list",
            "[Left/Right] Mode",
            "[Enter] Start",
            "[1-3] Start in mode",
            "[q] Quit",
        ],
        &layout,
    );
}

fn render_play(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.controller.session() else {
        return;
    };
    let layout = AppLayout::new(frame.area());
    let colors = &app.theme.colors;
    let words = app.controller.words();
    let label = words.label(session.category());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {label} | {} ", session.mode().label()),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "| Score {} | Best {}",
                session.score(),
                app.controller.high_score()
            ),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let cells = session.cells();
    let grid_height = LetterGrid::height_for(cells.len(), layout.main.width).max(3);
    let mut constraints = vec![Constraint::Length(1)];
    if session.mode().is_timed() {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(2),
        Constraint::Length(grid_height),
        Constraint::Min(0),
    ]);
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(layout.main);

    let hearts = "\u{2665} ".repeat(session.lives() as usize);
    let word_number = session.used_words().len();
    let total = words.words_for(session.category()).len();
    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {hearts}"), Style::default().fg(colors.error())),
        Span::styled(
            format!("  Word {word_number} of {total}"),
            Style::default().fg(colors.text_pending()),
        ),
    ]));
    frame.render_widget(status, main[0]);

    let mut idx = 1;
    if session.mode().is_timed() {
        let seconds = session.mode().word_seconds();
        let left = session.time_left();
        let fill = if left <= 3 {
            colors.warning()
        } else {
            colors.bar_filled()
        };
        let bar = ProgressBar::new(
            "Time",
            left as f64 / seconds as f64,
            format!("{left}s"),
            &app.theme,
        )
        .fill(fill);
        frame.render_widget(bar, main[idx]);
        idx += 1;
    }

    let prompt = if session.failed_attempts() > 0 {
        Span::styled(
            format!(" Not quite. Try again ({} missed)", session.failed_attempts()),
            Style::default().fg(colors.warning()),
        )
    } else {
        Span::styled(
            " Listen and type the word",
            Style::default().fg(colors.fg()),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(prompt)), main[idx]);
    idx += 1;

    frame.render_widget(LetterGrid::new(&cells, &app.theme), main[idx]);

    render_footer(
        frame,
        app,
        &[
            "[Enter] Check",
            "[Tab] Hear again",
            "[Backspace] Delete",
            "[Esc] Menu",
        ],
        &layout,
    );
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let Some(summary) = app.summary.as_ref() else {
        return;
    };
    let layout = AppLayout::new(frame.area());
    let label = app.controller.words().label(&summary.category);

    let area = centered_rect(70, 90, 60, 12, layout.main);
    frame.render_widget(
        SummaryScreen::new(
            summary,
            label,
            app.controller.high_score(),
            app.summary_scroll,
            &app.theme,
        ),
        area,
    );

    render_footer(
        frame,
        app,
        &["[r/Enter] Play again", "[Up/Down] Scroll", "[Esc] Menu"],
        &layout,
    );
}
