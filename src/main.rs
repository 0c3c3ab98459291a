//! Terminal front end for CineMagic.
//!
//! Reads one command per line from stdin and redraws the whole screen after
//! every command and every controller event (debounce timer or worker
//! response). Input and controller events are awaited together, so results
//! arrive while the user is typing.
//!
//! # Commands
//!
//! See [`cinemagic::ui::HELP_TEXT`]. `fav` and `open` resolve positions and
//! typed ids against the loaded movies before reaching the controller. While
//! the detail pane is open, positions refer to its recommendations.
//!
//! # Selection
//!
//! The highlighted row is front-end state. Moving down past the last row
//! requests the next batch.

#![allow(clippy::multiple_crate_versions)]

use cinemagic::provider::MovieProvider;
use cinemagic::runtime::CatalogController;
use cinemagic::storage::KeyValueStore;
use cinemagic::ui::{parse_command, render, Command, Theme, HELP_TEXT};
use cinemagic::{initialize, observability, Config, Genre};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "cinemagic")]
#[command(about = "Discover movies from your terminal", long_about = None)]
struct Args {
    /// Config file (default: <config dir>/cinemagic/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in theme name
    #[arg(long)]
    theme: Option<String>,

    /// Tracing filter, e.g. `debug` or `cinemagic=trace`
    #[arg(long)]
    trace_level: Option<String>,

    /// Directory for the watchlist and trace files
    #[arg(long)]
    data_dir: Option<String>,

    /// Screen height; defaults to $LINES or 30
    #[arg(long)]
    rows: Option<usize>,

    /// Screen width; defaults to $COLUMNS or 100
    #[arg(long)]
    cols: Option<usize>,
}

/// Rows below the frame: one for notices, one for the prompt.
const PROMPT_ROWS: usize = 2;

const NO_SUCH_MOVIE: &str = "No loaded movie matches that position or id.";

/// Front-end state that the controller does not own.
struct Screen {
    theme: Theme,
    rows: usize,
    cols: usize,
    selected: usize,
    notice: Option<String>,
}

enum Flow {
    Continue,
    Quit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cinemagic: {e}");
            return ExitCode::FAILURE;
        }
    };

    observability::init_tracing(&config);

    match run(&args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "cinemagic exited with an error");
            eprintln!("cinemagic: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> cinemagic::Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env();

    if let Some(theme) = &args.theme {
        config.theme.clone_from(theme);
        config.theme_file = None;
    }
    if let Some(level) = &args.trace_level {
        config.trace_level.clone_from(level);
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

fn env_size(name: &str) -> Option<usize> {
    std::env::var(name).ok()?.trim().parse().ok()
}

async fn run(args: &Args, config: &Config) -> cinemagic::Result<()> {
    let mut controller = initialize(config)?;
    let mut screen = Screen {
        theme: config.load_theme(),
        rows: args.rows.or_else(|| env_size("LINES")).unwrap_or(30),
        cols: args.cols.or_else(|| env_size("COLUMNS")).unwrap_or(100),
        selected: 0,
        notice: None,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    controller.start();
    draw(&controller, &screen)?;

    loop {
        let should_render = tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => match handle_line(&mut controller, &mut screen, &line) {
                        Flow::Continue => true,
                        Flow::Quit => break,
                    },
                    None => break,
                }
            }
            rendered = controller.process_next() => rendered,
        };

        if should_render {
            clamp_selection(&controller, &mut screen);
            draw(&controller, &screen)?;
        }
    }

    tracing::info!("cinemagic shutting down");
    Ok(())
}

fn handle_line<P, S>(controller: &mut CatalogController<P, S>, screen: &mut Screen, line: &str) -> Flow
where
    P: MovieProvider + 'static,
    S: KeyValueStore,
{
    screen.notice = None;
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            screen.notice = Some(e.to_string());
            return Flow::Continue;
        }
    };
    tracing::debug!(?command, "command");

    match command {
        Command::Search(text) => {
            screen.selected = 0;
            controller.set_search_query(text);
        }
        Command::Genre(genre) => {
            screen.selected = 0;
            controller.set_genre(genre);
        }
        Command::ListGenres => {
            let labels: Vec<&str> = Genre::ALL.iter().map(|genre| genre.label()).collect();
            screen.notice = Some(format!("Genres: {}", labels.join(", ")));
        }
        Command::Down => {
            let len = controller.visible_movies().len();
            if screen.selected + 1 < len {
                screen.selected += 1;
            } else {
                controller.load_next_page();
            }
        }
        Command::Up => screen.selected = screen.selected.saturating_sub(1),
        Command::More => {
            if !controller.load_next_page() {
                screen.notice = Some("Nothing more to load right now.".to_string());
            }
        }
        Command::Favorite(target) => {
            let resolved = controller.state().resolve_target(screen.selected, target.as_ref());
            match resolved {
                Some(id) => {
                    controller.toggle_favorite(id);
                }
                None => screen.notice = Some(NO_SUCH_MOVIE.to_string()),
            }
        }
        Command::Watchlist => {
            screen.selected = 0;
            controller.toggle_favorites_view();
        }
        Command::Open(target) => {
            let resolved = controller.state().resolve_target(screen.selected, target.as_ref());
            match resolved {
                Some(id) => {
                    controller.open_movie(id);
                }
                None => screen.notice = Some(NO_SUCH_MOVIE.to_string()),
            }
        }
        Command::Close => {
            controller.close_movie();
        }
        Command::Retry => {
            controller.retry();
        }
        Command::Help => screen.notice = Some(HELP_TEXT.replace('\n', " | ")),
        Command::Quit => return Flow::Quit,
    }

    Flow::Continue
}

fn clamp_selection<P, S>(controller: &CatalogController<P, S>, screen: &mut Screen)
where
    P: MovieProvider + 'static,
    S: KeyValueStore,
{
    let len = controller.visible_movies().len();
    screen.selected = screen.selected.min(len.saturating_sub(1));
}

fn draw<P, S>(controller: &CatalogController<P, S>, screen: &Screen) -> std::io::Result<()>
where
    P: MovieProvider + 'static,
    S: KeyValueStore,
{
    let frame_rows = screen.rows.saturating_sub(PROMPT_ROWS);
    let frame = render(controller.state(), screen.selected, &screen.theme, frame_rows, screen.cols);

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\u{1b}[2J{frame}")?;
    write!(stdout, "\u{1b}[{};1H", frame_rows + 1)?;
    if let Some(notice) = &screen.notice {
        write!(stdout, "{}{notice}{}", Theme::fg(&screen.theme.colors.text_dim), Theme::reset())?;
    }
    write!(stdout, "\u{1b}[{};1H> ", frame_rows + 2)?;
    stdout.flush()
}
