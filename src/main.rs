use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use room_trace::config::Config;
use room_trace::game::Progression;
use room_trace::puzzle::{load_catalog, Catalog};
use room_trace::save::{FileStore, SaveStore};
use room_trace::ui::{draw_ui, App};

/// How often the loop wakes up without input, to run timers.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "room-trace")]
#[command(about = "Escape numbered rooms by solving the puzzle on each door")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "room-trace.toml")]
    config: PathBuf,

    /// Directory for the save file and log (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Discard saved progress and start from room 1
    #[arg(long)]
    reset: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(config: &Config, verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => config
            .logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let path = config.log_file();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    init_logging(&config, cli.verbose)?;
    if !cli.config.exists() {
        info!("no config at {}, using defaults", cli.config.display());
    }

    let catalog = match &config.puzzles.path {
        Some(path) => load_catalog(path)?,
        None => Catalog::builtin()?,
    };
    info!("catalog ready with {} rooms", catalog.len());

    let mut store = FileStore::new(&config.storage.data_dir, &config.storage.save_key);
    if cli.reset {
        store.clear()?;
        info!("save cleared");
    }

    let (game, startup) = Progression::start(
        config.stage.clone(),
        config.rules.clone(),
        catalog,
        store,
        StdRng::from_entropy(),
    );
    let mut app = App::new(game, startup);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &outcome {
        warn!("session ended with error: {:#}", e);
    }
    outcome?;
    println!(
        "\nProgress kept at room {}.\n",
        app.game.state().current_room_id
    );
    Ok(())
}

fn run<S: SaveStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_, S>,
) -> Result<()> {
    while !app.quit {
        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.on_key(key, Instant::now());
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app.on_click(mouse.column, mouse.row, Instant::now());
                    }
                }
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}
