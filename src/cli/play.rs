//! Play command implementation - the game in the terminal.

// Options are taken by value from clap
#![allow(clippy::needless_pass_by_value)]

use super::keys::KeyTracker;
use super::terminal::TerminalSurface;
use super::{CliError, load_config};
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tilequest::render::{AssetSource, FsAssets, NoAssets};
use tilequest::{Game, Keys};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config is invalid, the log file cannot be
/// opened, or the terminal fails.
pub(crate) fn execute(
    config: Option<PathBuf>,
    seed: Option<u64>,
    assets: Option<PathBuf>,
    fps: u32,
    log: PathBuf,
) -> Result<(), CliError> {
    let mut config = load_config(config.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;

    let _guard = init_logging(&log)?;
    info!(log = %log.display(), "logging initialized");

    let assets: Box<dyn AssetSource> = match assets {
        Some(dir) => Box::new(FsAssets::new(dir)),
        None => Box::new(NoAssets),
    };
    let game = Game::new(config, assets);

    let frame = Duration::from_secs_f64(1.0 / f64::from(fps.clamp(10, 240)));
    run_tui(game, frame)
}

/// Install a file logger. The terminal belongs to the game.
fn init_logging(path: &std::path::Path) -> Result<tracing_appender::non_blocking::WorkerGuard, CliError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file = path
        .file_name()
        .ok_or_else(|| CliError::new(format!("not a log file path: {}", path.display())))?;
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| CliError::new(format!("failed to install logger: {e}")))?;
    Ok(guard)
}

/// `RUST_LOG` directives when present and well formed, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn run_tui(mut game: Game, frame: Duration) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
            )
        )?;
    } else {
        warn!("terminal does not report key releases; held keys time out");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = frame_loop(&mut terminal, &mut game, frame, enhanced);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn frame_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    game: &mut Game,
    frame: Duration,
    enhanced: bool,
) -> Result<(), CliError> {
    let mut keys = KeyTracker::new(enhanced);
    let size = terminal.size().map_err(|e| CliError::new(e.to_string()))?;
    let mut surface = TerminalSurface::new(size.width, size.height);
    let mut last = Instant::now();

    loop {
        // Drain input without blocking past the frame budget
        let deadline = last + frame;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                keys.handle(key, Instant::now());
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        let down = keys.snapshot(now);
        if down.contains(Keys::ESCAPE) {
            info!("quit requested");
            break;
        }
        game.tick(dt, down);

        terminal
            .draw(|f| {
                let area = f.area();
                surface.reset(area.width, area.height);
                game.draw(&mut surface);
                f.render_widget(&surface, area);
            })
            .map_err(|e| CliError::new(e.to_string()))?;
    }

    Ok(())
}
