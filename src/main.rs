use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use star_shooter::audio::{self, Muted, SoundSink, TerminalBell};
use star_shooter::config::GameConfig;
use star_shooter::display::{self, Projection};
use star_shooter::entities::{GameStatus, Viewport};
use star_shooter::game::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SoundChoice {
    Off,
    Bell,
    Tone,
}

#[derive(Parser, Debug)]
#[command(name = "star_shooter")]
#[command(about = "Arcade shooter in the terminal: dodge the invaders, shoot them down")]
struct Args {
    /// TOML file with game tuning values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical viewport width in pixels (default: terminal columns × 10)
    #[arg(long)]
    width: Option<f32>,

    /// Logical viewport height in pixels (default: terminal rows × 20)
    #[arg(long)]
    height: Option<f32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for all random draws
    #[arg(long)]
    seed: Option<u64>,

    /// Sound effect backend
    #[arg(long, value_enum, default_value_t = SoundChoice::Bell)]
    sound: SoundChoice,

    /// Log file (stdout belongs to the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// What the loop should do after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("star_shooter.log"));
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn open_sound(choice: SoundChoice) -> Box<dyn SoundSink> {
    match choice {
        SoundChoice::Off => Box::new(Muted),
        SoundChoice::Bell => Box::new(TerminalBell),
        SoundChoice::Tone => audio::open_tone_player().unwrap_or_else(|err| {
            warn!(error = %err, "tone backend unavailable, sound muted");
            Box::new(Muted)
        }),
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    config.validate()?;
    Ok(config)
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn handle_event(game: &mut Game, event: Event, proj: &Projection, now: Duration) -> Control {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit;
            }
            KeyCode::Enter if game.status() == GameStatus::Welcome => {
                game.start(now);
            }
            KeyCode::Enter | KeyCode::Char(' ') => game.click(now),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                game.nudge(-game.config().keyboard_step);
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                game.nudge(game.config().keyboard_step);
            }
            _ => {}
        },
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => match kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                game.pointer_moved(proj.column_to_x(column));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if game.status() == GameStatus::Welcome {
                    if display::start_button(proj).contains(column, row) {
                        game.start(now);
                    }
                } else {
                    game.click(now);
                }
            }
            _ => {}
        },
        _ => {}
    }
    Control::Continue
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// While the frame loop is live (welcome animation or play) every tick
/// drains pending input, advances the game and redraws. Once the game is
/// over the last frame stays on screen and the loop blocks on input until
/// the restart interaction.
fn run<W: Write>(
    out: &mut W,
    game: &mut Game,
    proj: &Projection,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
) -> Result<()> {
    let clock = Instant::now();
    let mut live = true;

    loop {
        let frame_start = Instant::now();

        if !live {
            let Ok(ev) = rx.recv() else {
                return Ok(());
            };
            if handle_event(game, ev, proj, clock.elapsed()) == Control::Quit {
                return Ok(());
            }
            live = game.is_active();
            continue;
        }

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if handle_event(game, ev, proj, clock.elapsed()) == Control::Quit {
                return Ok(());
            }
        }

        live = game.frame(clock.elapsed());
        display::render(out, game, proj)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone())?;
    let config = load_config(&args)?;

    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let default_viewport = Projection::viewport_for(cols, rows);
    let viewport = Viewport::new(
        args.width.unwrap_or(default_viewport.width),
        args.height.unwrap_or(default_viewport.height),
    );
    let proj = Projection::new(viewport, cols, rows);
    info!(cols, rows, width = viewport.width, height = viewport.height, "viewport ready");

    let sound = open_sound(args.sound);
    let frame = config.frame_duration();
    let mut game = Game::new(config, viewport, args.seed, sound);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &mut game, &proj, &rx, frame);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = game.state().score, "exiting");
    result
}
