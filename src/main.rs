mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use homing_shooter::compute::{spawn_enemy, tick};
use homing_shooter::config::{Ruleset, Tuning};
use homing_shooter::entities::{GameState, PlayArea};
use homing_shooter::input::{apply_command, command_for};
use homing_shooter::lifecycle::{initial_state, replay, resize, start};
use homing_shooter::scheduler::Timers;

use display::Viewport;

/// How long the loop sleeps on input when no timer is armed.
const IDLE_WAIT: Duration = Duration::from_millis(250);

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliRuleset {
    /// Straight into play, no win condition
    Quick,
    /// Start screen, no win condition
    Standard,
    /// Start screen, win at the target score
    Campaign,
}

impl From<CliRuleset> for Ruleset {
    fn from(value: CliRuleset) -> Self {
        match value {
            CliRuleset::Quick => Ruleset::Quick,
            CliRuleset::Standard => Ruleset::Standard,
            CliRuleset::Campaign => Ruleset::Campaign,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "homing_shooter")]
#[command(about = "Top-down terminal shooter: hold off enemies that home in on you")]
struct Cli {
    #[arg(long, value_enum, default_value_t = CliRuleset::Standard)]
    ruleset: CliRuleset,
    /// Player step per key press, in logical pixels
    #[arg(long)]
    soldier_speed: Option<f32>,
    /// Enemy step per tick
    #[arg(long)]
    enemy_speed: Option<f32>,
    /// Bullet step per tick
    #[arg(long)]
    bullet_speed: Option<f32>,
    /// Milliseconds between enemy spawns
    #[arg(long)]
    spawn_ms: Option<u64>,
    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Health lost per touching enemy per tick
    #[arg(long)]
    damage: Option<i32>,
    /// Score that wins the run (enables the win condition for any ruleset)
    #[arg(long)]
    winning_score: Option<u32>,
    /// Fixed play-area width in logical pixels (default: follow the terminal)
    #[arg(long, requires = "height")]
    width: Option<f32>,
    /// Fixed play-area height in logical pixels
    #[arg(long, requires = "width")]
    height: Option<f32>,
    /// Seed for enemy placement
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here (RUST_LOG defaults to `info` when set)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn tuning(&self) -> Result<Tuning> {
        let base = Tuning::for_ruleset(self.ruleset.into());
        let tuning = Tuning {
            soldier_speed: self.soldier_speed.unwrap_or(base.soldier_speed),
            enemy_speed: self.enemy_speed.unwrap_or(base.enemy_speed),
            bullet_speed: self.bullet_speed.unwrap_or(base.bullet_speed),
            spawn_interval: self
                .spawn_ms
                .map(Duration::from_millis)
                .unwrap_or(base.spawn_interval),
            tick_interval: self
                .tick_ms
                .map(Duration::from_millis)
                .unwrap_or(base.tick_interval),
            damage: self.damage.unwrap_or(base.damage),
            winning_score: self.winning_score.or(base.winning_score),
            ..base
        };
        tuning.validate().context("invalid tuning")?;
        Ok(tuning)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // The game owns the terminal, so logs only go out when sent to a file
    // or explicitly requested through RUST_LOG.
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .init();
        }
    }
    Ok(())
}

/// Resolve the play area: the fixed size from the command line, or whatever
/// the terminal currently fits.
fn play_area(cli: &Cli, view: Viewport) -> Result<PlayArea> {
    let (width, height) = match (cli.width, cli.height) {
        (Some(w), Some(h)) => (w, h),
        _ => view.natural_area(),
    };
    PlayArea::new(width, height).with_context(|| {
        format!(
            "terminal {}x{} is too small to play in",
            view.cols, view.rows
        )
    })
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

/// Host-level keys first (quit, start, replay), then in-run controls.
fn handle_key(state: &mut GameState, code: KeyCode, modifiers: KeyModifiers) -> Flow {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => *state = start(state),
        KeyCode::Char('r') | KeyCode::Char('R') => *state = replay(state),
        other => {
            if let Some(command) = command_for(other) {
                *state = apply_command(state, command);
            }
        }
    }
    Flow::Continue
}

/// Run until the player quits.  Input, the tick timer and the spawn timer
/// are multiplexed onto this one thread; the timers are re-synced with the
/// phase after every state change so nothing fires once a run has ended.
fn game_loop<W: Write>(
    out: &mut W,
    cli: &Cli,
    state: &mut GameState,
    view: &mut Viewport,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut timers = Timers::new(&state.tuning);
    let fixed_area = cli.width.is_some();

    display::render(out, state, *view)?;

    loop {
        timers.sync(state.phase, Instant::now());
        let wait = timers
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);

        let mut dirty = false;
        match rx.recv_timeout(wait) {
            Ok(Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            })) if kind != KeyEventKind::Release => {
                if let Flow::Quit = handle_key(state, code, modifiers) {
                    break;
                }
                dirty = true;
            }
            Ok(Event::Resize(cols, rows)) => {
                *view = Viewport::new(cols, rows);
                if !fixed_area {
                    match play_area(cli, *view) {
                        Ok(area) => *state = resize(state, area),
                        Err(err) => warn!("ignoring resize: {err:#}"),
                    }
                }
                dirty = true;
            }
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                warn!("input thread stopped, exiting");
                break;
            }
        }
        // a key may have ended or started the run
        let now = Instant::now();
        timers.sync(state.phase, now);

        if timers.spawn.poll(now) {
            *state = spawn_enemy(state, &mut rng);
            dirty = true;
        }
        if timers.tick.poll(now) {
            *state = tick(state);
            timers.sync(state.phase, now);
            dirty = true;
        }

        if dirty {
            display::render(out, state, *view)?;
        }
    }

    timers.cancel();
    Ok(())
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Switch to raw mode on the alternate screen.  Returns whether the terminal
/// agreed to tag key events as press / repeat / release, which lets held keys
/// be told apart from releases.
fn enter_game_screen<W: Write>(out: &mut W) -> Result<bool> {
    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?
        .execute(cursor::Hide)?;
    let typed_events = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !typed_events {
        info!("terminal reports key presses only");
    }
    Ok(typed_events)
}

/// Undo `enter_game_screen`.  Best effort: a failure here leaves nothing
/// further to clean up.
fn leave_game_screen<W: Write>(out: &mut W, typed_events: bool) {
    if typed_events {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    if let Err(err) = terminal::disable_raw_mode() {
        warn!("cannot leave raw mode: {err}");
    }
}

/// Blocking terminal reads happen on their own thread and arrive over a
/// channel, so the loop can wait on input and timer deadlines together.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;
    let tuning = cli.tuning()?;

    // Measure the surface before anything is scheduled
    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let mut view = Viewport::new(cols, rows);
    let area = play_area(&cli, view)?;
    info!(
        "starting {:?} with a {}x{} play area",
        cli.ruleset, area.width, area.height
    );
    let mut state = initial_state(tuning, area);

    let mut out = BufWriter::new(stdout());
    let typed_events = enter_game_screen(&mut out)?;
    let rx = spawn_input_reader();

    let result = game_loop(&mut out, &cli, &mut state, &mut view, &rx);
    leave_game_screen(&mut out, typed_events);

    info!(
        "exiting in {:?} with score {} after {} ticks",
        state.phase, state.score, state.ticks
    );
    result
}
