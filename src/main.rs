mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use turkey_hunt::compute::{init_state, resize, shoot, start_round, tick};
use turkey_hunt::config::{GameConfig, ROUND_SECONDS, TICK_RATE};
use turkey_hunt::entities::{Phase, RoundState};
use turkey_hunt::grid::{CellGrid, MIN_COLS, MIN_ROWS};

// ── Command line ──────────────────────────────────────────────────────────────

/// Shoot the turkeys before they fly off the screen.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Seed for spawn randomness. A fresh seed is drawn when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Simulation ticks per second. Everything in the round runs off this one clock.
    #[arg(
        long = "tick-rate",
        value_name = "HZ",
        default_value_t = TICK_RATE,
        value_parser = clap::value_parser!(u32).range(15..=120)
    )]
    tick_rate: u32,
    /// Length of a round in seconds.
    #[arg(
        long = "round-seconds",
        value_name = "SECONDS",
        default_value_t = ROUND_SECONDS,
        value_parser = clap::value_parser!(u32).range(10..=600)
    )]
    round_seconds: u32,
    /// Append log output to this file. RUST_LOG overrides the default `info` level.
    /// Without a file nothing is logged.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Logger writing to `log_file`, or `None` when there is no file.  The
/// terminal is in raw alternate-screen mode while playing, so stderr output
/// would tear the frame; RUST_LOG only picks the level of the file log.
fn file_logger(log_file: Option<&Path>) -> Result<Option<env_logger::Builder>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    Ok(Some(builder))
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    if let Some(mut builder) = file_logger(log_file)? {
        let _ = builder.try_init();
    }
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Control {
    Continue,
    Quit,
}

/// Apply one terminal event to the round.
///
/// Clicks shoot during a round and start the first round from the title
/// screen.  After a round ends a key press is required to go again, so a
/// burst of late clicks cannot restart it by accident.
fn handle_event(
    state: &mut RoundState,
    grid: &mut CellGrid,
    event: Event,
    rng: &mut StdRng,
) -> Control {
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
            KeyCode::Char('r') | KeyCode::Char('R') => {
                *state = start_round(state, rng);
            }
            KeyCode::Enter | KeyCode::Char(' ') if !state.phase.is_active() => {
                *state = start_round(state, rng);
            }
            _ => {}
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => match state.phase {
            Phase::Active(_) => {
                if let Some((x, y)) = grid.to_world(column, row) {
                    *state = shoot(state, x, y);
                }
            }
            Phase::Idle => {
                *state = start_round(state, rng);
            }
            Phase::Ended => {}
        },
        Event::Resize(cols, rows) => {
            *grid = CellGrid::new(cols, rows);
            if grid.fits() {
                *state = resize(state, grid.viewport());
                info!("resized to {}x{} cells", cols, rows);
            } else {
                warn!("terminal shrank to {}x{}, pausing", cols, rows);
            }
        }
        _ => {}
    }
    Control::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Draw what the player just did, then advance the round by one tick.  A
/// turkey hit by this frame's click shows its hit pose once before motion
/// drops it.
fn step_frame<W: Write>(
    out: &mut W,
    state: &mut RoundState,
    grid: &CellGrid,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    if grid.fits() {
        display::render(out, state, grid)?;
        *state = tick(state, rng);
    } else {
        display::render_too_small(out, grid)?;
    }
    Ok(())
}

/// One fixed-rate loop drives everything: drain input, render, advance the
/// round by exactly one tick, sleep off the rest of the frame.  The round
/// only advances while the terminal is big enough to show it.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut RoundState,
    grid: &mut CellGrid,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let frame = Duration::from_secs_f64(1.0 / state.config.tick_rate as f64);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Control::Quit = handle_event(state, grid, ev, rng) {
                return Ok(());
            }
        }

        step_frame(out, state, grid, rng)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_file.as_deref())?;

    let (cols, rows) = terminal::size().context("cannot query terminal size")?;
    let grid = CellGrid::new(cols, rows);
    if !grid.fits() {
        bail!(
            "terminal is {}x{}, need at least {}x{}",
            cols,
            rows,
            MIN_COLS,
            MIN_ROWS
        );
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);
    let config = GameConfig {
        tick_rate: args.tick_rate,
        round_seconds: args.round_seconds,
        ..GameConfig::default()
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
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

    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = grid;
    let mut state = init_state(grid.viewport(), config);
    let result = game_loop(&mut out, &mut state, &mut grid, &rx, &mut rng);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting, best score {}", state.best_score);
    result.context("terminal I/O failed")
}
