//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! round state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use turkey_hunt::compute::{is_low_time, score_message};
use turkey_hunt::entities::{
    Direction, Feedback, FeedbackKind, Phase, RoundState, Turkey, Variant,
};
use turkey_hunt::grid::{CellGrid, CELL_HEIGHT, CELL_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_HUD_TIME_LOW: Color = Color::Red;
const C_TURKEY_NORMAL: Color = Color::DarkYellow;
const C_TURKEY_FAST: Color = Color::Yellow;
const C_TURKEY_ERRATIC: Color = Color::Green;
const C_TURKEY_HIT: Color = Color::DarkGrey;
const C_MUZZLE: Color = Color::Yellow;
const C_HIT_BURST: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites (5 cols × 2 rows = one 50 px hit box) ─────────────────────────────

const SPRITE_RIGHT: [&str; 2] = ["}@@o>", " ^ ^ "];
const SPRITE_LEFT: [&str; 2] = ["<o@@{", " ^ ^ "];
const SPRITE_HIT: [&str; 2] = ["\\\\|//", " x_x "];

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &RoundState, grid: &CellGrid) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, grid)?;

    match state.phase {
        Phase::Idle => draw_title(out, grid)?,
        Phase::Active(_) | Phase::Ended => {
            draw_hud(out, state, grid)?;
            for turkey in &state.turkeys {
                draw_turkey(out, turkey, state, grid)?;
            }
            for cue in &state.feedback {
                draw_feedback(out, cue, state, grid)?;
            }
        }
    }

    draw_controls_hint(out, state, grid)?;

    if state.phase == Phase::Ended {
        draw_game_over(out, state, grid)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Shown instead of the game when the terminal is too small to play in.
pub fn render_too_small<W: Write>(out: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(format!(
        "Terminal too small ({}x{}), please enlarge it",
        grid.cols, grid.rows
    )))?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    let w = grid.cols as usize;
    let h = grid.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &RoundState, grid: &CellGrid) -> std::io::Result<()> {
    // Score and best: left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if state.best_score > 0 {
        out.queue(Print(format!(
            "Score:{:>6}  Best:{:>6}",
            state.score, state.best_score
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", state.score)))?;
    }

    // Time left: right, red once the round is nearly over
    let time_str = format!("Time Left: {:>3}s", state.time_remaining);
    let tx = grid
        .cols
        .saturating_sub(time_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    if is_low_time(state) {
        out.queue(style::SetForegroundColor(C_HUD_TIME_LOW))?;
        out.queue(style::SetAttribute(style::Attribute::Bold))?;
        out.queue(Print(&time_str))?;
        out.queue(style::SetAttribute(style::Attribute::Reset))?;
    } else {
        out.queue(style::SetForegroundColor(C_HUD_TIME))?;
        out.queue(Print(&time_str))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Print `text` starting at pixel position `(x, y)`, one glyph per cell,
/// dropping glyphs that fall outside the play area.
fn print_clipped<W: Write>(
    out: &mut W,
    grid: &CellGrid,
    x: f32,
    y: f32,
    text: &str,
) -> std::io::Result<()> {
    for (i, ch) in text.chars().enumerate() {
        if ch == ' ' {
            continue;
        }
        if let Some((col, row)) = grid.to_cell(x + i as f32 * CELL_WIDTH, y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

fn draw_turkey<W: Write>(
    out: &mut W,
    turkey: &Turkey,
    state: &RoundState,
    grid: &CellGrid,
) -> std::io::Result<()> {
    let (sprite, color) = if turkey.hit {
        (SPRITE_HIT, C_TURKEY_HIT)
    } else {
        let sprite = match turkey.direction {
            Direction::Left => SPRITE_LEFT,
            _ => SPRITE_RIGHT,
        };
        let color = match turkey.variant {
            Variant::Normal => C_TURKEY_NORMAL,
            Variant::Fast => C_TURKEY_FAST,
            Variant::Erratic => C_TURKEY_ERRATIC,
        };
        (sprite, color)
    };

    // Anchor glyphs on cell centres so a turkey straddling a cell edge
    // rounds to the nearer cell.
    let x = turkey.x + CELL_WIDTH / 2.0;
    let y = turkey.y + CELL_HEIGHT / 2.0;
    let rows = (state.config.turkey_size / CELL_HEIGHT).ceil() as usize;

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.iter().take(rows.max(1)).enumerate() {
        print_clipped(out, grid, x, y + i as f32 * CELL_HEIGHT, line)?;
    }
    Ok(())
}

fn draw_feedback<W: Write>(
    out: &mut W,
    cue: &Feedback,
    state: &RoundState,
    grid: &CellGrid,
) -> std::io::Result<()> {
    match cue.kind {
        FeedbackKind::MuzzleFlash => {
            out.queue(style::SetForegroundColor(C_MUZZLE))?;
            print_clipped(out, grid, cue.x, cue.y, "*")?;
        }
        FeedbackKind::HitBurst => {
            // Popup drifts one row above the burst point.
            let label = format!("+{}", state.config.points_per_hit);
            let x = cue.x - label.chars().count() as f32 * CELL_WIDTH / 2.0;
            out.queue(style::SetForegroundColor(C_HIT_BURST))?;
            print_clipped(out, grid, x, cue.y - CELL_HEIGHT, &label)?;
        }
    }
    Ok(())
}

// ── Title screen ──────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    let cx = grid.cols / 2;
    let cy = grid.rows / 2;

    let lines: &[(&str, Color)] = &[
        ("»  TURKEY  HUNT  «", Color::Yellow),
        ("", Color::Reset),
        ("Shoot the turkeys before time runs out!", Color::White),
        ("", Color::Reset),
        ("Click or press ENTER to start hunting", Color::Green),
    ];
    let start_row = cy.saturating_sub(lines.len() as u16);
    for (i, (msg, color)) in lines.iter().enumerate() {
        if msg.is_empty() {
            continue;
        }
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    // Variant legend
    let legend: &[(&str, Color, &str)] = &[
        (SPRITE_RIGHT[0], C_TURKEY_NORMAL, "  Turkey"),
        (SPRITE_RIGHT[0], C_TURKEY_FAST, "  Fast turkey (mid-round)"),
        (SPRITE_RIGHT[0], C_TURKEY_ERRATIC, "  Erratic turkey (final stretch)"),
    ];
    let legend_row = start_row + lines.len() as u16 + 1;
    for (i, (sprite, color, desc)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(16), legend_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*sprite))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*desc))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &RoundState,
    grid: &CellGrid,
) -> std::io::Result<()> {
    let hint = match state.phase {
        Phase::Idle => "Click / ENTER : Start   Q : Quit",
        Phase::Active(_) => "Click : Shoot   R : Restart   Q : Quit",
        Phase::Ended => "ENTER / R : Hunt Again   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &RoundState,
    grid: &CellGrid,
) -> std::io::Result<()> {
    let new_best = state.score >= state.best_score && state.score > 0;
    let score_line = format!("Final Score: {:>6}", state.score);
    let best_line = if new_best {
        format!("» NEW BEST: {:>6} «", state.best_score)
    } else {
        format!("Best Score:  {:>6}", state.best_score)
    };

    let lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║     GAME  OVER     ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (score_line, Color::Yellow),
        (score_message(state.score).to_string(), Color::Cyan),
        (best_line, if new_best { Color::Yellow } else { Color::DarkGrey }),
        ("ENTER / R - Hunt Again  Q - Quit".to_string(), Color::White),
    ];

    let cx = grid.cols / 2;
    let start_row = (grid.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
