/// Draws a `GameState` onto the terminal.  Reads state, never changes it;
/// the only work done here is scaling logical pixels down to cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use homing_shooter::entities::{GameState, Phase, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_GOAL: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Logical pixels covered by one terminal cell when the play area follows
/// the terminal size.
pub const CELL_WIDTH_PX: f32 = 10.0;
pub const CELL_HEIGHT_PX: f32 = 25.0;

/// Terminal rows taken by the HUD, the two border bars and the hint line.
const CHROME_ROWS: u16 = 4;
/// Terminal columns taken by the two side walls.
const CHROME_COLS: u16 = 2;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The terminal surface the play area is drawn onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn inner_cols(&self) -> u16 {
        self.cols.saturating_sub(CHROME_COLS)
    }

    fn inner_rows(&self) -> u16 {
        self.rows.saturating_sub(CHROME_ROWS)
    }

    /// Play-area size in logical pixels that exactly fills this viewport.
    pub fn natural_area(&self) -> (f32, f32) {
        (
            self.inner_cols() as f32 * CELL_WIDTH_PX,
            self.inner_rows() as f32 * CELL_HEIGHT_PX,
        )
    }

    /// Map a logical rectangle onto the cells it covers, clipped to the
    /// interior.  Returns `(col, row, cols, rows)`; never zero-sized unless
    /// the rectangle is entirely outside.
    fn cells_for(&self, rect: &Rect, state: &GameState) -> Option<(u16, u16, u16, u16)> {
        let inner_c = self.inner_cols() as f32;
        let inner_r = self.inner_rows() as f32;
        if inner_c < 1.0 || inner_r < 1.0 {
            return None;
        }
        let sx = inner_c / state.area.width;
        let sy = inner_r / state.area.height;

        let c0 = (rect.x * sx).floor().max(0.0);
        let r0 = (rect.y * sy).floor().max(0.0);
        let c1 = ((rect.x + rect.w) * sx).ceil().min(inner_c).max(c0 + 1.0);
        let r1 = ((rect.y + rect.h) * sy).ceil().min(inner_r).max(r0 + 1.0);
        if c0 >= inner_c || r0 >= inner_r {
            return None;
        }
        // first interior column is 1, first interior row is 2
        Some((
            c0 as u16 + 1,
            r0 as u16 + 2,
            (c1.min(inner_c) - c0) as u16,
            (r1.min(inner_r) - r0) as u16,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Clear and redraw the whole screen.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for enemy in &state.enemies {
        fill(out, view, state, &enemy.hitbox(), C_ENEMY, '▒')?;
    }
    for bullet in &state.bullets {
        fill(out, view, state, &bullet.hitbox(), C_BULLET, '║')?;
    }
    fill(out, view, state, &state.player.hitbox(), C_PLAYER, '█')?;

    draw_controls_hint(out, view)?;

    match state.phase {
        Phase::NotStarted => draw_start_screen(out, view)?,
        Phase::Running => {}
        Phase::GameOver => draw_game_over(out, state, view)?,
        Phase::Won => draw_won(out, state, view)?,
    }

    // leave the cursor on the hint row
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

/// Frame the play area: bars on row 1 and the row above the hint, walls on
/// the first and last column in between.
fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let span = "─".repeat(view.inner_cols() as usize);
    let top = 1;
    let bottom = view.rows.saturating_sub(2);
    let right = view.cols.saturating_sub(1);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    for (row, left, right_corner) in [(top, '┌', '┐'), (bottom, '└', '┘')] {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(format!("{left}{span}{right_corner}")))?;
    }
    for row in (top + 1)..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print('│'))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print('│'))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("Health:{:>4}", state.player.health.max(0))))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(" | "))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", state.score)))?;

    if let Some(target) = state.tuning.winning_score {
        let goal = format!("[ GOAL {} ]", target);
        let gx = view.cols.saturating_sub(goal.len() as u16 + 1);
        out.queue(cursor::MoveTo(gx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_GOAL))?;
        out.queue(Print(goal))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    rect: &Rect,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let Some((col, row, cols, rows)) = view.cells_for(rect, state) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(cols as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for r in row..row + rows {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ ↓ → / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Print `lines` centred on the viewport.
fn draw_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_start_screen<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let lines = [
        ("★  SHOOTING  GAME  ★".to_string(), Color::Cyan),
        (String::new(), Color::White),
        ("Press Space to Shoot".to_string(), Color::White),
        ("Use Arrow Keys to Move".to_string(), Color::White),
        (String::new(), Color::White),
        ("ENTER - Play   Q - Quit".to_string(), Color::Yellow),
    ];
    draw_centered(out, view, &lines)
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Health: {:>4}", state.player.health), Color::Red),
        (format!("Score:  {:>4}", state.score), Color::Yellow),
        ("R - Replay  Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, view, &lines)
}

fn draw_won<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let lines = [
        ("╔══════════════════════════════════╗".to_string(), Color::Yellow),
        ("║ Congratulations, You Won the War ║".to_string(), Color::Yellow),
        ("╚══════════════════════════════════╝".to_string(), Color::Yellow),
        (format!("Score: {}", state.score), Color::Yellow),
        ("R - Replay  Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, view, &lines)
}
