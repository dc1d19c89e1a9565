/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of
/// the settled post-advance session.  No game logic is performed; this
/// module only scales world pixels to terminal cells and translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use riptide::entities::{Enemy, EnemyKind, Player, Projectile, MAX_AMMO};
use riptide::session::{GameSession, TIME_LIMIT_MS, WINNING_SCORE};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_HUD_AMMO: Color = Color::Cyan;
const C_HUD_AMMO_POWERED: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_POWERED: Color = Color::Yellow;
const C_ANGLER1: Color = Color::Green;
const C_ANGLER2: Color = Color::Red;
const C_LUCKY: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_BACKGROUND: Color = Color::DarkBlue;
const C_DEBUG: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Mapping from world pixels to terminal cells.
#[derive(Clone, Copy)]
struct Scale {
    sx: f32,
    sy: f32,
    cols: u16,
    rows: u16,
}

impl Scale {
    /// Returns the cell for a world position, or `None` when it falls
    /// outside the terminal (the player may drift off-world).
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.sx).floor();
        let row = (y * self.sy).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let scale = Scale {
        sx: cols as f32 / session.world.width,
        sy: rows as f32 / session.world.height,
        cols,
        rows,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, session, &scale)?;
    for projectile in &session.player.projectiles {
        draw_projectile(out, projectile, &scale)?;
    }
    for enemy in &session.enemies {
        draw_enemy(out, enemy, session.world.debug, &scale)?;
    }
    draw_player(out, &session.player, &scale)?;
    draw_hud(out, session, &scale)?;
    if session.world.debug {
        draw_debug_line(out, session)?;
    }
    draw_controls_hint(out, rows)?;

    if session.game_over {
        draw_end_screen(out, session, &scale)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Scatters a sparse char pattern per parallax layer, shifted by the
/// layer's scroll offset.  Far layers are sparser than near ones.
fn draw_background<W: Write>(
    out: &mut W,
    session: &GameSession,
    scale: &Scale,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    for (li, layer) in session.background.layers.iter().enumerate() {
        let spacing = 16 - 3 * li as i32; // nearer layers are denser
        let shift = (layer.offset * scale.sx) as i32;
        let glyph = match li {
            0 => "·",
            1 => "∙",
            2 => "°",
            _ => "~",
        };
        let mut col = 0;
        while col < scale.cols as i32 {
            // Deterministic pseudo-scatter keyed on column and layer.
            let row = 2 + ((col * 7 + li as i32 * 13) % (scale.rows as i32 - 4).max(1));
            let shifted = (col + shift).rem_euclid(scale.cols as i32);
            out.queue(cursor::MoveTo(shifted as u16, row as u16))?;
            out.queue(Print(glyph))?;
            col += spacing.max(4);
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession, scale: &Scale) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>4}", session.score)))?;

    // Timer — centre
    let secs_left = ((TIME_LIMIT_MS - session.game_time).max(0.0)) / 1000.0;
    let time_str = format!("Time: {:>4.1}s", secs_left);
    let cx = (scale.cols / 2).saturating_sub(time_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;

    // Ammo — right, one pip per 5 rounds
    let ammo = session.player.ammo;
    let pips = "▪".repeat((ammo / 5.0).floor() as usize);
    let ammo_str = format!("Ammo: {:>2.0}/{:.0} {}", ammo.floor(), MAX_AMMO, pips);
    let rx = scale
        .cols
        .saturating_sub(ammo_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(if session.player.power_up {
        C_HUD_AMMO_POWERED
    } else {
        C_HUD_AMMO
    }))?;
    out.queue(Print(&ammo_str))?;

    Ok(())
}

fn draw_debug_line<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_DEBUG))?;
    out.queue(Print(format!(
        "dbg  enemies:{:<3} shots:{:<3} py:{:<6.1} power:{} ({:>5.0}ms)",
        session.enemies.len(),
        session.player.projectiles.len(),
        session.player.rect.y,
        session.player.power_up,
        session.player.power_up_timer,
    )))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, player: &Player, scale: &Scale) -> std::io::Result<()> {
    // frame_y row 1 is the powered-up sprite
    out.queue(style::SetForegroundColor(if player.frame_y == 1 {
        C_PLAYER_POWERED
    } else {
        C_PLAYER
    }))?;

    // Two-row sprite anchored at the rect's vertical midpoint; the
    // rect itself is much taller than two cells.
    let mid_y = player.rect.y + player.rect.height / 2.0;
    if let Some((col, row)) = scale.cell(player.rect.x, mid_y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("╔══▷"))?;
        if row + 1 < scale.rows {
            out.queue(cursor::MoveTo(col, row + 1))?;
            out.queue(Print("╚═╝"))?;
        }
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    debug: bool,
    scale: &Scale,
) -> std::io::Result<()> {
    // Two-phase swim animation driven by the cyclic frame counter.
    let phase = (enemy.frame_x / 5) % 2 == 0;
    let (color, sprite) = match enemy.kind {
        EnemyKind::Angler1 => (C_ANGLER1, if phase { "<(o)≡" } else { "<(O)≡" }),
        EnemyKind::Angler2 => (C_ANGLER2, if phase { "<{@}=" } else { "<{e}=" }),
        EnemyKind::LuckyFish => (C_LUCKY, if phase { "<($)~" } else { "<(s)~" }),
    };

    let mid_y = enemy.rect.y + enemy.rect.height / 2.0;
    if let Some((col, row)) = scale.cell(enemy.rect.x, mid_y) {
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(sprite))?;
        if debug && row > 0 {
            out.queue(style::SetForegroundColor(C_DEBUG))?;
            out.queue(cursor::MoveTo(col, row - 1))?;
            out.queue(Print(format!("{}", enemy.lives)))?;
        }
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    scale: &Scale,
) -> std::io::Result<()> {
    if let Some((col, row)) = scale.cell(projectile.rect.x, projectile.rect.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(Print("──"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   D : Debug   Q : Quit"))?;
    Ok(())
}

// ── End-of-session overlay ────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    session: &GameSession,
    scale: &Scale,
) -> std::io::Result<()> {
    // The win and loss states are the same terminal flag; only this
    // comparison picks the message.
    let (headline, sub, frame_color) = if session.won() {
        ("MOST  WONDROUS  VICTORY", "Well done, sailor!", Color::Green)
    } else {
        ("GAME  OVER", "Blazes! They got the best of us...", Color::Red)
    };
    let score_line = format!("Final Score: {}  (target {})", session.score, WINNING_SCORE);

    let lines: &[(&str, Color)] = &[
        (headline, frame_color),
        (sub, Color::White),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = scale.cols / 2;
    let start_row = (scale.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
