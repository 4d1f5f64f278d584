/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game. No game logic is performed; this module only translates state
/// into terminal commands, one full frame per call.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::assets::Sprite;
use space_invaders::game::{Game, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_MUSIC: Color = Color::DarkGreen;
const C_CUE: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_MISSILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_ERROR: Color = Color::Red;

/// How many banner characters the music marquee shows at once.
const MARQUEE_WINDOW: usize = 24;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: clear, border, then whatever the current
/// phase shows. Paused and the menu phases draw their overlay only; the
/// playfield is hidden until play resumes.
pub fn render<W: Write>(out: &mut W, game: &Game, cue_flash: Option<&str>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let width = game.config().width as u16;
    let height = game.config().height as u16;

    draw_border(out, width, height)?;

    match game.phase {
        Phase::Loading => draw_loading(out, game, width, height)?,
        Phase::Welcome => draw_menu(
            out,
            width,
            height,
            "SPACE INVADERS",
            &["Welcome on this game!", "Do you want to start ?"],
            "[ Enter ] Start",
        )?,
        Phase::Playing => {
            draw_hud(out, game, width, cue_flash)?;
            draw_world(out, game, width, height)?;
        }
        Phase::Paused => draw_menu(
            out,
            width,
            height,
            "PAUSED",
            &["The invaders are waiting."],
            "[ Enter / Esc ] Resume",
        )?,
        Phase::Lost => draw_menu(
            out,
            width,
            height,
            "YOU LOST",
            &["The invaders reached your ship."],
            "[ Enter ] Try again",
        )?,
        Phase::Won => draw_menu(
            out,
            width,
            height,
            "YOU WON",
            &["Wave cleared — the next one is bigger."],
            "[ Enter ] Next wave",
        )?,
    }

    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    game: &Game,
    width: u16,
    cue_flash: Option<&str>,
) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", game.score)))?;

    // Music marquee — centre, only while the music "plays"
    if game.music_playing {
        if let Some(assets) = &game.assets {
            let marquee = marquee_slice(&assets.music.banner, game.music_pos);
            let mx = (width / 2).saturating_sub(marquee.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(mx, 0))?;
            out.queue(style::SetForegroundColor(C_MUSIC))?;
            out.queue(Print(marquee))?;
        }
    }

    // Cue flash — just left of the level readout
    let level_str = format!("Level: {}", game.level);
    let lx = width.saturating_sub(level_str.chars().count() as u16 + 1);
    if let Some(label) = cue_flash {
        let fx = lx.saturating_sub(label.chars().count() as u16 + 2);
        out.queue(cursor::MoveTo(fx, 0))?;
        out.queue(style::SetForegroundColor(C_CUE))?;
        out.queue(Print(label))?;
    }

    // Level — right
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    Ok(())
}

/// A sliding window over the banner, advancing one character every few ticks.
fn marquee_slice(banner: &str, pos: u64) -> String {
    let chars: Vec<char> = banner.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let start = (pos / 4) as usize % chars.len();
    (0..MARQUEE_WINDOW.min(chars.len()))
        .map(|i| chars[(start + i) % chars.len()])
        .collect()
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, game: &Game, width: u16, height: u16) -> std::io::Result<()> {
    let assets = match &game.assets {
        Some(assets) => assets,
        None => return Ok(()), // nothing to draw before loading finished
    };

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in &game.formation.enemies {
        draw_sprite(out, &assets.enemy, enemy.body.x, enemy.body.y, width, height)?;
    }

    out.queue(style::SetForegroundColor(C_MISSILE))?;
    for missile in &game.player.missiles {
        draw_sprite(out, &assets.missile, missile.body.x, missile.body.y, width, height)?;
    }

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    draw_sprite(
        out,
        &assets.player,
        game.player.body.x,
        game.player.body.y,
        width,
        height,
    )?;

    Ok(())
}

/// Draw a sprite with its top-left corner at the (rounded) cell position,
/// clipping to the area inside the border and below the HUD.
fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    x: f32,
    y: f32,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let left = x.round() as i32;
    let top = y.round() as i32;
    for (dy, row) in sprite.rows.iter().enumerate() {
        let line = top + dy as i32;
        if line < 2 || line >= height as i32 - 2 {
            continue;
        }
        for (dx, ch) in row.chars().enumerate() {
            let col = left + dx as i32;
            if col < 1 || col >= width as i32 - 1 || ch == ' ' {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, line as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_loading<W: Write>(out: &mut W, game: &Game, width: u16, height: u16) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    let title = "Loading...";
    out.queue(cursor::MoveTo(centered(cx, title), cy.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if let Some(err) = &game.load_error {
        let line = format!("asset load failed: {}", err);
        out.queue(cursor::MoveTo(centered(cx, &line), cy + 1))?;
        out.queue(style::SetForegroundColor(C_ERROR))?;
        out.queue(Print(&line))?;
    }

    Ok(())
}

fn draw_menu<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    title: &str,
    lines: &[&str],
    prompt: &str,
) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;
    let start = cy.saturating_sub(lines.len() as u16 / 2 + 2);

    out.queue(cursor::MoveTo(centered(cx, title), start))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    out.queue(style::SetForegroundColor(C_TEXT))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(centered(cx, line), start + 2 + i as u16))?;
        out.queue(Print(*line))?;
    }

    out.queue(cursor::MoveTo(
        centered(cx, prompt),
        start + 3 + lines.len() as u16,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(prompt))?;

    Ok(())
}

fn centered(cx: u16, text: &str) -> u16 {
    cx.saturating_sub(text.chars().count() as u16 / 2)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   SPACE : Fire   ESC : Pause   ENTER : Start   Q : Quit"))?;
    Ok(())
}
