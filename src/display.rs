//! Terminal renderer.
//!
//! Reads `GameState` and queues crossterm commands. World pixels are scaled
//! into the bordered play area; sprites come from the `SpriteLoader` and
//! any missing one is simply not drawn.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use rand::Rng;

use portal_platformer::assets::{player_sprite_name, SpriteLoader};
use portal_platformer::entities::{GameState, GameStatus};
use portal_platformer::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_SHOOT: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_PLATFORM: Color = Color::Green;
const C_COIN: Color = Color::Yellow;
const C_POWER_COIN: Color = Color::DarkYellow;
const C_ENEMY: Color = Color::DarkGreen;
const C_ENEMY_HIT: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_BOSS_HIT: Color = Color::Red;
const C_FIREBALL: Color = Color::DarkRed;
const C_PROJECTILE: Color = Color::Cyan;
const C_PORTAL: Color = Color::Magenta;
const C_PORTAL_LOCKED: Color = Color::DarkGrey;
const C_SCENERY: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── Screen layout ─────────────────────────────────────────────────────────────

/// Maps the world viewport onto the terminal's play area.
///
/// Row 0 is the HUD, row 1 and row `height-2` are borders, the last row is
/// the controls hint. Everything in between is play area.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub width: u16,
    pub height: u16,
    /// World pixels per column.
    scale_x: f32,
    /// World pixels per row.
    scale_y: f32,
}

impl View {
    pub fn new(width: u16, height: u16, state: &GameState) -> Self {
        let cols = width.saturating_sub(2).max(1) as f32;
        let rows = height.saturating_sub(4).max(1) as f32;
        View {
            width,
            height,
            scale_x: state.camera.width / cols,
            scale_y: state.camera.height / rows,
        }
    }

    fn top(&self) -> i32 {
        2
    }

    fn bottom(&self) -> i32 {
        self.height as i32 - 2
    }

    fn left(&self) -> i32 {
        1
    }

    fn right(&self) -> i32 {
        self.width as i32 - 1
    }

    /// Terminal cell for a world point, honouring the camera offset.
    fn cell(&self, state: &GameState, world_x: f32, world_y: f32) -> (i32, i32) {
        let (sx, sy) = state.camera.world_to_screen(world_x, world_y);
        (
            self.left() + (sx / self.scale_x).floor() as i32,
            self.top() + (sy / self.scale_y).floor() as i32,
        )
    }
}

/// Background decoration, scattered once per session.
#[derive(Clone, Debug)]
pub struct Scenery {
    clouds: Vec<(f32, f32, &'static str)>,
}

const CLOUD_SHAPES: [&str; 3] = ["~~~", ".oOo.", "~~~~~"];
/// Clouds scroll at this fraction of the camera speed.
const PARALLAX: f32 = 0.5;

impl Scenery {
    pub fn generate(rng: &mut impl Rng, world_width: f32, viewport_height: f32) -> Self {
        let count = (world_width / 150.0) as usize;
        let clouds = (0..count)
            .map(|_| {
                let x = rng.gen_range(0.0..world_width);
                let y = rng.gen_range(0.0..viewport_height * 0.4);
                let shape = CLOUD_SHAPES[rng.gen_range(0..CLOUD_SHAPES.len())];
                (x, y, shape)
            })
            .collect();
        Scenery { clouds }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    scenery: &Scenery,
    view: &View,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_scenery(out, state, scenery, view)?;
    draw_platforms(out, state, view)?;
    draw_portal(out, state, sprites, view)?;
    draw_coins(out, state, sprites, view)?;
    draw_enemies(out, state, sprites, view)?;
    draw_boss(out, state, sprites, view)?;
    draw_projectiles(out, state, sprites, view)?;
    draw_player(out, state, sprites, view)?;
    draw_hud(out, state, view)?;
    draw_controls_hint(out, state, view)?;

    match state.status {
        GameStatus::GameOver => draw_end_screen(out, state, view, "GAME  OVER", Color::Red)?,
        GameStatus::Won => draw_end_screen(out, state, view, "LEVEL CLEAR", Color::Green)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Paused banner over the current frame.
pub fn draw_paused<W: Write>(out: &mut W, view: &View) -> std::io::Result<()> {
    let msg = "║  PAUSED   P to resume  ║";
    let col = (view.width / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.height / 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(msg))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Clipped drawing ───────────────────────────────────────────────────────────

/// Print `text` at a possibly off-screen cell, clipped to the play area.
fn put<W: Write>(
    out: &mut W,
    view: &View,
    col: i32,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if row < view.top() || row >= view.bottom() {
        return Ok(());
    }
    let skip = (view.left() - col).max(0) as usize;
    let start = col.max(view.left());
    let room = (view.right() - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

/// Draw a named sprite frame with its top-left corner at `rect`'s origin.
/// Missing sprites are skipped.
#[allow(clippy::too_many_arguments)]
fn draw_sprite<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
    name: &str,
    frame: usize,
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    let Some(sprite) = sprites.get_sprite(name) else {
        return Ok(());
    };
    if !state.camera.is_visible(rect) {
        return Ok(());
    }
    let (col, row) = view.cell(state, rect.x, rect.y);
    for (i, line) in sprite.frame(frame).iter().enumerate() {
        put(out, view, col, row + i as i32, line, color)?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &View) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_scenery<W: Write>(
    out: &mut W,
    state: &GameState,
    scenery: &Scenery,
    view: &View,
) -> std::io::Result<()> {
    let drift = state.camera.x * (1.0 - PARALLAX);
    for &(x, y, shape) in &scenery.clouds {
        let (col, row) = view.cell(state, x + drift, y);
        put(out, view, col, row, shape, C_SCENERY)?;
    }
    Ok(())
}

fn draw_platforms<W: Write>(out: &mut W, state: &GameState, view: &View) -> std::io::Result<()> {
    for platform in &state.platforms {
        if !state.camera.is_visible(platform) {
            continue;
        }
        let (c0, r0) = view.cell(state, platform.x, platform.y);
        let (c1, r1) = view.cell(state, platform.right(), platform.bottom());
        let width = (c1 - c0).max(1) as usize;
        for row in r0..r1.max(r0 + 1) {
            let glyph = if row == r0 { "▀" } else { "█" };
            put(out, view, c0, row, &glyph.repeat(width), C_PLATFORM)?;
        }
    }
    Ok(())
}

fn draw_portal<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
) -> std::io::Result<()> {
    let portal = &state.portal;
    let (name, color) = if portal.is_locked {
        ("portal_locked", C_PORTAL_LOCKED)
    } else {
        ("portal", C_PORTAL)
    };
    draw_sprite(out, state, sprites, view, name, 0, &portal.bounds(), color)
}

fn draw_coins<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
) -> std::io::Result<()> {
    for coin in state.coins.iter().filter(|c| !c.collected) {
        let (name, color) = if coin.is_power_up {
            ("power_coin", C_POWER_COIN)
        } else {
            ("coin", C_COIN)
        };
        draw_sprite(out, state, sprites, view, name, 0, &coin.bounds(), color)?;
    }
    Ok(())
}

fn draw_enemies<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
) -> std::io::Result<()> {
    use portal_platformer::entities::Combatant;

    for enemy in &state.enemies {
        if !enemy.is_visible(state.clock_ms) {
            continue;
        }
        let (name, color) = if enemy.is_hit {
            ("enemy_hit", C_ENEMY_HIT)
        } else {
            ("enemy_run", C_ENEMY)
        };
        let frame = enemy.frame_x;
        draw_sprite(out, state, sprites, view, name, frame, &enemy.bounds(), color)?;
    }
    Ok(())
}

fn draw_boss<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
) -> std::io::Result<()> {
    use portal_platformer::entities::Combatant;

    let boss = &state.boss;
    if boss.is_visible(state.clock_ms) {
        let color = if boss.is_hit { C_BOSS_HIT } else { C_BOSS };
        draw_sprite(out, state, sprites, view, "boss", boss.frame_x, &boss.bounds(), color)?;
    }
    for fireball in boss.projectiles.iter().filter(|f| f.active) {
        draw_sprite(
            out,
            state,
            sprites,
            view,
            "boss_projectile",
            fireball.current_frame,
            &fireball.bounds(),
            C_FIREBALL,
        )?;
    }
    Ok(())
}

fn draw_projectiles<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
) -> std::io::Result<()> {
    for shot in &state.projectiles {
        draw_sprite(out, state, sprites, view, "projectile", 0, &shot.bounds(), C_PROJECTILE)?;
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteLoader,
    view: &View,
) -> std::io::Result<()> {
    let p = &state.player;
    // Blink while invulnerable
    if p.is_invulnerable && (state.frame / 4) % 2 == 1 {
        return Ok(());
    }
    let color = if p.is_hit { C_PLAYER_HIT } else { C_PLAYER };
    let name = player_sprite_name(p.animation);
    draw_sprite(out, state, sprites, view, &name, p.animation_frame, &p.bounds(), color)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &View) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    // Boss health, centre
    let boss = &state.boss;
    let filled = (boss.health_percentage() * 10.0).round() as usize;
    let bar = format!("Boss [{}{}]", "█".repeat(filled), "·".repeat(10 - filled.min(10)));
    let bx = (view.width / 2).saturating_sub(bar.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(if boss.alive { C_BOSS } else { C_HINT }))?;
    out.queue(Print(&bar))?;

    // Shooting tag and lives, right
    let shoot_tag = if state.can_shoot { "[» SHOOT] " } else { "" };
    let lives_str = format!("Lives:{}", "♥".repeat(state.lives as usize));
    let right_len = shoot_tag.chars().count() + lives_str.chars().count();
    let rx = view.width.saturating_sub(right_len as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !shoot_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_HUD_SHOOT))?;
        out.queue(Print(shoot_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, view: &View) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    let hint = if state.can_shoot {
        "← → / A D : Move   ↑ / W : Jump   SPACE : Shoot   P : Pause   Q : Quit"
    } else {
        "← → / A D : Move   ↑ / W : Jump   P : Pause   Q : Quit"
    };
    out.queue(Print(hint))?;
    Ok(())
}

// ── End-of-game overlay ───────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &View,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let banner = format!("║    {:<16}║", title);
    let lines: [(String, Color); 5] = [
        ("╔════════════════════╗".to_string(), color),
        (banner, color),
        ("╚════════════════════╝".to_string(), color),
        (format!("Final Score: {:>6}", state.score), Color::Yellow),
        ("R - Play Again  Q - Quit".to_string(), Color::White),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
