mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use portal_platformer::assets::{default_sprites, SpriteLoader};
use portal_platformer::compute::{init_state, tick};
use portal_platformer::entities::GameState;
use portal_platformer::error::GameError;
use portal_platformer::input::{InputManager, Key};
use portal_platformer::level::{GameConfig, LevelData, PlayerConfig};

use display::{Scenery, View};

/// Side-scrolling platformer in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Lives at the start of a run.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=9))]
    lives: u32,
    /// Keep the exit portal locked until the boss is defeated.
    #[arg(long)]
    locked_portal: bool,
    /// Disable the boss's fireballs.
    #[arg(long)]
    no_boss_fire: bool,
    /// Simulation ticks per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(10..=240))]
    fps: u64,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            initial_lives: self.lives,
            portal_locked: self.locked_portal,
            boss_ranged_attack: !self.no_boss_fire,
            ..GameConfig::default()
        }
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a key stays down without a fresh press or repeat event. Terminals
/// without release reporting rely on OS key-repeat to keep keys alive.
const HOLD_WINDOW: u64 = 8;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◆  PORTAL  RUNNER  ◆";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let lines: &[(&str, Color)] = &[
        ("Reach the portal at the far end of the level.", Color::White),
        ("Stomp enemies from above, avoid touching them.", Color::White),
        ("Collect a $ coin to unlock shooting.", Color::Yellow),
        ("The boss takes 10 hits.", Color::Magenta),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(23), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }

    let options = format!(
        "Lives: {}   Portal: {}   Boss fire: {}",
        args.lives,
        if args.locked_portal { "locked" } else { "open" },
        if args.no_boss_fire { "off" } else { "on" },
    );
    out.queue(cursor::MoveTo(cx.saturating_sub(23), cy + 1))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(options))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(23), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("ENTER : Start   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Wait for start or quit
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → back to menu.
///
/// Raw key events feed an `InputManager`; each frame the loop takes one
/// `InputFrame` from it and advances the simulation by a fixed step.
/// Keys are released either by a real release event (keyboard-enhancement
/// terminals) or by going quiet for `HOLD_WINDOW` frames (classic terminals).
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    sprites: &SpriteLoader,
    rx: &mpsc::Receiver<Event>,
    frame_period: Duration,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let scenery = Scenery::generate(&mut rng, state.world_width, state.camera.height);

    let mut input = InputManager::new();
    // Frame on which each held key was last refreshed.
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut paused = false;
    let dt = frame_period.as_secs_f64() * 1000.0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Release {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true);
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if state.is_over() => {
                        return Ok(false);
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc
                        if kind == KeyEventKind::Press =>
                    {
                        paused = !paused;
                        log::info!("paused: {paused}");
                    }
                    _ => {}
                }
            }

            let Some(key) = map_key(code) else { continue };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    input.key_down(key);
                    key_frame.insert(key, frame);
                }
                KeyEventKind::Release => {
                    input.key_up(key);
                    key_frame.remove(&key);
                }
            }
        }

        // Release keys that went quiet
        key_frame.retain(|key, last| {
            let fresh = frame.saturating_sub(*last) <= HOLD_WINDOW;
            if !fresh {
                input.key_up(*key);
            }
            fresh
        });

        let (width, height) = terminal::size()?;
        let view = View::new(width, height, state);

        let frame_input = input.frame();
        if paused {
            display::render(out, state, sprites, &scenery, &view)?;
            display::draw_paused(out, &view)?;
        } else {
            *state = tick(state, &frame_input, dt);
            display::render(out, state, sprites, &scenery, &view)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            std::thread::sleep(frame_period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::init();
    let args = Args::parse();

    // Fail before touching the terminal if assets or level data are broken.
    let mut sprites = SpriteLoader::new();
    sprites.load_all(&default_sprites())?;
    init_state(args.game_config(), &PlayerConfig::default(), &LevelData::default())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events where the terminal supports them; HOLD_WINDOW otherwise.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loop only polls `rx`.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &sprites, &args);

    // Restore the terminal whatever `run` returned
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    sprites: &SpriteLoader,
    args: &Args,
) -> Result<(), GameError> {
    let frame_period = Duration::from_micros(1_000_000 / args.fps);

    loop {
        match show_menu(out, rx, args)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state =
                    init_state(args.game_config(), &PlayerConfig::default(), &LevelData::default())?;
                log::info!("run started with {} lives", state.lives);
                let quit = game_loop(out, &mut state, sprites, rx, frame_period)?;
                log::info!("run ended: {:?}, score {}", state.status, state.score);
                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
