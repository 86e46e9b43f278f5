//! Game-logic orchestration.
//!
//! Public functions take the current `GameState` by reference and return a
//! new one. All mutation happens on that private copy, in a fixed order:
//! input → player → platforms → camera → enemies/boss → projectiles →
//! cross-entity collisions → win/loss.

use crate::boss::Boss;
use crate::camera::{Camera, CameraBounds};
use crate::collision::{
    check_enemy_collision, check_platform_collisions, check_portal_entry,
    check_projectile_collisions, keep_in_bounds, Contact, HitTarget, PORTAL_CENTER_THRESHOLD,
};
use crate::entities::{Coin, Enemy, GameState, GameStatus, Player, Portal, Projectile};
use crate::error::LevelError;
use crate::geometry::{overlaps, Bounds};
use crate::input::InputFrame;
use crate::level::{GameConfig, LevelData, PlayerConfig};

/// Score for killing a plain enemy, by stomp or by shot.
pub const ENEMY_POINTS: u32 = 50;
/// Bounce strength after a stomp, as a fraction of the jump impulse.
pub const STOMP_BOUNCE: f32 = 0.7;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the starting state from validated level data.
pub fn init_state(
    config: GameConfig,
    player: &PlayerConfig,
    level: &LevelData,
) -> Result<GameState, LevelError> {
    level.validate()?;

    let world_width = level.world_width();
    let mut camera = Camera::new(config.viewport_width, config.viewport_height);
    camera.set_bounds(CameraBounds {
        min_x: 0.0,
        max_x: world_width,
        min_y: 0.0,
        max_y: config.viewport_height,
    });

    let state = GameState {
        player: Player::new(player, &config),
        platforms: level.platforms.clone(),
        coins: level.coins.iter().map(Coin::new).collect(),
        enemies: level.enemies.iter().map(Enemy::new).collect(),
        boss: Boss::new(&level.boss, config.boss_ranged_attack),
        portal: Portal::new(level.portal.0, level.portal.1, config.portal_locked),
        projectiles: Vec::new(),
        camera,
        score: 0,
        lives: config.initial_lives,
        status: GameStatus::Playing,
        can_shoot: false,
        last_shot_at: None,
        clock_ms: 0.0,
        frame: 0,
        world_width,
        config,
    };

    log::info!(
        "level loaded: {} platforms, {} coins, {} enemies, world width {}",
        state.platforms.len(),
        state.coins.len(),
        state.enemies.len(),
        world_width
    );
    Ok(state)
}

/// The built-in level with default tunables.
pub fn default_state() -> Result<GameState, LevelError> {
    init_state(GameConfig::default(), &PlayerConfig::default(), &LevelData::default())
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Fire a shot if shooting is unlocked and the cooldown has elapsed.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut next = state.clone();
    shoot(&mut next);
    next
}

fn shoot(state: &mut GameState) -> bool {
    if !state.can_shoot || state.is_over() {
        return false;
    }
    let now = state.clock_ms;
    if let Some(last) = state.last_shot_at {
        if now - last < state.config.shot_cooldown_ms {
            return false;
        }
    }

    state.projectiles.push(Projectile::from_player(&state.player));
    state.last_shot_at = Some(now);
    true
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by `dt` milliseconds.
///
/// Once the game is lost or won the state is returned untouched.
pub fn tick(state: &GameState, input: &InputFrame, dt: f64) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let mut next = state.clone();
    step(&mut next, input, dt);
    next
}

fn step(state: &mut GameState, input: &InputFrame, dt: f64) {
    state.clock_ms += dt;
    state.frame += 1;
    let now = state.clock_ms;
    log::trace!("tick: dt={dt:.2}ms frame={} clock={now:.0}", state.frame);

    // ── 1. Input ─────────────────────────────────────────────────────────────
    if input.shoot {
        shoot(state);
    }

    // ── 2. Player ────────────────────────────────────────────────────────────
    state.player.update(input, dt, now);

    let bounds = Bounds {
        min_x: 0.0,
        max_x: state.world_width,
        max_y: state.config.viewport_height,
    };
    let clamped = keep_in_bounds(&state.player.bounds(), &bounds);
    state.player.x = clamped.x;
    state.player.y = clamped.y;

    // ── 3. Platforms ─────────────────────────────────────────────────────────
    check_platform_collisions(&mut state.player, &state.platforms);

    // ── 4. Camera ────────────────────────────────────────────────────────────
    state.camera.follow(&state.player.bounds());

    // ── 5. Enemies & boss ────────────────────────────────────────────────────
    for enemy in &mut state.enemies {
        enemy.update(&state.platforms, now);
    }
    state
        .boss
        .update(&state.platforms, now, &state.player, state.world_width);

    // ── 6. Projectiles ───────────────────────────────────────────────────────
    update_projectiles(state, now);

    // ── 7. Collisions & end conditions ───────────────────────────────────────
    check_collisions(state, now);
}

fn update_projectiles(state: &mut GameState, now: f64) {
    let mut kept = Vec::with_capacity(state.projectiles.len());

    for mut shot in std::mem::take(&mut state.projectiles) {
        shot.update();
        if shot.is_out_of_bounds(state.camera.x, state.camera.width) {
            continue;
        }

        match check_projectile_collisions(&shot.bounds(), &state.enemies, Some(&state.boss)) {
            Some(HitTarget::Enemy(index)) => {
                state.enemies[index].hit(now);
                state.score += ENEMY_POINTS;
                log::debug!("shot killed enemy #{index}");
            }
            Some(HitTarget::Boss) => {
                state.score += state.boss.take_damage(now);
                log::debug!("shot hit boss, health {}", state.boss.health);
                if !state.boss.alive {
                    log::info!("boss defeated by a shot");
                }
            }
            None => kept.push(shot),
        }
    }

    state.projectiles = kept;
}

fn damage_player(state: &mut GameState, now: f64) {
    let before = state.lives;
    state.lives = state.player.take_damage(state.lives, now);
    if state.lives < before {
        log::debug!("player hit, {} lives left", state.lives);
    }
}

fn check_collisions(state: &mut GameState, now: f64) {
    // Coins
    let body = state.player.bounds();
    for coin in &mut state.coins {
        if !overlaps(&body, &coin.bounds()) {
            continue;
        }
        let pickup = coin.collect();
        if pickup.collected {
            state.score += pickup.points;
            if pickup.power_up && !state.can_shoot {
                state.can_shoot = true;
                log::debug!("power-up collected, shooting unlocked");
            }
        }
    }

    // Enemies
    for index in 0..state.enemies.len() {
        match check_enemy_collision(&state.player, &state.enemies[index]) {
            Some(Contact::Stomp) => {
                state.enemies[index].hit(now);
                state.player.bounce(STOMP_BOUNCE);
                state.score += ENEMY_POINTS;
                log::debug!("stomped enemy #{index}");
            }
            Some(Contact::Damage) => damage_player(state, now),
            None => {}
        }
    }

    // Boss
    match check_enemy_collision(&state.player, &state.boss) {
        Some(Contact::Stomp) => {
            state.score += state.boss.take_damage(now);
            state.player.bounce(STOMP_BOUNCE);
            log::debug!("stomped boss, health {}", state.boss.health);
            if !state.boss.alive {
                log::info!("boss defeated by a stomp");
            }
        }
        Some(Contact::Damage) => damage_player(state, now),
        None => {}
    }

    // Boss fireballs behave like enemy contact without the stomp option.
    for index in 0..state.boss.projectiles.len() {
        let fireball = &state.boss.projectiles[index];
        if !fireball.active
            || state.player.is_invulnerable
            || !overlaps(&state.player.bounds(), &fireball.bounds())
        {
            continue;
        }
        state.boss.projectiles[index].active = false;
        damage_player(state, now);
    }
    state.boss.projectiles.retain(|f| f.active);

    if !state.boss.alive && state.portal.is_locked {
        state.portal.unlock();
        log::info!("portal unlocked");
    }

    // End conditions
    if state.lives == 0 {
        state.status = GameStatus::GameOver;
        log::info!("game over, final score {}", state.score);
    } else if check_portal_entry(&state.player, &state.portal, PORTAL_CENTER_THRESHOLD) {
        state.status = GameStatus::Won;
        log::info!("level complete, final score {}", state.score);
    }
}
