//! Game entity types and their self-contained state transitions.
//!
//! Cross-entity rules live in `collision`; the tick order lives in `compute`.
//! Times are milliseconds on the simulation clock (`GameState::clock_ms`).

use crate::boss::Boss;
use crate::camera::Camera;
use crate::geometry::Rect;
use crate::input::InputFrame;
use crate::level::{
    CoinSpawn, EnemySpawn, GameConfig, PlayerConfig, COIN_SIZE, ENEMY_SIZE, PORTAL_SIZE,
};

/// Static, immutable level geometry.
pub type Platform = Rect;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Won,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Player animation, derived from motion and input every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Run,
    Jump,
    Fall,
    Hit,
}

/// Player animation rate, frames per second.
pub const PLAYER_ANIMATION_FPS: f64 = 15.0;

impl AnimState {
    pub const ALL: [AnimState; 5] = [
        AnimState::Idle,
        AnimState::Run,
        AnimState::Jump,
        AnimState::Fall,
        AnimState::Hit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Run => "run",
            AnimState::Jump => "jump",
            AnimState::Fall => "fall",
            AnimState::Hit => "hit",
        }
    }

    pub fn frame_count(self) -> usize {
        match self {
            AnimState::Idle => 11,
            AnimState::Run => 12,
            AnimState::Jump | AnimState::Fall => 1,
            AnimState::Hit => 7,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub velocity_y: f32,
    /// `1.0` facing right, `-1.0` facing left.
    pub direction: f32,
    /// Airborne.
    pub is_jumping: bool,
    pub is_invulnerable: bool,
    /// Visual hit flash; expires before invulnerability does.
    pub is_hit: bool,
    pub hit_until: f64,
    pub invulnerable_until: f64,
    pub hit_flash_ms: f64,
    pub invulnerability_ms: f64,
    pub animation: AnimState,
    pub animation_frame: usize,
    pub animation_timer: f64,
    pub spawn: (f32, f32),
}

impl Player {
    pub fn new(cfg: &PlayerConfig, game: &GameConfig) -> Self {
        Player {
            x: cfg.start_x,
            y: cfg.start_y,
            width: cfg.width,
            height: cfg.height,
            speed: cfg.speed,
            jump_force: cfg.jump_force,
            gravity: game.gravity,
            velocity_y: 0.0,
            direction: 1.0,
            is_jumping: false,
            is_invulnerable: false,
            is_hit: false,
            hit_until: 0.0,
            invulnerable_until: 0.0,
            hit_flash_ms: game.hit_flash_ms,
            invulnerability_ms: game.invulnerability_ms,
            animation: AnimState::Idle,
            animation_frame: 0,
            animation_timer: 0.0,
            spawn: (cfg.start_x, cfg.start_y),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move, jump, and fall for one tick.
    ///
    /// Horizontal speed is a per-tick displacement and is not scaled by `dt`.
    /// Gravity is applied every tick, grounded or not; landing cancels it.
    pub fn update(&mut self, input: &InputFrame, dt: f64, now: f64) {
        self.refresh_timers(now);

        if input.left {
            self.x -= self.speed;
            self.direction = -1.0;
        }
        if input.right {
            self.x += self.speed;
            self.direction = 1.0;
        }
        if input.jump {
            self.jump();
        }

        self.velocity_y += self.gravity;
        self.y += self.velocity_y;

        self.update_animation(input);
        self.update_animation_frame(dt);
    }

    /// Expire the hit flash and invulnerability windows.
    pub fn refresh_timers(&mut self, now: f64) {
        if self.is_hit && now >= self.hit_until {
            self.is_hit = false;
        }
        if self.is_invulnerable && now >= self.invulnerable_until {
            self.is_invulnerable = false;
        }
    }

    /// Start a jump unless already airborne.
    pub fn jump(&mut self) {
        if !self.is_jumping {
            self.velocity_y = -self.jump_force;
            self.is_jumping = true;
        }
    }

    fn update_animation(&mut self, input: &InputFrame) {
        let previous = self.animation;

        self.animation = if self.is_hit {
            AnimState::Hit
        } else if self.is_jumping {
            if self.velocity_y < 0.0 {
                AnimState::Jump
            } else {
                AnimState::Fall
            }
        } else if input.left || input.right {
            AnimState::Run
        } else {
            AnimState::Idle
        };

        if previous != self.animation {
            self.animation_frame = 0;
            self.animation_timer = 0.0;
        }
    }

    fn update_animation_frame(&mut self, dt: f64) {
        self.animation_timer += dt;

        let frame_count = self.animation.frame_count();
        if self.animation_timer >= 1000.0 / PLAYER_ANIMATION_FPS && frame_count > 1 {
            self.animation_frame = (self.animation_frame + 1) % frame_count;
            self.animation_timer = 0.0;
        }
    }

    /// Begin the immunity and hit-flash windows. A later hit restarts both.
    pub fn make_invulnerable(&mut self, now: f64, duration_ms: f64) {
        self.is_invulnerable = true;
        self.is_hit = true;
        self.invulnerable_until = now + duration_ms;
        self.hit_until = now + self.hit_flash_ms;
    }

    /// Lose a life and respawn, unless currently invulnerable.
    pub fn take_damage(&mut self, lives: u32, now: f64) -> u32 {
        if self.is_invulnerable {
            return lives;
        }

        self.x = self.spawn.0;
        self.y = self.spawn.1;
        self.velocity_y = 0.0;
        self.make_invulnerable(now, self.invulnerability_ms);

        lives.saturating_sub(1)
    }

    /// Rebound after a stomp; `force` scales the jump impulse.
    pub fn bounce(&mut self, force: f32) {
        self.velocity_y = -self.jump_force * force;
    }
}

// ── Collectibles & exit ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub collected: bool,
    /// Grants shooting for the rest of the session.
    pub is_power_up: bool,
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinPickup {
    pub collected: bool,
    pub points: u32,
    pub power_up: bool,
}

impl Coin {
    pub fn new(spawn: &CoinSpawn) -> Self {
        Coin {
            x: spawn.x,
            y: spawn.y,
            width: COIN_SIZE,
            height: COIN_SIZE,
            collected: false,
            is_power_up: spawn.power_up,
            value: 10,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// One-way; a second call reports nothing collected.
    pub fn collect(&mut self) -> CoinPickup {
        if self.collected {
            return CoinPickup { collected: false, points: 0, power_up: false };
        }
        self.collected = true;
        CoinPickup {
            collected: true,
            points: self.value,
            power_up: self.is_power_up,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_locked: bool,
}

impl Portal {
    pub fn new(x: f32, y: f32, locked: bool) -> Self {
        Portal {
            x,
            y,
            width: PORTAL_SIZE.0,
            height: PORTAL_SIZE.1,
            is_locked: locked,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    pub fn lock(&mut self) {
        self.is_locked = true;
    }

    pub fn unlock(&mut self) {
        self.is_locked = false;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Anything the player can stomp or shoot.
pub trait Combatant {
    fn bounds(&self) -> Rect;
    /// Takes part in collisions this tick.
    fn is_targetable(&self) -> bool;
}

/// Advance a patroller along its platform, bouncing off both edges.
pub fn patrol_step(x: &mut f32, width: f32, speed: f32, direction: &mut f32, platform: &Platform) {
    *x += speed * *direction;

    if *x <= platform.x {
        *x = platform.x;
        *direction = 1.0;
    } else if *x + width >= platform.right() {
        *x = platform.right() - width;
        *direction = -1.0;
    }
}

const ENEMY_HIT_DURATION_MS: f64 = 300.0;
const ENEMY_RUN_FRAMES: usize = 10;
const ENEMY_RUN_FPS: f64 = 15.0;
const ENEMY_HIT_FRAMES: usize = 5;
const ENEMY_HIT_FPS: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub direction: f32,
    pub platform_index: usize,
    pub alive: bool,
    /// Dying: still drawn and collidable until `alive` clears.
    pub is_hit: bool,
    pub hit_at: f64,
    pub hit_duration_ms: f64,
    pub frame_x: usize,
    pub frame_timer: f64,
}

impl Enemy {
    pub fn new(spawn: &EnemySpawn) -> Self {
        Enemy {
            x: spawn.x,
            y: spawn.y,
            width: ENEMY_SIZE.0,
            height: ENEMY_SIZE.1,
            speed: spawn.speed,
            direction: 1.0,
            platform_index: spawn.platform_index,
            alive: true,
            is_hit: false,
            hit_at: 0.0,
            hit_duration_ms: ENEMY_HIT_DURATION_MS,
            frame_x: 0,
            frame_timer: 0.0,
        }
    }

    pub fn update(&mut self, platforms: &[Platform], now: f64) {
        if !self.alive {
            return;
        }
        if self.is_hit && now - self.hit_at >= self.hit_duration_ms {
            self.alive = false;
            return;
        }

        if let Some(platform) = platforms.get(self.platform_index) {
            patrol_step(&mut self.x, self.width, self.speed, &mut self.direction, platform);
        }
        self.update_animation(now);
    }

    fn update_animation(&mut self, now: f64) {
        let (frames, fps) = if self.is_hit {
            (ENEMY_HIT_FRAMES, ENEMY_HIT_FPS)
        } else {
            (ENEMY_RUN_FRAMES, ENEMY_RUN_FPS)
        };
        if now - self.frame_timer > 1000.0 / fps {
            self.frame_timer = now;
            self.frame_x = (self.frame_x + 1) % frames;
        }
    }

    /// Start the dying animation. Idempotent while already dying.
    pub fn hit(&mut self, now: f64) {
        if self.is_hit {
            return;
        }
        self.is_hit = true;
        self.hit_at = now;
        self.frame_x = 0;
    }

    pub fn is_in_hit_animation(&self, now: f64) -> bool {
        self.is_hit && now - self.hit_at < self.hit_duration_ms
    }

    /// Alive or still playing the death animation.
    pub fn is_visible(&self, now: f64) -> bool {
        self.alive || self.is_in_hit_animation(now)
    }

    pub fn animation_state(&self) -> &'static str {
        if self.is_hit {
            "hit"
        } else {
            "run"
        }
    }
}

impl Combatant for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn is_targetable(&self) -> bool {
        self.alive
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Margin beyond the viewport after which player shots are discarded.
const PROJECTILE_OFFSCREEN_MARGIN: f32 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub direction: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32, direction: f32) -> Self {
        Projectile {
            x,
            y,
            width: 10.0,
            height: 5.0,
            speed: 10.0,
            direction,
            active: true,
        }
    }

    /// Fired from the player's leading edge at mid-height.
    pub fn from_player(player: &Player) -> Self {
        let x = if player.direction > 0.0 {
            player.x + player.width
        } else {
            player.x
        };
        Projectile::new(x, player.y + player.height / 2.0, player.direction)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn update(&mut self) {
        self.x += self.speed * self.direction;
    }

    pub fn is_out_of_bounds(&self, camera_x: f32, screen_width: f32) -> bool {
        self.x < camera_x - PROJECTILE_OFFSCREEN_MARGIN
            || self.x > camera_x + screen_width + PROJECTILE_OFFSCREEN_MARGIN
    }
}

const BOSS_PROJECTILE_SIZE: f32 = 16.0;
const BOSS_PROJECTILE_FRAMES: usize = 4;
const BOSS_PROJECTILE_ANIMATION_STEP: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct BossProjectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub active: bool,
    pub current_frame: usize,
    pub animation_timer: f32,
}

impl BossProjectile {
    pub fn new(x: f32, y: f32, direction: f32, speed: f32) -> Self {
        BossProjectile {
            x,
            y,
            width: BOSS_PROJECTILE_SIZE,
            height: BOSS_PROJECTILE_SIZE,
            velocity_x: direction * speed,
            velocity_y: 0.0,
            active: true,
            current_frame: 0,
            animation_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move, animate, and deactivate once well outside the world.
    pub fn update(&mut self, world_width: f32) {
        if !self.active {
            return;
        }

        self.x += self.velocity_x;
        self.y += self.velocity_y;

        self.animation_timer += BOSS_PROJECTILE_ANIMATION_STEP;
        if self.animation_timer >= 1.0 {
            self.animation_timer = 0.0;
            self.current_frame = (self.current_frame + 1) % BOSS_PROJECTILE_FRAMES;
        }

        if self.x < -200.0 || self.x > world_width + 200.0 || self.y < -100.0 || self.y > 800.0 {
            self.active = false;
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation owns. Built by `compute::init_state`,
/// advanced by `compute::tick`, read by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub portal: Portal,
    pub projectiles: Vec<Projectile>,
    pub camera: Camera,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Shooting unlocked by a power-up coin. Never revoked.
    pub can_shoot: bool,
    pub last_shot_at: Option<f64>,
    /// Simulation clock: sum of every `dt` passed to `tick` (ms).
    pub clock_ms: f64,
    pub frame: u64,
    pub world_width: f32,
    pub config: GameConfig,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }
}
