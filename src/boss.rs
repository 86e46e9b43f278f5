//! The level boss: zoned chase AI, ping-pong animation, and fireballs.
//!
//! The boss shares the plain enemy's patrol rule (`entities::patrol_step`)
//! but owns its own AI, animation cadence, and projectile pool.

use crate::entities::{patrol_step, BossProjectile, Combatant, Platform, Player};
use crate::geometry::Rect;
use crate::level::{EnemySpawn, BOSS_SIZE};

// ── AI tuning ─────────────────────────────────────────────────────────────────

/// Player must be at least this far above the boss to trigger a dodge.
pub const DODGE_VERTICAL_GAP: f32 = 50.0;
pub const DODGE_HORIZONTAL_RANGE: f32 = 100.0;
pub const DODGE_SPEED_FACTOR: f32 = 3.0;

pub const FAR_ZONE: f32 = 600.0;
pub const CLOSE_ZONE: f32 = 300.0;
pub const MEDIUM_SPEED_FACTOR: f32 = 0.5;
pub const CLOSE_SPEED_FACTOR: f32 = 1.5;
pub const MEDIUM_DEAD_ZONE: f32 = 50.0;
pub const CLOSE_DEAD_ZONE: f32 = 30.0;

pub const MAX_HEALTH: u32 = 10;
pub const HIT_POINTS: u32 = 20;
pub const KILL_POINTS: u32 = 200;
const HIT_FLASH_MS: f64 = 400.0;

pub const ANIMATION_SEQUENCE: [usize; 8] = [0, 1, 2, 3, 4, 3, 2, 1];
const FRAME_INTERVAL_MS: f64 = 200.0;

pub const SHOOT_RANGE: f32 = 600.0;
pub const SHOOT_COOLDOWN_MS: f64 = 1500.0;
const FIREBALL_SPEED: f32 = 5.0;

/// Which distance band the player is in this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Dodge,
    Far,
    Medium,
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub base_speed: f32,
    pub speed: f32,
    pub direction: f32,
    pub platform_index: usize,
    pub alive: bool,
    pub health: u32,
    pub max_health: u32,
    pub is_hit: bool,
    pub hit_until: f64,
    pub sequence_index: usize,
    pub frame_x: usize,
    pub frame_timer: f64,
    pub ranged_attack: bool,
    pub last_shot_at: Option<f64>,
    pub projectiles: Vec<BossProjectile>,
}

impl Boss {
    pub fn new(spawn: &EnemySpawn, ranged_attack: bool) -> Self {
        Boss {
            x: spawn.x,
            y: spawn.y,
            width: BOSS_SIZE.0,
            height: BOSS_SIZE.1,
            base_speed: spawn.speed,
            speed: spawn.speed,
            direction: 1.0,
            platform_index: spawn.platform_index,
            alive: true,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            is_hit: false,
            hit_until: 0.0,
            sequence_index: 0,
            frame_x: ANIMATION_SEQUENCE[0],
            frame_timer: 0.0,
            ranged_attack,
            last_shot_at: None,
            projectiles: Vec::new(),
        }
    }

    /// One AI + movement + animation step, chasing or fleeing `player`.
    pub fn update(&mut self, platforms: &[Platform], now: f64, player: &Player, world_width: f32) {
        if !self.alive {
            return;
        }
        if self.is_hit && now >= self.hit_until {
            self.is_hit = false;
        }

        self.think(player);

        if let Some(platform) = platforms.get(self.platform_index) {
            patrol_step(&mut self.x, self.width, self.speed, &mut self.direction, platform);
        }

        self.update_animation(now);

        if self.ranged_attack {
            self.try_shoot(player, now);
        }
        for fireball in &mut self.projectiles {
            fireball.update(world_width);
        }
        self.projectiles.retain(|f| f.active);
    }

    /// Pick speed and facing from where the player is. Returns the zone used.
    pub fn think(&mut self, player: &Player) -> Zone {
        let dx = player.x - self.x;
        let distance = dx.abs();
        let toward = if dx < 0.0 { -1.0 } else { 1.0 };

        let above = self.y - player.y > DODGE_VERTICAL_GAP;
        if above && player.velocity_y > 0.0 && distance < DODGE_HORIZONTAL_RANGE {
            self.speed = self.base_speed * DODGE_SPEED_FACTOR;
            self.direction = -toward;
            return Zone::Dodge;
        }

        if distance > FAR_ZONE {
            self.speed = self.base_speed;
            Zone::Far
        } else if distance > CLOSE_ZONE {
            self.speed = self.base_speed * MEDIUM_SPEED_FACTOR;
            if distance > MEDIUM_DEAD_ZONE {
                self.direction = toward;
            }
            Zone::Medium
        } else {
            self.speed = self.base_speed * CLOSE_SPEED_FACTOR;
            if distance > CLOSE_DEAD_ZONE {
                self.direction = toward;
            }
            Zone::Close
        }
    }

    /// Advance the ping-pong sequence on a fixed wall-clock interval,
    /// independent of locomotion and of hits.
    pub fn update_animation(&mut self, now: f64) {
        if now - self.frame_timer > FRAME_INTERVAL_MS {
            self.frame_timer = now;
            self.sequence_index = (self.sequence_index + 1) % ANIMATION_SEQUENCE.len();
            self.frame_x = ANIMATION_SEQUENCE[self.sequence_index];
        }
    }

    fn try_shoot(&mut self, player: &Player, now: f64) {
        let bounds = self.bounds();
        let (boss_cx, _) = bounds.center();
        let (player_cx, player_cy) = player.bounds().center();
        if (player_cx - boss_cx).abs() > SHOOT_RANGE {
            return;
        }
        if let Some(last) = self.last_shot_at {
            if now - last < SHOOT_COOLDOWN_MS {
                return;
            }
        }

        let direction = if player_cx < boss_cx { -1.0 } else { 1.0 };
        let size = 16.0;
        let x = if direction > 0.0 {
            bounds.right()
        } else {
            bounds.x - size
        };
        let y = (player_cy - size / 2.0).clamp(bounds.y, bounds.bottom() - size);

        self.projectiles
            .push(BossProjectile::new(x, y, direction, FIREBALL_SPEED));
        self.last_shot_at = Some(now);
        log::debug!("boss fired at x={x:.0} y={y:.0} dir={direction}");
    }

    /// Apply one hit and return the points it is worth.
    pub fn take_damage(&mut self, now: f64) -> u32 {
        if !self.alive {
            return 0;
        }

        self.is_hit = true;
        self.hit_until = now + HIT_FLASH_MS;
        self.health = self.health.saturating_sub(1);

        if self.health == 0 {
            self.alive = false;
            self.projectiles.clear();
            return KILL_POINTS;
        }
        HIT_POINTS
    }

    pub fn health_percentage(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    /// Still drawn: alive, or flashing from the killing blow.
    pub fn is_visible(&self, now: f64) -> bool {
        self.alive || (self.is_hit && now < self.hit_until)
    }
}

impl Combatant for Boss {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn is_targetable(&self) -> bool {
        self.alive
    }
}
