//! Static configuration: world tunables and the level layout.
//!
//! Loaded once at startup and never mutated afterwards.

use crate::error::LevelError;
use crate::geometry::Rect;

// ── Tunables ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub gravity: f32,
    pub initial_lives: u32,
    /// Damage immunity after a hit (ms).
    pub invulnerability_ms: f64,
    /// Red hit-flash after a hit (ms). Shorter than the immunity window.
    pub hit_flash_ms: f64,
    pub shot_cooldown_ms: f64,
    /// Portal rejects entry until the boss is defeated.
    pub portal_locked: bool,
    pub boss_ranged_attack: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            viewport_width: 800.0,
            viewport_height: 400.0,
            gravity: 0.5,
            initial_lives: 3,
            invulnerability_ms: 2000.0,
            hit_flash_ms: 500.0,
            shot_cooldown_ms: 500.0,
            portal_locked: false,
            boss_ranged_attack: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub jump_force: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            start_x: 50.0,
            start_y: 200.0,
            width: 30.0,
            height: 30.0,
            speed: 5.0,
            jump_force: 12.0,
        }
    }
}

// ── Level layout ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinSpawn {
    pub x: f32,
    pub y: f32,
    pub power_up: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub platform_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelData {
    /// Index 0 is the ground; its right edge is the world's right boundary.
    pub platforms: Vec<Rect>,
    pub coins: Vec<CoinSpawn>,
    pub enemies: Vec<EnemySpawn>,
    pub boss: EnemySpawn,
    pub portal: (f32, f32),
}

pub const COIN_SIZE: f32 = 20.0;
pub const ENEMY_SIZE: (f32, f32) = (44.0, 30.0);
pub const BOSS_SIZE: (f32, f32) = (128.0, 128.0);
pub const PORTAL_SIZE: (f32, f32) = (128.0, 128.0);

fn coin(x: f32, y: f32) -> CoinSpawn {
    CoinSpawn { x, y, power_up: false }
}

fn enemy(x: f32, y: f32, speed: f32, platform_index: usize) -> EnemySpawn {
    EnemySpawn { x, y, speed, platform_index }
}

impl Default for LevelData {
    fn default() -> Self {
        LevelData {
            platforms: vec![
                Rect::new(0.0, 350.0, 3000.0, 50.0), // ground
                Rect::new(300.0, 250.0, 200.0, 20.0),
                Rect::new(100.0, 150.0, 200.0, 20.0),
                Rect::new(500.0, 200.0, 200.0, 20.0),
                Rect::new(800.0, 150.0, 200.0, 20.0),
                Rect::new(1100.0, 250.0, 200.0, 20.0),
                Rect::new(1400.0, 150.0, 200.0, 20.0),
                Rect::new(1700.0, 200.0, 200.0, 20.0),
                Rect::new(2000.0, 250.0, 200.0, 20.0),
                Rect::new(2300.0, 150.0, 200.0, 20.0),
                Rect::new(2600.0, 200.0, 200.0, 20.0),
            ],
            coins: vec![
                CoinSpawn { x: 350.0, y: 200.0, power_up: true },
                coin(150.0, 100.0),
                coin(550.0, 150.0),
                coin(850.0, 100.0),
                coin(1150.0, 200.0),
                coin(1450.0, 100.0),
                coin(1750.0, 150.0),
                coin(2050.0, 200.0),
                coin(2350.0, 100.0),
                CoinSpawn { x: 2650.0, y: 150.0, power_up: true },
            ],
            enemies: vec![
                enemy(320.0, 220.0, 2.0, 1),
                enemy(120.0, 120.0, 3.0, 2),
                enemy(820.0, 170.0, 2.0, 3),
                enemy(1120.0, 220.0, 3.0, 5),
                enemy(1420.0, 120.0, 2.0, 6),
                enemy(1720.0, 170.0, 3.0, 7),
                enemy(2020.0, 220.0, 2.0, 8),
            ],
            boss: enemy(2600.0, 150.0, 2.0, 10),
            portal: (2700.0, 222.0),
        }
    }
}

impl LevelData {
    /// Reject layouts the simulation cannot run.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        for (index, p) in self.platforms.iter().enumerate() {
            if p.width <= 0.0 || p.height <= 0.0 {
                return Err(LevelError::EmptyRect {
                    entity: "platform",
                    index,
                    width: p.width,
                    height: p.height,
                });
            }
        }

        let count = self.platforms.len();
        let patrollers = self
            .enemies
            .iter()
            .map(|e| ("enemy", e))
            .chain(std::iter::once(("boss", &self.boss)));
        for (index, (entity, spawn)) in patrollers.enumerate() {
            if spawn.platform_index >= count {
                return Err(LevelError::UnknownPlatform {
                    entity,
                    index,
                    platform: spawn.platform_index,
                    count,
                });
            }
        }
        Ok(())
    }

    /// Right edge of the ground platform.
    pub fn world_width(&self) -> f32 {
        self.platforms.first().map(|g| g.right()).unwrap_or(0.0)
    }
}
