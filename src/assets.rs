//! Glyph sprites and animation metadata for the renderer.
//!
//! The simulation never reads anything in here. A sprite is one or more
//! frames of equal-width text rows; lookups of unknown names return `None`
//! and the renderer simply skips that draw.

use std::collections::HashMap;

use crate::entities::{AnimState, PLAYER_ANIMATION_FPS};
use crate::error::AssetError;

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSource {
    pub name: String,
    pub frames: Vec<Vec<String>>,
}

impl SpriteSource {
    pub fn new(name: &str, frames: &[&[&str]]) -> Self {
        SpriteSource {
            name: name.to_string(),
            frames: frames
                .iter()
                .map(|rows| rows.iter().map(|r| r.to_string()).collect())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub frames: Vec<Vec<String>>,
    /// Columns per row.
    pub width: usize,
    /// Rows per frame.
    pub height: usize,
}

impl Sprite {
    /// Frame `index`, wrapping past the end.
    pub fn frame(&self, index: usize) -> &[String] {
        &self.frames[index % self.frames.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateMeta {
    pub frames: usize,
    pub fps: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationMeta {
    pub frame_width: u32,
    pub frame_height: u32,
    pub states: HashMap<AnimState, StateMeta>,
}

impl Default for AnimationMeta {
    fn default() -> Self {
        AnimationMeta {
            frame_width: 32,
            frame_height: 32,
            states: AnimState::ALL
                .iter()
                .map(|s| {
                    (
                        *s,
                        StateMeta {
                            frames: s.frame_count(),
                            fps: PLAYER_ANIMATION_FPS,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Sprite name used for a player animation state.
pub fn player_sprite_name(state: AnimState) -> String {
    format!("player_{}", state.name())
}

#[derive(Clone, Debug, Default)]
pub struct SpriteLoader {
    sprites: HashMap<String, Sprite>,
    meta: AnimationMeta,
}

impl SpriteLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register every source. Nothing is registered on error.
    pub fn load_all(&mut self, sources: &[SpriteSource]) -> Result<usize, AssetError> {
        let mut loaded = HashMap::new();

        for source in sources {
            if self.sprites.contains_key(&source.name) || loaded.contains_key(&source.name) {
                return Err(AssetError::Duplicate(source.name.clone()));
            }
            let sprite = build_sprite(source)?;
            loaded.insert(source.name.clone(), sprite);
        }

        for state in AnimState::ALL {
            let name = player_sprite_name(state);
            if !self.sprites.contains_key(&name) && !loaded.contains_key(&name) {
                return Err(AssetError::MissingState(state.name().to_string()));
            }
        }

        let count = loaded.len();
        self.sprites.extend(loaded);
        log::info!("loaded {count} sprites");
        Ok(count)
    }

    pub fn get_sprite(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn animation_meta(&self) -> &AnimationMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

fn build_sprite(source: &SpriteSource) -> Result<Sprite, AssetError> {
    let first = match source.frames.first() {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Err(AssetError::NoFrames(source.name.clone())),
    };
    let width = first[0].chars().count();
    let height = first.len();

    for (frame, rows) in source.frames.iter().enumerate() {
        let ragged = rows.len() != height || rows.iter().any(|r| r.chars().count() != width);
        if ragged || width == 0 {
            return Err(AssetError::RaggedFrame {
                name: source.name.clone(),
                frame,
            });
        }
    }

    Ok(Sprite {
        name: source.name.clone(),
        frames: source.frames.clone(),
        width,
        height,
    })
}

// ── Built-in art ──────────────────────────────────────────────────────────────

/// The glyph set shipped with the game.
pub fn default_sprites() -> Vec<SpriteSource> {
    let boss_mouths = [
        "  \\_____/  ",
        "  \\__v__/  ",
        "  \\__Y__/  ",
        "  \\_<Y>_/  ",
        "  \\<=Y=>/  ",
    ];
    let boss_frames: Vec<Vec<String>> = boss_mouths
        .iter()
        .map(|mouth| {
            [
                "   _____   ",
                "  / o o \\  ",
                *mouth,
                "    | |    ",
                "   _| |_   ",
                "  (_____)  ",
            ]
            .iter()
            .map(|r| r.to_string())
            .collect()
        })
        .collect();

    vec![
        SpriteSource::new("player_idle", &[&[" o ", "/|\\"], &[" o ", "<|>"]]),
        SpriteSource::new("player_run", &[&[" o ", "/|>"], &[" o ", "<|\\"]]),
        SpriteSource::new("player_jump", &[&["\\o/", " | "]]),
        SpriteSource::new("player_fall", &[&["_o_", "/ \\"]]),
        SpriteSource::new("player_hit", &[&[" x ", "/|\\"], &[" X ", "\\|/"]]),
        SpriteSource::new("enemy_run", &[&["/oo\\", "^^^^"], &["/oo\\", "vvvv"]]),
        SpriteSource::new("enemy_hit", &[&["\\xx/", "...."]]),
        SpriteSource {
            name: "boss".to_string(),
            frames: boss_frames,
        },
        SpriteSource::new("boss_projectile", &[&["()"], &["<>"], &["{}"], &["<>"]]),
        SpriteSource::new("projectile", &[&["-"]]),
        SpriteSource::new("coin", &[&["o"]]),
        SpriteSource::new("power_coin", &[&["$"]]),
        SpriteSource::new(
            "portal",
            &[&[
                "   .-~~~-.   ",
                "  /       \\  ",
                " |    O    | ",
                " |         | ",
                "  \\       /  ",
                "   '-___-'   ",
            ]],
        ),
        SpriteSource::new(
            "portal_locked",
            &[&[
                "   .-~~~-.   ",
                "  /       \\  ",
                " |    X    | ",
                " |         | ",
                "  \\       /  ",
                "   '-___-'   ",
            ]],
        ),
    ]
}
