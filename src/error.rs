//! Startup errors. The per-tick simulation never fails.

use thiserror::Error;

/// Level data rejected before the simulation starts.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level has no platforms")]
    NoPlatforms,

    #[error("{entity} #{index} has non-positive size {width}x{height}")]
    EmptyRect {
        entity: &'static str,
        index: usize,
        width: f32,
        height: f32,
    },

    #[error("{entity} #{index} patrols platform {platform}, but only {count} platforms exist")]
    UnknownPlatform {
        entity: &'static str,
        index: usize,
        platform: usize,
        count: usize,
    },
}

/// Sprite registry failures.
#[derive(Debug, Error, PartialEq)]
pub enum AssetError {
    #[error("sprite '{0}' has no frames")]
    NoFrames(String),

    #[error("sprite '{name}' frame {frame} is not rectangular")]
    RaggedFrame { name: String, frame: usize },

    #[error("sprite '{0}' registered twice")]
    Duplicate(String),

    #[error("no sprite for player animation state '{0}'")]
    MissingState(String),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid level: {0}")]
    Level(#[from] LevelError),

    #[error("failed to load sprites: {0}")]
    Asset(#[from] AssetError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
