//! Simulation core for a side-scrolling platformer.
//!
//! The library owns every gameplay rule. The binary only translates terminal
//! events into [`input::InputFrame`] values and draws a read-only view of
//! [`entities::GameState`].

pub mod assets;
pub mod boss;
pub mod camera;
pub mod collision;
pub mod compute;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod level;
