//! Horizontal scrolling viewport.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub bounds: Option<CameraBounds>,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Camera {
            x: 0.0,
            y: 0.0,
            width,
            height,
            bounds: None,
        }
    }

    pub fn set_bounds(&mut self, bounds: CameraBounds) {
        self.bounds = Some(bounds);
    }

    /// Keep the target one third of the way into the viewport, then clamp
    /// to `[min_x, max_x - width]`.
    pub fn follow(&mut self, target: &Rect) {
        self.x = target.x - self.width / 3.0;

        if let Some(b) = self.bounds {
            self.x = self.x.min(b.max_x - self.width).max(b.min_x);
            self.y = self.y.min(b.max_y - self.height).max(b.min_y);
        }
    }

    /// Inclusive on the edges, so things entering the frame draw a tick early.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.x + rect.width >= self.x
            && rect.x <= self.x + self.width
            && rect.y + rect.height >= self.y
            && rect.y <= self.y + self.height
    }

    pub fn world_to_screen(&self, world_x: f32, world_y: f32) -> (f32, f32) {
        (world_x - self.x, world_y - self.y)
    }
}
