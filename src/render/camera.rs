//! Camera that keeps the player centered.

use crate::render::Rect;
use crate::world::Vec2;

/// A camera looking at a point of the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position at the center of the viewport.
    pub position: Vec2,
    /// Viewport width in screen pixels.
    pub viewport_width: i32,
    /// Viewport height in screen pixels.
    pub viewport_height: i32,
}

impl Camera {
    /// Create a camera at the world origin.
    #[must_use]
    pub const fn new(viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport_width,
            viewport_height,
        }
    }

    /// Center the camera on `target`.
    pub fn follow(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Convert a world position to screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> (i32, i32) {
        let half_w = f64::from(self.viewport_width) / 2.0;
        let half_h = f64::from(self.viewport_height) / 2.0;
        let sx = f64::from(world.x - self.position.x) + half_w;
        let sy = f64::from(world.y - self.position.y) + half_h;
        #[allow(clippy::cast_possible_truncation)]
        let screen = (sx.floor() as i32, sy.floor() as i32);
        screen
    }

    /// World-space rectangle currently in view.
    #[must_use]
    pub fn visible_area(&self) -> Rect {
        #[allow(clippy::cast_possible_truncation)]
        let left = (f64::from(self.position.x) - f64::from(self.viewport_width) / 2.0) as i32;
        #[allow(clippy::cast_possible_truncation)]
        let top = (f64::from(self.position.y) - f64::from(self.viewport_height) / 2.0) as i32;
        Rect::new(left, top, self.viewport_width, self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_followed_target_is_centered() {
        let mut camera = Camera::new(1280, 720);
        camera.follow(Vec2::new(500.0, 300.0));
        assert_eq!(camera.world_to_screen(Vec2::new(500.0, 300.0)), (640, 360));
        assert_eq!(camera.world_to_screen(Vec2::new(532.0, 300.0)), (672, 360));
    }

    #[test]
    fn test_visible_area() {
        let mut camera = Camera::new(100, 50);
        camera.follow(Vec2::new(200.0, 100.0));
        assert_eq!(camera.visible_area(), Rect::new(150, 75, 100, 50));
    }
}
