use super::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Follows a target while keeping the viewport inside the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    world_width: f32,
    world_height: f32,
}

impl Camera {
    pub fn new(world_width: u32, world_height: u32) -> Self {
        Self {
            offset: Vec2::ZERO,
            world_width: world_width as f32,
            world_height: world_height as f32,
        }
    }

    /// Centers the viewport on `target`, then clamps each axis to
    /// `[0, world - viewport]`. An axis where the world is smaller than the
    /// viewport pins to 0 and leaves a border on the far side.
    pub fn update(&mut self, target: Vec2, viewport: Viewport) -> Vec2 {
        let view = viewport.size();
        self.offset = Vec2::new(
            clamp_axis(target.x - view.x * 0.5, self.world_width - view.x),
            clamp_axis(target.y - view.y * 0.5, self.world_height - view.y),
        );
        self.offset
    }

    pub fn apply(&self, world_rect: Rect) -> Rect {
        world_rect.translated(Vec2::new(-self.offset.x, -self.offset.y))
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.offset
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if !value.is_finite() || !(max > 0.0) {
        return 0.0;
    }
    value.clamp(0.0, max)
}
