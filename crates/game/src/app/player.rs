use engine::{Camera, Canvas, InputAction, InputSnapshot, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::{body_rect, resolve_move};
use super::config::{DEFAULT_SPEED_INDEX, PLAYER_COLOR, PLAYER_SPEEDS};
use super::worldgen::{Pickup, PickupKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Inventory {
    pub water: u32,
    pub torch: u32,
    pub lamp: bool,
}

impl Inventory {
    pub(crate) fn add(&mut self, kind: PickupKind) {
        match kind {
            PickupKind::Water => self.water = self.water.saturating_add(1),
            PickupKind::Torch => self.torch = self.torch.saturating_add(1),
            PickupKind::Lamp => self.lamp = true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    pub pos: Vec2,
    pub speed_index: usize,
    pub inventory: Inventory,
}

impl Player {
    pub(crate) fn new(pos: Vec2, speed_index: usize) -> Self {
        Self {
            pos,
            speed_index: clamp_speed_index(speed_index),
            inventory: Inventory::default(),
        }
    }

    pub(crate) fn speed(&self) -> f32 {
        PLAYER_SPEEDS[clamp_speed_index(self.speed_index)]
    }

    pub(crate) fn rect(&self) -> Rect {
        body_rect(self.pos)
    }

    /// Moves the player for one tick against `rocks`, in pixels per second.
    pub(crate) fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        rocks: &[Rect],
        world_bounds: Vec2,
    ) {
        let velocity = movement_direction(input) * self.speed();
        self.pos = resolve_move(self.pos, velocity, dt, rocks, world_bounds);
    }

    pub(crate) fn collect(&mut self, pickup: Pickup) {
        self.inventory.add(pickup.kind);
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>, camera: &Camera) {
        canvas.fill_world_rect(camera.apply(self.rect()), PLAYER_COLOR);
    }
}

pub(crate) fn clamp_speed_index(index: usize) -> usize {
    if index < PLAYER_SPEEDS.len() {
        index
    } else {
        DEFAULT_SPEED_INDEX
    }
}

/// Unit-length direction from the held movement keys, or zero.
pub(crate) fn movement_direction(input: &InputSnapshot) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if input.is_down(InputAction::MoveLeft) {
        direction.x -= 1.0;
    }
    if input.is_down(InputAction::MoveRight) {
        direction.x += 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        direction.y -= 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        direction.y += 1.0;
    }
    direction.normalized_or_zero()
}
