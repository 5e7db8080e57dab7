use engine::{Camera, Canvas, PixelBuffer, Rect, Vec2};
use tracing::{info, warn};

use super::collision::body_rect;
use super::config::{
    player_spawn, BG_TILE, PICKUP_MIN_DIST_FROM_SPAWN, PICKUP_SIZE, WORLD_HEIGHT, WORLD_WIDTH,
};
use super::save::{SavedPickup, SavedWorld};
use super::worldgen::{
    generate_background, generate_pickups, generate_rocks, Biome, Pickup, PickupKind, WorldRng,
    PICKUP_COUNT_RANGE, ROCK_SIZE_RANGE,
};

const RELOCATE_STEP: f32 = 24.0;
const RELOCATE_MAX_RINGS: u32 = 12;
const RELOCATE_DIRECTIONS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
];

/// One biome's terrain. Background and rocks never change after generation;
/// pickups only shrink as they are collected.
#[derive(Debug, Clone)]
pub(crate) struct World {
    biome: Biome,
    seed: u64,
    width: u32,
    height: u32,
    background: PixelBuffer,
    rocks: Vec<Rect>,
    pickups: Vec<Pickup>,
}

impl World {
    pub(crate) fn generate(seed: u64, biome: Biome) -> Self {
        Self::generate_sized(seed, biome, WORLD_WIDTH, WORLD_HEIGHT, player_spawn())
    }

    pub(crate) fn generate_sized(
        seed: u64,
        biome: Biome,
        width: u32,
        height: u32,
        spawn: Vec2,
    ) -> Self {
        let mut rng = WorldRng::for_biome(seed, biome);
        let background = generate_background(&mut rng, biome, width, height, BG_TILE);
        let rocks = generate_rocks(&mut rng, biome, width, height, ROCK_SIZE_RANGE);
        let pickups = generate_pickups(
            &mut rng,
            biome,
            width,
            height,
            spawn,
            PICKUP_COUNT_RANGE,
            PICKUP_MIN_DIST_FROM_SPAWN,
        );
        info!(
            seed,
            biome = biome.as_str(),
            width,
            height,
            rock_count = rocks.len(),
            pickup_count = pickups.len(),
            "world_generated"
        );

        Self {
            biome,
            seed,
            width,
            height,
            background,
            rocks,
            pickups,
        }
    }

    pub(crate) fn biome(&self) -> Biome {
        self.biome
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn bounds(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub(crate) fn background(&self) -> &PixelBuffer {
        &self.background
    }

    pub(crate) fn rocks(&self) -> &[Rect] {
        &self.rocks
    }

    pub(crate) fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Removes and returns the first pickup, in storage order, within
    /// `radius` of `pos`.
    pub(crate) fn remove_pickup_at(&mut self, pos: Vec2, radius: f32) -> Option<Pickup> {
        let index = self
            .pickups
            .iter()
            .position(|pickup| pickup.pos.distance_to(pos) <= radius)?;
        Some(self.pickups.remove(index))
    }

    pub(crate) fn colliding_rocks(&self, rect: Rect) -> Vec<Rect> {
        self.rocks
            .iter()
            .filter(|rock| rect.overlaps(rock))
            .copied()
            .collect()
    }

    /// Nearest rock-free player position around `start`, scanning rings of
    /// eight directions outward. Falls back to `fallback` when every ring is
    /// blocked.
    pub(crate) fn free_position_near(&self, start: Vec2, fallback: Vec2) -> Vec2 {
        if self.colliding_rocks(body_rect(start)).is_empty() {
            return start;
        }
        let bounds = self.bounds();
        for ring in 1..=RELOCATE_MAX_RINGS {
            let distance = ring as f32 * RELOCATE_STEP;
            for (dx, dy) in RELOCATE_DIRECTIONS {
                let candidate = start + Vec2::new(dx, dy) * distance;
                let inside = (0.0..=bounds.x).contains(&candidate.x)
                    && (0.0..=bounds.y).contains(&candidate.y);
                if inside && self.colliding_rocks(body_rect(candidate)).is_empty() {
                    return candidate;
                }
            }
        }
        fallback
    }

    /// Background, then rocks, then pickups.
    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>, camera: &Camera) {
        let profile = self.biome.profile();
        canvas.blit(
            self.background(),
            camera.offset.x as i32,
            camera.offset.y as i32,
            0,
            0,
            canvas.width() as i32,
            canvas.height() as i32,
        );
        for rock in &self.rocks {
            let screen = camera.apply(*rock);
            canvas.fill_world_rect(screen, profile.rock_color);
            canvas.outline_world_rect(screen, profile.rock_edge_color);
        }
        for pickup in &self.pickups {
            let rect = Rect::from_center(pickup.pos, PICKUP_SIZE, PICKUP_SIZE);
            canvas.fill_world_rect(camera.apply(rect), pickup.kind.color());
        }
    }

    pub(crate) fn to_saved(&self) -> SavedWorld {
        SavedWorld {
            seed: Some(self.seed),
            biome: Some(self.biome.as_str().to_string()),
            pickups: self
                .pickups
                .iter()
                .map(|pickup| SavedPickup {
                    kind: pickup.kind.as_str().to_string(),
                    pos: [pickup.pos.x, pickup.pos.y],
                })
                .collect(),
        }
    }

    /// Regenerates terrain from the stored `(seed, biome)` and then replaces
    /// the generated pickups with the stored ones.
    pub(crate) fn from_saved(saved: SavedWorld) -> Self {
        let seed = saved.seed.unwrap_or_else(|| {
            let fresh = rand::random::<u64>();
            warn!(seed = fresh, "saved_world_missing_seed");
            fresh
        });
        let biome = match saved.biome.as_deref().map(|raw| (raw, Biome::parse(raw))) {
            Some((_, Some(biome))) => biome,
            Some((raw, None)) => {
                warn!(biome = raw, "saved_world_unknown_biome");
                Biome::Desert
            }
            None => {
                warn!("saved_world_missing_biome");
                Biome::Desert
            }
        };

        let mut world = Self::generate(seed, biome);
        let bounds = world.bounds();
        world.pickups = saved
            .pickups
            .into_iter()
            .filter_map(|saved_pickup| {
                let Some(kind) = PickupKind::parse(&saved_pickup.kind) else {
                    warn!(kind = %saved_pickup.kind, "saved_pickup_unknown_type_dropped");
                    return None;
                };
                let [x, y] = saved_pickup.pos;
                if !((0.0..=bounds.x).contains(&x) && (0.0..=bounds.y).contains(&y)) {
                    warn!(kind = kind.as_str(), x, y, "saved_pickup_out_of_bounds_dropped");
                    return None;
                }
                Some(Pickup {
                    kind,
                    pos: Vec2::new(x, y),
                })
            })
            .collect();
        world
    }
}
