use std::ops::RangeInclusive;

use engine::Vec2;

use super::{Biome, WorldRng};

pub(crate) const MAX_PLACEMENT_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PickupKind {
    Water,
    Torch,
    Lamp,
}

impl PickupKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            PickupKind::Water => "water",
            PickupKind::Torch => "torch",
            PickupKind::Lamp => "lamp",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<PickupKind> {
        match raw {
            "water" => Some(PickupKind::Water),
            "torch" => Some(PickupKind::Torch),
            "lamp" => Some(PickupKind::Lamp),
            _ => None,
        }
    }

    pub(crate) fn color(self) -> [u8; 4] {
        match self {
            PickupKind::Water => [60, 170, 230, 255],
            PickupKind::Torch => [255, 180, 70, 255],
            PickupKind::Lamp => [250, 240, 150, 255],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
}

/// Places `count_range` pickups with kinds drawn from the biome pool.
///
/// Each position is resampled until it lies farther than
/// `min_spawn_distance` from `spawn`, for at most
/// [`MAX_PLACEMENT_ATTEMPTS`] samples; the last sample is kept when every
/// attempt lands too close. Biomes with a guaranteed kind force it onto the
/// first pickup after its kind has been drawn, so the stream is consumed the
/// same way in every biome.
pub(crate) fn generate_pickups(
    rng: &mut WorldRng,
    biome: Biome,
    width: u32,
    height: u32,
    spawn: Vec2,
    count_range: RangeInclusive<u32>,
    min_spawn_distance: f32,
) -> Vec<Pickup> {
    let profile = biome.profile();
    let count = if count_range.is_empty() {
        0
    } else {
        rng.gen_range(count_range)
    };

    let mut pickups = Vec::with_capacity(count as usize);
    for index in 0..count {
        let Some(mut kind) = rng.choose(profile.pickup_pool) else {
            break;
        };
        if index == 0 {
            if let Some(guaranteed) = profile.guaranteed_first_pickup {
                kind = guaranteed;
            }
        }
        let pos = sample_position(rng, width, height, spawn, min_spawn_distance);
        pickups.push(Pickup { kind, pos });
    }
    pickups
}

fn sample_position(
    rng: &mut WorldRng,
    width: u32,
    height: u32,
    spawn: Vec2,
    min_spawn_distance: f32,
) -> Vec2 {
    let mut pos = Vec2::ZERO;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        pos = Vec2::new(
            rng.gen_range(0..=width) as f32,
            rng.gen_range(0..=height) as f32,
        );
        if pos.distance_to(spawn) > min_spawn_distance {
            break;
        }
    }
    pos
}
