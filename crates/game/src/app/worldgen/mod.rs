//! Seeded procedural generation for the two biome worlds.
//!
//! Every generator pulls from one [`WorldRng`] in a fixed order:
//! background, then rocks, then pickups. Reordering these calls changes the
//! world produced by a given seed and breaks existing saves.

mod pickups;
mod rocks;
mod terrain;

use std::ops::RangeInclusive;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub(crate) use pickups::{generate_pickups, Pickup, PickupKind};
pub(crate) use rocks::generate_rocks;
pub(crate) use terrain::generate_background;

pub(crate) const ROCK_SIZE_RANGE: RangeInclusive<u32> = 22..=48;
pub(crate) const PICKUP_COUNT_RANGE: RangeInclusive<u32> = 10..=20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Biome {
    Desert,
    Forest,
}

impl Biome {
    #[cfg(test)]
    pub(crate) const ALL: [Biome; 2] = [Biome::Desert, Biome::Forest];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Biome::Desert => "desert",
            Biome::Forest => "forest",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Biome> {
        match raw {
            "desert" => Some(Biome::Desert),
            "forest" => Some(Biome::Forest),
            _ => None,
        }
    }

    pub(crate) fn other(self) -> Biome {
        match self {
            Biome::Desert => Biome::Forest,
            Biome::Forest => Biome::Desert,
        }
    }

    /// Forest derives its stream from `seed + 1` so both worlds of a session
    /// differ while sharing one session seed.
    pub(crate) fn stream_seed(self, seed: u64) -> u64 {
        match self {
            Biome::Desert => seed,
            Biome::Forest => seed.wrapping_add(1),
        }
    }

    pub(crate) fn profile(self) -> &'static BiomeProfile {
        match self {
            Biome::Desert => &DESERT_PROFILE,
            Biome::Forest => &FOREST_PROFILE,
        }
    }
}

/// Per-biome generation constants.
#[derive(Debug)]
pub(crate) struct BiomeProfile {
    pub palette: [[u8; 4]; 3],
    pub band_count: u32,
    pub band_colors: [[u8; 4]; 2],
    pub speckle_count: u32,
    pub grain_color: [u8; 4],
    pub rock_density: f64,
    pub rock_color: [u8; 4],
    pub rock_edge_color: [u8; 4],
    pub pickup_pool: &'static [PickupKind],
    pub guaranteed_first_pickup: Option<PickupKind>,
}

impl BiomeProfile {
    /// Desert bands alternate between two shades by parity; forest bands use
    /// the same foliage color twice.
    pub(crate) fn band_color(&self, band_index: u32) -> [u8; 4] {
        self.band_colors[(band_index % 2) as usize]
    }
}

static DESERT_PROFILE: BiomeProfile = BiomeProfile {
    palette: [
        [227, 200, 140, 255],
        [200, 170, 120, 255],
        [245, 220, 170, 255],
    ],
    band_count: 8,
    band_colors: [[210, 185, 130, 255], [218, 185, 130, 255]],
    speckle_count: 350,
    grain_color: [160, 140, 110, 255],
    rock_density: 0.000_012,
    rock_color: [150, 125, 95, 255],
    rock_edge_color: [110, 90, 68, 255],
    pickup_pool: &[PickupKind::Water, PickupKind::Torch],
    guaranteed_first_pickup: None,
};

static FOREST_PROFILE: BiomeProfile = BiomeProfile {
    palette: [
        [74, 120, 62, 255],
        [60, 102, 52, 255],
        [88, 138, 70, 255],
    ],
    band_count: 10,
    band_colors: [[46, 84, 40, 255], [46, 84, 40, 255]],
    speckle_count: 800,
    grain_color: [38, 66, 34, 255],
    rock_density: 0.000_03,
    rock_color: [105, 108, 100, 255],
    rock_edge_color: [70, 72, 66, 255],
    pickup_pool: &[PickupKind::Water, PickupKind::Torch, PickupKind::Lamp],
    guaranteed_first_pickup: Some(PickupKind::Lamp),
};

/// Explicit, portable random stream. Never shared between worlds.
#[derive(Debug, Clone)]
pub(crate) struct WorldRng {
    inner: ChaCha8Rng,
}

impl WorldRng {
    pub(crate) fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub(crate) fn for_biome(seed: u64, biome: Biome) -> Self {
        Self::from_seed(biome.stream_seed(seed))
    }

    pub(crate) fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    pub(crate) fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform pick; `None` only for an empty slice.
    pub(crate) fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.inner.gen_range(0..items.len())])
    }
}
