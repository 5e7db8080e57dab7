use std::ops::RangeInclusive;

use engine::Rect;

use super::{Biome, WorldRng};

/// Scatters `floor(width * height * density)` rocks. Rocks may overlap each
/// other; every rock fits fully inside the world. A side larger than the
/// world is clamped to the world size.
pub(crate) fn generate_rocks(
    rng: &mut WorldRng,
    biome: Biome,
    width: u32,
    height: u32,
    size_range: RangeInclusive<u32>,
) -> Vec<Rect> {
    if width == 0 || height == 0 || size_range.is_empty() {
        return Vec::new();
    }
    let count = (width as f64 * height as f64 * biome.profile().rock_density).floor() as usize;

    (0..count)
        .map(|_| {
            let rock_width = rng.gen_range(size_range.clone()).min(width);
            let rock_height = rng.gen_range(size_range.clone()).min(height);
            let x = rng.gen_range(0..=width - rock_width);
            let y = rng.gen_range(0..=height - rock_height);
            Rect::new(x as f32, y as f32, rock_width as f32, rock_height as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::worldgen::ROCK_SIZE_RANGE;

    fn rocks(seed: u64, biome: Biome, width: u32, height: u32) -> Vec<Rect> {
        let mut rng = WorldRng::for_biome(seed, biome);
        generate_rocks(&mut rng, biome, width, height, ROCK_SIZE_RANGE)
    }

    #[test]
    fn count_follows_area_and_density() {
        assert_eq!(rocks(1, Biome::Desert, 2400, 1800).len(), 51);
        assert_eq!(rocks(1, Biome::Forest, 2400, 1800).len(), 129);
    }

    #[test]
    fn desert_rocks_match_recorded_layout() {
        let placed = rocks(1, Biome::Desert, 2400, 1800);
        assert_eq!(
            &placed[..3],
            &[
                Rect::new(190.0, 1045.0, 36.0, 48.0),
                Rect::new(672.0, 1605.0, 32.0, 44.0),
                Rect::new(1088.0, 269.0, 41.0, 35.0),
            ]
        );
    }

    #[test]
    fn rocks_stay_inside_world_with_sizes_in_range() {
        for biome in Biome::ALL {
            for rock in rocks(77, biome, 2400, 1800) {
                assert!(rock.left() >= 0.0 && rock.top() >= 0.0, "{rock:?}");
                assert!(rock.right() <= 2400.0 && rock.bottom() <= 1800.0, "{rock:?}");
                assert!((22.0..=48.0).contains(&rock.w), "{rock:?}");
                assert!((22.0..=48.0).contains(&rock.h), "{rock:?}");
            }
        }
    }

    #[test]
    fn same_seed_gives_same_rocks() {
        assert_eq!(
            rocks(2024, Biome::Forest, 2400, 1800),
            rocks(2024, Biome::Forest, 2400, 1800)
        );
    }

    #[test]
    fn narrow_world_clamps_rock_width() {
        let mut rng = WorldRng::from_seed(8);
        let rocks = generate_rocks(&mut rng, Biome::Forest, 10, 100_000, ROCK_SIZE_RANGE);
        assert!(!rocks.is_empty());
        for rock in rocks {
            assert_eq!(rock.x, 0.0);
            assert_eq!(rock.w, 10.0);
            assert!(rock.bottom() <= 100_000.0);
        }
    }

    #[test]
    fn empty_world_has_no_rocks() {
        assert!(rocks(3, Biome::Desert, 0, 1800).is_empty());
        assert!(rocks(3, Biome::Desert, 10, 10).is_empty());
    }
}
