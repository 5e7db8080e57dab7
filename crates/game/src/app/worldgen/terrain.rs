use engine::PixelBuffer;

use super::{Biome, WorldRng};

const BAND_STROKE_HEIGHT: i32 = 2;
const SPECKLE_RADIUS: i32 = 1;
const MIN_WAVELENGTH: u32 = 120;
const MAX_WAVELENGTH: u32 = 220;
const MIN_AMPLITUDE: u32 = 4;
const MAX_AMPLITUDE: u32 = 8;

/// Paints the biome background: palette tiles, sine dune/foliage bands, then
/// grain speckles. Identical `rng` state and arguments give an identical
/// buffer.
pub(crate) fn generate_background(
    rng: &mut WorldRng,
    biome: Biome,
    width: u32,
    height: u32,
    tile_size: u32,
) -> PixelBuffer {
    let profile = biome.profile();
    let mut buffer = PixelBuffer::new_filled(width, height, profile.palette[0]);
    if width == 0 || height == 0 {
        return buffer;
    }
    let tile = tile_size.max(1);
    let mut canvas = buffer.canvas();

    for ty in (0..height).step_by(tile as usize) {
        for tx in (0..width).step_by(tile as usize) {
            let color = profile.palette[rng.gen_range(0..profile.palette.len())];
            canvas.fill_rect(tx as i32, ty as i32, tile as i32, tile as i32, color);
        }
    }

    let band_count = profile.band_count;
    for band in 0..band_count {
        let amplitude = rng.gen_range(MIN_AMPLITUDE..=MAX_AMPLITUDE) as f32;
        let wavelength = rng.gen_range(MIN_WAVELENGTH..=MAX_WAVELENGTH) as f32;
        let center = height as f32 * (band + 1) as f32 / (band_count + 1) as f32;
        let color = profile.band_color(band);
        for x in 0..width {
            let y = (center + amplitude * (x as f32 / wavelength).sin()) as i32;
            canvas.draw_vertical_stroke(x as i32, y, BAND_STROKE_HEIGHT, color);
        }
    }

    for _ in 0..profile.speckle_count {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        canvas.fill_circle(x, y, SPECKLE_RADIUS, profile.grain_color);
    }

    buffer
}
