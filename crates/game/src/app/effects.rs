//! Full-frame post filters: desert heat haze and the day/night light falloff.

use std::f32::consts::TAU;

use engine::{Canvas, Vec2};

use super::config::{
    BASE_LIGHT_RADIUS, DAY_LENGTH_SECONDS, HEAT_HAZE_AMPLITUDE, HEAT_HAZE_SPEED,
    HEAT_HAZE_WAVELENGTH, LAMP_LIGHT_BONUS, MAX_TORCHES_FOR_LIGHT, TORCH_LIGHT_BONUS,
};
use super::player::Inventory;

const MIN_VISIBLE_DARKNESS: f32 = 0.001;

/// Horizontal pixel shift of screen row `y`, truncated toward zero.
pub(crate) fn heat_haze_shift(y: u32, time_seconds: f32) -> i32 {
    let phase = y as f32 / HEAT_HAZE_WAVELENGTH + time_seconds * HEAT_HAZE_SPEED;
    (HEAT_HAZE_AMPLITUDE * phase.sin()) as i32
}

/// Shifts each row sideways in place. Pixels uncovered by the shift keep
/// their previous color.
pub(crate) fn apply_heat_haze(canvas: &mut Canvas<'_>, time_seconds: f32) {
    let width = canvas.width() as usize;
    let height = canvas.height();
    let row_bytes = width * 4;
    if row_bytes == 0 {
        return;
    }
    let frame = canvas.pixels_mut();
    for (y, row) in frame
        .chunks_exact_mut(row_bytes)
        .take(height as usize)
        .enumerate()
    {
        let shift = heat_haze_shift(y as u32, time_seconds);
        let offset = shift.unsigned_abs() as usize;
        if offset == 0 || offset >= width {
            continue;
        }
        if shift > 0 {
            row.copy_within(0..(width - offset) * 4, offset * 4);
        } else {
            row.copy_within(offset * 4..row_bytes, 0);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct DayClock {
    elapsed: f32,
}

impl DayClock {
    pub(crate) fn from_elapsed(elapsed: f32) -> Self {
        let mut clock = Self::default();
        clock.advance(elapsed);
        clock
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        self.elapsed = (self.elapsed + dt).rem_euclid(DAY_LENGTH_SECONDS);
    }

    pub(crate) fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 0 at the start of the cycle, 1 at its midpoint.
    pub(crate) fn night_factor(&self) -> f32 {
        (1.0 - (TAU * self.elapsed / DAY_LENGTH_SECONDS).cos()) * 0.5
    }

    pub(crate) fn darkness(&self, night_strength: f32) -> f32 {
        self.night_factor() * night_strength
    }
}

pub(crate) fn light_radius(inventory: &Inventory) -> f32 {
    let lamp = if inventory.lamp { LAMP_LIGHT_BONUS } else { 0.0 };
    let torches = inventory.torch.min(MAX_TORCHES_FOR_LIGHT) as f32;
    BASE_LIGHT_RADIUS + lamp + TORCH_LIGHT_BONUS * torches
}

pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Darkens every pixel by `darkness * smoothstep(0.6r, r, d)` where `d` is
/// its distance from `light_center`.
pub(crate) fn apply_night(
    canvas: &mut Canvas<'_>,
    light_center: Vec2,
    light_radius: f32,
    darkness: f32,
) {
    if darkness <= MIN_VISIBLE_DARKNESS {
        return;
    }
    let width = canvas.width() as usize;
    if width == 0 {
        return;
    }
    let inner = light_radius * 0.6;
    let frame = canvas.pixels_mut();
    for (index, pixel) in frame.chunks_exact_mut(4).enumerate() {
        let x = (index % width) as f32 + 0.5;
        let y = (index / width) as f32 + 0.5;
        let distance = Vec2::new(x, y).distance_to(light_center);
        let keep = 1.0 - darkness * smoothstep(inner, light_radius, distance);
        for channel in &mut pixel[..3] {
            *channel = (*channel as f32 * keep) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::PixelBuffer;

    use super::*;

    #[test]
    fn haze_shift_matches_formula_and_amplitude() {
        assert_eq!(heat_haze_shift(0, 0.0), 0);
        for y in 0..600 {
            assert!(heat_haze_shift(y, 1.3).abs() <= 3);
        }
        // sin(188.5 / 120) ~= 1.0
        assert_eq!(heat_haze_shift(188, 0.0), 2);
        assert_eq!(heat_haze_shift(189, 0.0), 2);
    }

    #[test]
    fn haze_moves_row_content_by_shift() {
        let mut buffer = PixelBuffer::new_filled(16, 200, [0, 0, 0, 255]);
        {
            let mut canvas = buffer.canvas();
            for y in 0..200 {
                canvas.write_pixel(5, y, [255, 0, 0, 255]);
            }
        }
        apply_heat_haze(&mut buffer.canvas(), 0.0);

        let y = 189u32;
        let shift = heat_haze_shift(y, 0.0);
        assert_ne!(shift, 0);
        assert_eq!(
            buffer.pixel((5 + shift) as u32, y),
            Some([255, 0, 0, 255])
        );
        assert_eq!(buffer.pixel(5, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn night_factor_cycles() {
        assert_eq!(DayClock::default().night_factor(), 0.0);
        let midnight = DayClock::from_elapsed(DAY_LENGTH_SECONDS / 2.0);
        assert!((midnight.night_factor() - 1.0).abs() < 1e-6);
        assert!((midnight.darkness(0.65) - 0.65).abs() < 1e-6);

        let wrapped = DayClock::from_elapsed(DAY_LENGTH_SECONDS + 10.0);
        assert!((wrapped.elapsed() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn light_radius_counts_lamp_and_capped_torches() {
        assert_eq!(light_radius(&Inventory::default()), 90.0);
        let lit = Inventory {
            water: 0,
            torch: 9,
            lamp: true,
        };
        assert_eq!(light_radius(&lit), 90.0 + 50.0 + 40.0);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(10.0, 20.0, 5.0), 0.0);
        assert_eq!(smoothstep(10.0, 20.0, 25.0), 1.0);
        assert!((smoothstep(10.0, 20.0, 15.0) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(0.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn night_keeps_light_center_and_darkens_far_pixels() {
        let mut buffer = PixelBuffer::new_filled(200, 20, [200, 200, 200, 255]);
        apply_night(&mut buffer.canvas(), Vec2::new(10.0, 10.0), 50.0, 0.5);

        assert_eq!(buffer.pixel(10, 10), Some([200, 200, 200, 255]));
        assert_eq!(buffer.pixel(190, 10), Some([100, 100, 100, 255]));
    }

    #[test]
    fn zero_darkness_leaves_frame_untouched() {
        let mut buffer = PixelBuffer::new_filled(8, 8, [90, 80, 70, 255]);
        let before = buffer.clone();
        apply_night(&mut buffer.canvas(), Vec2::ZERO, 10.0, 0.0);
        assert_eq!(buffer, before);
    }
}
