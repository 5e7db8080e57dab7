use std::fmt;

use crate::app::{Rect, Viewport};

/// Borrowed RGBA8 raster. All drawing calls clip against the canvas bounds,
/// so callers may pass coordinates that are partially or fully off-screen.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut *self.frame
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let offset = self.byte_offset(x, y)?;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.frame[offset..offset + 4]);
        Some(color)
    }

    pub fn write_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if let Some(offset) = self.byte_offset(x, y) {
            self.frame[offset..offset + 4].copy_from_slice(&color);
        }
    }

    /// Source-over blend using the alpha channel of `color`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        let Some(offset) = self.byte_offset(x, y) else {
            return;
        };
        let alpha = color[3] as u32;
        let inv_alpha = 255 - alpha;
        for channel in 0..3 {
            let dst = self.frame[offset + channel] as u32;
            let src = color[channel] as u32;
            self.frame[offset + channel] = ((src * alpha + dst * inv_alpha) / 255) as u8;
        }
        self.frame[offset + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, rect_width: i32, rect_height: i32, color: [u8; 4]) {
        let Some((start_x, start_y, end_x, end_y)) = self.clip(x, y, rect_width, rect_height)
        else {
            return;
        };
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.write_pixel(px, py, color);
            }
        }
    }

    pub fn blend_rect(
        &mut self,
        x: i32,
        y: i32,
        rect_width: i32,
        rect_height: i32,
        color: [u8; 4],
    ) {
        let Some((start_x, start_y, end_x, end_y)) = self.clip(x, y, rect_width, rect_height)
        else {
            return;
        };
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub fn fill_world_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let (x, y, w, h) = snap_rect(rect);
        self.fill_rect(x, y, w, h, color);
    }

    pub fn outline_world_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let (x, y, w, h) = snap_rect(rect);
        self.draw_rect_outline(x, y, w, h, color);
    }

    pub fn draw_rect_outline(
        &mut self,
        x: i32,
        y: i32,
        rect_width: i32,
        rect_height: i32,
        color: [u8; 4],
    ) {
        if rect_width <= 1 || rect_height <= 1 {
            return;
        }
        self.fill_rect(x, y, rect_width, 1, color);
        self.fill_rect(x, y + rect_height - 1, rect_width, 1, color);
        self.fill_rect(x, y, 1, rect_height, color);
        self.fill_rect(x + rect_width - 1, y, 1, rect_height, color);
    }

    pub fn draw_vertical_stroke(&mut self, x: i32, y: i32, length: i32, color: [u8; 4]) {
        for py in y..y + length {
            self.write_pixel(x, py, color);
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: [u8; 4]) {
        if radius < 0 {
            return;
        }
        let radius_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius_sq {
                    self.write_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Annulus between `radius - thickness` (exclusive) and `radius` (inclusive).
    pub fn draw_ring(&mut self, cx: i32, cy: i32, radius: i32, thickness: i32, color: [u8; 4]) {
        if radius <= 0 || thickness <= 0 {
            return;
        }
        let outer_sq = radius * radius;
        let inner = (radius - thickness).max(0);
        let inner_sq = inner * inner;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist_sq = dx * dx + dy * dy;
                if dist_sq <= outer_sq && dist_sq > inner_sq {
                    self.write_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 4]) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.write_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    /// Copies the `width x height` region of `source` starting at
    /// `(src_x, src_y)` to `(dst_x, dst_y)`, clipped on both sides.
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &mut self,
        source: &PixelBuffer,
        src_x: i32,
        src_y: i32,
        dst_x: i32,
        dst_y: i32,
        width: i32,
        height: i32,
    ) {
        for row in 0..height {
            let sy = src_y + row;
            let dy = dst_y + row;
            if sy < 0 || sy >= source.height as i32 || dy < 0 || dy >= self.height as i32 {
                continue;
            }
            let start_col = 0i32.max(-src_x).max(-dst_x);
            let end_col = width
                .min(source.width as i32 - src_x)
                .min(self.width as i32 - dst_x);
            if end_col <= start_col {
                continue;
            }
            let src_row = sy as usize * source.width as usize;
            let dst_row = dy as usize * self.width as usize;
            let src_start = (src_row + (src_x + start_col) as usize) * 4;
            let dst_start = (dst_row + (dst_x + start_col) as usize) * 4;
            let len = (end_col - start_col) as usize * 4;
            if src_start + len > source.rgba.len() || dst_start + len > self.frame.len() {
                continue;
            }
            self.frame[dst_start..dst_start + len]
                .copy_from_slice(&source.rgba[src_start..src_start + len]);
        }
    }

    fn clip(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(i32, i32, i32, i32)> {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(w).min(self.width as i32);
        let end_y = y.saturating_add(h).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            None
        } else {
            Some((start_x, start_y, end_x, end_y))
        }
    }

    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let pixel_offset = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?;
        let byte_offset = pixel_offset.checked_mul(4)?;
        if byte_offset + 4 > self.frame.len() {
            return None;
        }
        Some(byte_offset)
    }
}

fn snap_rect(rect: Rect) -> (i32, i32, i32, i32) {
    (
        rect.x.floor() as i32,
        rect.y.floor() as i32,
        rect.w.round() as i32,
        rect.h.round() as i32,
    )
}

/// Owned RGBA8 image. Two buffers compare equal only when their dimensions
/// and every byte match.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut rgba = vec![0u8; width as usize * height as usize * 4];
        for chunk in rgba.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.rgba, self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(color)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn fill_rect_clips_negative_origin_and_far_edge() {
        let mut buffer = PixelBuffer::new_filled(8, 8, BLACK);
        buffer.canvas().fill_rect(-4, -4, 6, 6, RED);
        buffer.canvas().fill_rect(7, 7, 10, 10, RED);

        assert_eq!(buffer.pixel(0, 0), Some(RED));
        assert_eq!(buffer.pixel(1, 1), Some(RED));
        assert_eq!(buffer.pixel(2, 2), Some(BLACK));
        assert_eq!(buffer.pixel(7, 7), Some(RED));
    }

    #[test]
    fn drawing_on_zero_sized_canvas_is_safe() {
        let mut frame: Vec<u8> = Vec::new();
        let mut canvas = Canvas::new(&mut frame, 0, 0);
        canvas.fill_rect(0, 0, 4, 4, RED);
        canvas.fill_circle(0, 0, 3, RED);
        canvas.draw_line(-5, -5, 5, 5, RED);
        assert!(canvas.pixel(0, 0).is_none());
    }

    #[test]
    fn circle_of_radius_one_is_a_plus_shape() {
        let mut buffer = PixelBuffer::new_filled(5, 5, BLACK);
        buffer.canvas().fill_circle(2, 2, 1, RED);

        for (x, y) in [(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(buffer.pixel(x, y), Some(RED), "({x},{y})");
        }
        for (x, y) in [(1, 1), (3, 3), (1, 3), (3, 1)] {
            assert_eq!(buffer.pixel(x, y), Some(BLACK), "({x},{y})");
        }
    }

    #[test]
    fn blit_copies_region_with_clipping() {
        let mut source = PixelBuffer::new_filled(4, 4, BLACK);
        source.canvas().write_pixel(1, 1, RED);
        source.canvas().write_pixel(3, 3, RED);

        let mut target = PixelBuffer::new_filled(3, 3, [9, 9, 9, 255]);
        target.canvas().blit(&source, 1, 1, 0, 0, 3, 3);
        assert_eq!(target.pixel(0, 0), Some(RED));
        assert_eq!(target.pixel(2, 2), Some(RED));
        assert_eq!(target.pixel(1, 1), Some(BLACK));

        let mut shifted = PixelBuffer::new_filled(3, 3, [9, 9, 9, 255]);
        shifted.canvas().blit(&source, 2, 2, 0, 0, 3, 3);
        assert_eq!(shifted.pixel(1, 1), Some(RED));
        assert_eq!(shifted.pixel(2, 2), Some([9, 9, 9, 255]));
    }

    #[test]
    fn blend_rect_mixes_toward_source_color() {
        let mut buffer = PixelBuffer::new_filled(2, 2, BLACK);
        buffer.canvas().blend_rect(0, 0, 2, 2, [255, 255, 255, 128]);
        let pixel = buffer.pixel(0, 0).expect("pixel");
        assert_eq!(pixel[0], 128);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn line_reaches_both_endpoints() {
        let mut buffer = PixelBuffer::new_filled(10, 10, BLACK);
        buffer.canvas().draw_line(1, 8, 7, 2, RED);
        assert_eq!(buffer.pixel(1, 8), Some(RED));
        assert_eq!(buffer.pixel(7, 2), Some(RED));
    }
}
