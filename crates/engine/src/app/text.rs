//! 3x5 bitmap font. Lowercase letters render as uppercase; characters
//! without a glyph advance the pen like a space.

use super::Canvas;

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const LETTERS: [Glyph; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101],
    [0b110, 0b101, 0b110, 0b101, 0b110],
    [0b011, 0b100, 0b100, 0b100, 0b011],
    [0b110, 0b101, 0b101, 0b101, 0b110],
    [0b111, 0b100, 0b110, 0b100, 0b111],
    [0b111, 0b100, 0b110, 0b100, 0b100],
    [0b011, 0b100, 0b101, 0b101, 0b011],
    [0b101, 0b101, 0b111, 0b101, 0b101],
    [0b111, 0b010, 0b010, 0b010, 0b111],
    [0b001, 0b001, 0b001, 0b101, 0b010],
    [0b101, 0b101, 0b110, 0b101, 0b101],
    [0b100, 0b100, 0b100, 0b100, 0b111],
    [0b101, 0b111, 0b111, 0b101, 0b101],
    [0b110, 0b101, 0b101, 0b101, 0b101],
    [0b010, 0b101, 0b101, 0b101, 0b010],
    [0b110, 0b101, 0b110, 0b100, 0b100],
    [0b010, 0b101, 0b101, 0b110, 0b011],
    [0b110, 0b101, 0b110, 0b101, 0b101],
    [0b011, 0b100, 0b010, 0b001, 0b110],
    [0b111, 0b010, 0b010, 0b010, 0b010],
    [0b101, 0b101, 0b101, 0b101, 0b111],
    [0b101, 0b101, 0b101, 0b101, 0b010],
    [0b101, 0b101, 0b111, 0b111, 0b101],
    [0b101, 0b101, 0b010, 0b101, 0b101],
    [0b101, 0b101, 0b010, 0b010, 0b010],
    [0b111, 0b001, 0b010, 0b100, 0b111],
];

const DIGITS: [Glyph; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b110, 0b001, 0b010, 0b100, 0b111],
    [0b110, 0b001, 0b010, 0b001, 0b110],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b110, 0b001, 0b110],
    [0b011, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b110],
];

fn glyph_for(ch: char) -> Option<Glyph> {
    let upper = ch.to_ascii_uppercase();
    match upper {
        'A'..='Z' => Some(LETTERS[(upper as u8 - b'A') as usize]),
        '0'..='9' => Some(DIGITS[(upper as u8 - b'0') as usize]),
        '!' => Some([0b010, 0b010, 0b010, 0b000, 0b010]),
        '.' => Some([0b000, 0b000, 0b000, 0b000, 0b010]),
        ',' => Some([0b000, 0b000, 0b000, 0b010, 0b100]),
        ':' => Some([0b000, 0b010, 0b000, 0b010, 0b000]),
        '-' => Some([0b000, 0b000, 0b111, 0b000, 0b000]),
        '+' => Some([0b000, 0b010, 0b111, 0b010, 0b000]),
        '/' => Some([0b001, 0b001, 0b010, 0b100, 0b100]),
        '(' => Some([0b001, 0b010, 0b010, 0b010, 0b001]),
        ')' => Some([0b100, 0b010, 0b010, 0b010, 0b100]),
        '[' => Some([0b011, 0b010, 0b010, 0b010, 0b011]),
        ']' => Some([0b110, 0b010, 0b010, 0b010, 0b110]),
        '<' => Some([0b001, 0b010, 0b100, 0b010, 0b001]),
        '>' => Some([0b100, 0b010, 0b001, 0b010, 0b100]),
        '?' => Some([0b110, 0b001, 0b010, 0b000, 0b010]),
        '\'' => Some([0b010, 0b010, 0b000, 0b000, 0b000]),
        '%' => Some([0b101, 0b001, 0b010, 0b100, 0b101]),
        '=' => Some([0b000, 0b111, 0b000, 0b111, 0b000]),
        '|' => Some([0b010, 0b010, 0b010, 0b010, 0b010]),
        '_' => Some([0b000, 0b000, 0b000, 0b000, 0b111]),
        '*' => Some([0b000, 0b101, 0b010, 0b101, 0b000]),
        _ => None,
    }
}

pub fn glyph_advance_px(scale: i32) -> i32 {
    (GLYPH_WIDTH + 1) * scale.max(1)
}

pub fn line_advance_px(scale: i32) -> i32 {
    (GLYPH_HEIGHT + 2) * scale.max(1)
}

/// Width of the inked area, without the trailing inter-glyph gap.
pub fn text_width_px(text: &str, scale: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    count * glyph_advance_px(scale) - scale.max(1)
}

pub fn draw_text(canvas: &mut Canvas<'_>, x: i32, y: i32, text: &str, color: [u8; 4], scale: i32) {
    let scale = scale.max(1);
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(glyph) = glyph_for(ch) {
            draw_glyph(canvas, pen_x, y, glyph, color, scale);
        }
        pen_x += glyph_advance_px(scale);
    }
}

fn draw_glyph(canvas: &mut Canvas<'_>, x: i32, y: i32, glyph: Glyph, color: [u8; 4], scale: i32) {
    for (row_index, row_bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            canvas.fill_rect(
                x + col * scale,
                y + row_index as i32 * scale,
                scale,
                scale,
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PixelBuffer;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn letters_and_digits_have_glyphs_in_both_cases() {
        for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
            assert!(glyph_for(ch).is_some(), "missing glyph for '{ch}'");
        }
    }

    #[test]
    fn hud_punctuation_is_covered() {
        for ch in "!.,:-+/()[]<>?'%=|_*".chars() {
            assert!(glyph_for(ch).is_some(), "missing glyph for '{ch}'");
        }
    }

    #[test]
    fn unknown_character_draws_nothing() {
        let mut buffer = PixelBuffer::new_filled(16, 16, BLACK);
        draw_text(&mut buffer.canvas(), 0, 0, "\u{e9}~", WHITE, 2);
        let bytes = buffer.as_bytes();
        assert!(bytes.chunks_exact(4).all(|px| px == BLACK.as_slice()));
    }

    #[test]
    fn text_width_excludes_trailing_gap() {
        assert_eq!(text_width_px("", 2), 0);
        assert_eq!(text_width_px("A", 2), 6);
        assert_eq!(text_width_px("AB", 2), 14);
        assert_eq!(line_advance_px(2), 14);
    }

    #[test]
    fn glyph_pixels_are_scaled() {
        let mut buffer = PixelBuffer::new_filled(8, 12, BLACK);
        draw_text(&mut buffer.canvas(), 0, 0, "1", WHITE, 2);

        // Top row of '1' is 0b010: only the middle column is lit.
        assert_eq!(buffer.pixel(0, 0), Some(BLACK));
        assert_eq!(buffer.pixel(2, 0), Some(WHITE));
        assert_eq!(buffer.pixel(3, 1), Some(WHITE));
        assert_eq!(buffer.pixel(4, 0), Some(BLACK));
    }

    #[test]
    fn drawing_off_canvas_is_safe() {
        let mut buffer = PixelBuffer::new_filled(4, 4, BLACK);
        draw_text(&mut buffer.canvas(), -30, -30, "SAFE", WHITE, 3);
        draw_text(&mut buffer.canvas(), 40, 40, "SAFE", WHITE, 3);
        let bytes = buffer.as_bytes();
        assert!(bytes.chunks_exact(4).all(|px| px == BLACK.as_slice()));
    }
}
