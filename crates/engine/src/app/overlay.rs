use super::text::{draw_text, line_advance_px, text_width_px};
use super::{Canvas, LoopMetricsSnapshot};

const TEXT_SCALE: i32 = 2;
const OVERLAY_MARGIN: i32 = 8;
const OVERLAY_PANEL_INSET: i32 = 6;
const OVERLAY_TEXT_PRIMARY_COLOR: [u8; 4] = [244, 248, 252, 255];
const OVERLAY_TEXT_DIM_COLOR: [u8; 4] = [176, 198, 220, 255];
const OVERLAY_PANEL_BG_COLOR: [u8; 4] = [10, 12, 16, 200];
const OVERLAY_PANEL_BORDER_COLOR: [u8; 4] = [92, 106, 126, 255];
const PERF_SECTION_LABEL: &str = "PERF";
const SCENE_SECTION_LABEL: &str = "SCENE";

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub metrics: LoopMetricsSnapshot,
    pub render_fps_cap: Option<u32>,
    pub scene_lines: Vec<String>,
}

/// Debug panel anchored to the bottom-left corner so it never covers the HUD bar.
pub(crate) fn draw_overlay(canvas: &mut Canvas<'_>, data: &OverlayData) {
    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }

    let lines = build_overlay_lines(data);
    let longest = lines
        .iter()
        .map(|line| text_width_px(line, TEXT_SCALE))
        .max()
        .unwrap_or(0);
    let line_advance = line_advance_px(TEXT_SCALE);
    let panel_width = longest + OVERLAY_PANEL_INSET * 2;
    let panel_height = lines.len() as i32 * line_advance + OVERLAY_PANEL_INSET * 2;
    let panel_left = OVERLAY_MARGIN;
    let panel_top = canvas.height() as i32 - OVERLAY_MARGIN - panel_height;

    canvas.blend_rect(
        panel_left,
        panel_top,
        panel_width,
        panel_height,
        OVERLAY_PANEL_BG_COLOR,
    );
    canvas.draw_rect_outline(
        panel_left,
        panel_top,
        panel_width,
        panel_height,
        OVERLAY_PANEL_BORDER_COLOR,
    );

    let mut y = panel_top + OVERLAY_PANEL_INSET;
    for line in &lines {
        draw_text(
            canvas,
            panel_left + OVERLAY_PANEL_INSET,
            y,
            line,
            overlay_line_color(line),
            TEXT_SCALE,
        );
        y += line_advance;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    let mut lines = vec![
        PERF_SECTION_LABEL.to_string(),
        format_fps_line(data.metrics.fps, data.render_fps_cap),
        format!("TPS: {:.1}", data.metrics.tps),
        format!(
            "FRAME: {:.2} MS (MAX {:.1})",
            data.metrics.frame_time_ms, data.metrics.worst_frame_ms
        ),
    ];
    if !data.scene_lines.is_empty() {
        lines.push(SCENE_SECTION_LABEL.to_string());
        lines.extend(data.scene_lines.iter().cloned());
    }
    lines
}

fn overlay_line_color(line: &str) -> [u8; 4] {
    if matches!(line, PERF_SECTION_LABEL | SCENE_SECTION_LABEL) {
        OVERLAY_TEXT_DIM_COLOR
    } else {
        OVERLAY_TEXT_PRIMARY_COLOR
    }
}

fn format_fps_line(current_fps: f32, cap: Option<u32>) -> String {
    match cap {
        Some(value) => format!("FPS: {current_fps:.0} / {value}"),
        None => format!("FPS: {current_fps:.0} / UNCAPPED"),
    }
}
