use engine::{draw_text, text_width_px, Canvas, Vec2};

use super::config::{HUD_BAR_HEIGHT, HUD_BG_COLOR, HUD_TEXT_COLOR};
use super::player::{Inventory, Player};
use super::worldgen::Biome;

const TEXT_SCALE: i32 = 2;
const HINT_TEXT: &str = "ARROWS/WASD: MOVE  TAB: BIOME  F5/F9: SAVE/LOAD  ESC: PAUSE";
const COMPASS_RADIUS: i32 = 26;
const COMPASS_RIGHT_INSET: i32 = 70;
const COMPASS_CENTER_Y: i32 = 40;
const COMPASS_FILL: [u8; 4] = [80, 70, 60, 255];
const COMPASS_RIM: [u8; 4] = [240, 220, 200, 255];
const COMPASS_LABEL: [u8; 4] = [200, 200, 190, 255];
const NEEDLE_COLOR: [u8; 4] = [255, 150, 90, 255];
const NEEDLE_BLINK_COLOR: [u8; 4] = [230, 80, 50, 255];
const BLINK_DISTANCE: f32 = 40.0;
const BLINK_PERIOD_MS: u64 = 400;

pub(crate) struct HudView<'a> {
    pub player: &'a Player,
    pub true_portal: Option<Vec2>,
    pub biome: Biome,
    pub night_factor: f32,
    pub time_seconds: f32,
}

pub(crate) fn draw_hud(canvas: &mut Canvas<'_>, view: &HudView<'_>) {
    let width = canvas.width() as i32;
    canvas.blend_rect(0, 0, width, HUD_BAR_HEIGHT, HUD_BG_COLOR);
    draw_text(canvas, 10, 10, HINT_TEXT, HUD_TEXT_COLOR, TEXT_SCALE);
    draw_text(
        canvas,
        10,
        34,
        &status_line(&view.player.inventory, view.biome, view.night_factor),
        HUD_TEXT_COLOR,
        TEXT_SCALE,
    );
    draw_compass(canvas, view, width);
}

pub(crate) fn inventory_line(inventory: &Inventory) -> String {
    format!(
        "WATER: {}  TORCH: {}  LAMP: {}",
        inventory.water,
        inventory.torch,
        if inventory.lamp { "YES" } else { "NO" }
    )
}

fn status_line(inventory: &Inventory, biome: Biome, night_factor: f32) -> String {
    let phase = if night_factor >= 0.5 { "NIGHT" } else { "DAY" };
    format!(
        "{}  |  {} - {}",
        inventory_line(inventory),
        biome.as_str(),
        phase
    )
}

/// Needle tip for a compass of `radius` pointing along `direction`.
pub(crate) fn compass_tip(center: Vec2, radius: f32, direction: Vec2) -> Vec2 {
    center + direction.normalized_or_zero() * (radius * 0.9)
}

pub(crate) fn compass_blinks(distance: f32, time_seconds: f32) -> bool {
    let millis = (time_seconds.max(0.0) * 1000.0) as u64;
    distance < BLINK_DISTANCE && (millis / BLINK_PERIOD_MS) % 2 == 0
}

fn draw_compass(canvas: &mut Canvas<'_>, view: &HudView<'_>, screen_width: i32) {
    let center = Vec2::new(
        (screen_width - COMPASS_RIGHT_INSET) as f32,
        COMPASS_CENTER_Y as f32,
    );
    let (cx, cy) = (center.x as i32, center.y as i32);
    canvas.fill_circle(cx, cy, COMPASS_RADIUS, COMPASS_FILL);
    canvas.draw_ring(cx, cy, COMPASS_RADIUS, 2, COMPASS_RIM);

    if let Some(portal) = view.true_portal {
        let direction = portal - view.player.pos;
        let tip = compass_tip(center, COMPASS_RADIUS as f32, direction);
        let color = if compass_blinks(direction.length(), view.time_seconds) {
            NEEDLE_BLINK_COLOR
        } else {
            NEEDLE_COLOR
        };
        let (tx, ty) = (tip.x.round() as i32, tip.y.round() as i32);
        for offset in -1..=1 {
            canvas.draw_line(cx + offset, cy, tx + offset, ty, color);
        }
        canvas.fill_circle(tx, ty, 3, color);
    }

    let label = "N";
    let label_x = cx - text_width_px(label, TEXT_SCALE) / 2;
    draw_text(
        canvas,
        label_x,
        cy - COMPASS_RADIUS - 12,
        label,
        COMPASS_LABEL,
        TEXT_SCALE,
    );
}
