//! Gameplay constants. Window and loop tuning lives in `engine::LoopConfig`.

use engine::Vec2;

pub(crate) const WINDOW_TITLE: &str = "Desert Portals";
pub(crate) const SCREEN_WIDTH: u32 = 960;
pub(crate) const SCREEN_HEIGHT: u32 = 540;

pub(crate) const WORLD_WIDTH: u32 = 2400;
pub(crate) const WORLD_HEIGHT: u32 = 1800;
pub(crate) const BG_TILE: u32 = 32;

pub(crate) const PLAYER_SPEEDS: [f32; 4] = [150.0, 210.0, 270.0, 330.0];
pub(crate) const DEFAULT_SPEED_INDEX: usize = 1;
pub(crate) const PLAYER_SIZE: f32 = 20.0;
pub(crate) const PLAYER_COLOR: [u8; 4] = [40, 110, 180, 255];

pub(crate) const PORTAL_RADIUS: f32 = 24.0;
pub(crate) const PORTAL_MIN_R: u32 = 120;
pub(crate) const PORTAL_MAX_R: u32 = 360;
pub(crate) const PORTAL_BASE_COLOR: [u8; 3] = [120, 90, 210];
pub(crate) const PORTAL_EDGE_COLOR: [u8; 4] = [230, 220, 255, 255];
pub(crate) const PORTAL_PULSE_RATE: f32 = 5.0;

pub(crate) const PICKUP_RADIUS: f32 = 12.0;
pub(crate) const PICKUP_SIZE: f32 = 12.0;
pub(crate) const PICKUP_MIN_DIST_FROM_SPAWN: f32 = 160.0;

pub(crate) const HUD_BAR_HEIGHT: i32 = 60;
pub(crate) const HUD_BG_COLOR: [u8; 4] = [20, 20, 20, 170];
pub(crate) const HUD_TEXT_COLOR: [u8; 4] = [250, 240, 220, 255];

pub(crate) const HEAT_HAZE_AMPLITUDE: f32 = 3.0;
pub(crate) const HEAT_HAZE_WAVELENGTH: f32 = 120.0;
pub(crate) const HEAT_HAZE_SPEED: f32 = 0.6;

pub(crate) const DAY_LENGTH_SECONDS: f32 = 180.0;
pub(crate) const NIGHT_LEVELS: [f32; 3] = [0.45, 0.65, 0.85];
pub(crate) const DEFAULT_NIGHT_LEVEL: usize = 1;
pub(crate) const BASE_LIGHT_RADIUS: f32 = 90.0;
pub(crate) const LAMP_LIGHT_BONUS: f32 = 50.0;
pub(crate) const TORCH_LIGHT_BONUS: f32 = 8.0;
pub(crate) const MAX_TORCHES_FOR_LIGHT: u32 = 5;

pub(crate) const SAVE_FILE: &str = "save.json";
pub(crate) const SEED_ENV_VAR: &str = "DESERT_PORTALS_SEED";

pub(crate) fn player_spawn() -> Vec2 {
    Vec2::new((WORLD_WIDTH / 2) as f32, (WORLD_HEIGHT / 2) as f32)
}
