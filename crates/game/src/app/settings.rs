use serde::{Deserialize, Serialize};

use super::config::{DEFAULT_NIGHT_LEVEL, DEFAULT_SPEED_INDEX, NIGHT_LEVELS, PLAYER_SPEEDS};

/// User-facing options, persisted alongside the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub speed_index: usize,
    pub fullscreen: bool,
    pub heat_haze: bool,
    pub night_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed_index: DEFAULT_SPEED_INDEX,
            fullscreen: false,
            heat_haze: true,
            night_level: DEFAULT_NIGHT_LEVEL,
        }
    }
}

impl Settings {
    pub(crate) fn cycle_speed(&mut self) {
        self.speed_index = (self.speed_index + 1) % PLAYER_SPEEDS.len();
    }

    pub(crate) fn cycle_night_level(&mut self) {
        self.night_level = (self.night_level + 1) % NIGHT_LEVELS.len();
    }

    pub(crate) fn night_strength(&self) -> f32 {
        NIGHT_LEVELS
            .get(self.night_level)
            .copied()
            .unwrap_or(NIGHT_LEVELS[DEFAULT_NIGHT_LEVEL])
    }

    /// Replaces out-of-range indices from hand-edited saves with defaults.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.speed_index >= PLAYER_SPEEDS.len() {
            self.speed_index = DEFAULT_SPEED_INDEX;
        }
        if self.night_level >= NIGHT_LEVELS.len() {
            self.night_level = DEFAULT_NIGHT_LEVEL;
        }
        self
    }

    pub(crate) fn speed_label(&self) -> String {
        format!("SPEED: {} PX/S", PLAYER_SPEEDS[self.sanitized().speed_index])
    }

    pub(crate) fn fullscreen_label(&self) -> String {
        format!("FULLSCREEN: {}", on_off(self.fullscreen))
    }

    pub(crate) fn heat_haze_label(&self) -> String {
        format!("HEAT HAZE: {}", on_off(self.heat_haze))
    }

    pub(crate) fn night_label(&self) -> String {
        format!(
            "NIGHT: LEVEL {}/{}",
            self.sanitized().night_level + 1,
            NIGHT_LEVELS.len()
        )
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_and_night_cycles_wrap() {
        let mut settings = Settings::default();
        for _ in 0..PLAYER_SPEEDS.len() {
            settings.cycle_speed();
        }
        assert_eq!(settings.speed_index, DEFAULT_SPEED_INDEX);

        settings.night_level = NIGHT_LEVELS.len() - 1;
        settings.cycle_night_level();
        assert_eq!(settings.night_level, 0);
        assert_eq!(settings.night_strength(), 0.45);
    }

    #[test]
    fn sanitized_repairs_bad_indices() {
        let settings = Settings {
            speed_index: 12,
            night_level: 9,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.speed_index, DEFAULT_SPEED_INDEX);
        assert_eq!(settings.night_level, DEFAULT_NIGHT_LEVEL);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"fullscreen": true}"#).expect("json");
        assert!(settings.fullscreen);
        assert_eq!(settings.speed_index, DEFAULT_SPEED_INDEX);
        assert!(settings.heat_haze);
    }

    #[test]
    fn labels_reflect_values() {
        let settings = Settings::default();
        assert_eq!(settings.speed_label(), "SPEED: 210 PX/S");
        assert_eq!(settings.night_label(), "NIGHT: LEVEL 2/3");
        assert_eq!(settings.heat_haze_label(), "HEAT HAZE: ON");
    }
}
