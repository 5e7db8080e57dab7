use engine::{draw_text, line_advance_px, text_width_px, Canvas, InputAction, InputSnapshot};

const TITLE_SCALE: i32 = 4;
const OPTION_SCALE: i32 = 3;
const OPTION_SPACING: i32 = 32;
const BACKDROP_COLOR: [u8; 4] = [0, 0, 0, 140];
const TITLE_COLOR: [u8; 4] = [240, 230, 210, 255];
const SELECTED_COLOR: [u8; 4] = [255, 255, 255, 255];
const OPTION_COLOR: [u8; 4] = [180, 170, 150, 255];

/// Vertical option list driven by up/down press edges and confirmed with
/// Enter or Space.
#[derive(Debug, Clone)]
pub(crate) struct Menu<T> {
    title: String,
    entries: Vec<(T, String)>,
    selected: usize,
}

impl<T: Copy + PartialEq> Menu<T> {
    pub(crate) fn new(title: impl Into<String>, entries: Vec<(T, String)>) -> Self {
        Self {
            title: title.into(),
            entries,
            selected: 0,
        }
    }

    pub(crate) fn selected(&self) -> Option<T> {
        self.entries.get(self.selected).map(|(choice, _)| *choice)
    }

    /// Keeps the current selection when labels change, e.g. after a setting
    /// is toggled.
    pub(crate) fn set_entries(&mut self, entries: Vec<(T, String)>) {
        self.entries = entries;
        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    pub(crate) fn reset_selection(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn handle_input(&mut self, input: &InputSnapshot) -> Option<T> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        if input.pressed(InputAction::MoveDown) {
            self.selected = (self.selected + 1) % len;
        }
        if input.pressed(InputAction::MoveUp) {
            self.selected = (self.selected + len - 1) % len;
        }
        if input.pressed(InputAction::Confirm) {
            return self.selected();
        }
        None
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>) {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;
        canvas.blend_rect(0, 0, width, height, BACKDROP_COLOR);

        let title_x = (width - text_width_px(&self.title, TITLE_SCALE)) / 2;
        draw_text(
            canvas,
            title_x,
            height / 4,
            &self.title,
            TITLE_COLOR,
            TITLE_SCALE,
        );

        let option_top = height / 2;
        for (index, (_, label)) in self.entries.iter().enumerate() {
            let is_selected = index == self.selected;
            let text = if is_selected {
                format!("> {label} <")
            } else {
                label.clone()
            };
            let color = if is_selected {
                SELECTED_COLOR
            } else {
                OPTION_COLOR
            };
            let x = (width - text_width_px(&text, OPTION_SCALE)) / 2;
            let y = option_top + index as i32 * OPTION_SPACING.max(line_advance_px(OPTION_SCALE));
            draw_text(canvas, x, y, &text, color, OPTION_SCALE);
        }
    }
}
