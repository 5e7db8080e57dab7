#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    Back,
    SwitchBiome,
    QuickSave,
    QuickLoad,
    ToggleOverlay,
}

const ACTION_COUNT: usize = 10;

/// Held state plus press edges for every action. Edges are raised on the
/// first `Pressed` after a release and cleared when a tick snapshot is taken.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        let index = action.index();
        if is_down && !self.down[index] {
            self.pressed[index] = true;
        }
        self.down[index] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed[action.index()]
    }

    pub(crate) fn mark_pressed(&mut self, action: InputAction) {
        self.pressed[action.index()] = true;
    }

    pub(crate) fn take_pressed(&mut self, action: InputAction) -> bool {
        std::mem::take(&mut self.pressed[action.index()])
    }

    pub(crate) fn clear_pressed(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Confirm => 4,
            InputAction::Back => 5,
            InputAction::SwitchBiome => 6,
            InputAction::QuickSave => 7,
            InputAction::QuickLoad => 8,
            InputAction::ToggleOverlay => 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_is_raised_once_per_physical_press() {
        let mut states = ActionStates::default();
        states.set(InputAction::Confirm, true);
        states.set(InputAction::Confirm, true);

        assert!(states.take_pressed(InputAction::Confirm));
        assert!(!states.take_pressed(InputAction::Confirm));
        assert!(states.is_down(InputAction::Confirm));

        states.set(InputAction::Confirm, false);
        states.set(InputAction::Confirm, true);
        assert!(states.was_pressed(InputAction::Confirm));
    }

    #[test]
    fn clear_pressed_keeps_held_state() {
        let mut states = ActionStates::default();
        states.set(InputAction::MoveLeft, true);
        states.clear_pressed();

        assert!(states.is_down(InputAction::MoveLeft));
        assert!(!states.was_pressed(InputAction::MoveLeft));
    }
}
