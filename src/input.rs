/// Held-key state consumed by the core.
///
/// The frame driver translates raw terminal events into this record
/// before each tick; the core itself never subscribes to events.  Only
/// the two vertical movement keys are tracked as held state — fire and
/// debug-toggle are edge-triggered calls routed straight to the
/// session.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    MoveUp,
    MoveDown,
}

/// Set of currently held movement keys.  Adding an already-held key is
/// a no-op, so repeated key-down events from the terminal cannot
/// duplicate state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    up: bool,
    down: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::MoveUp => self.up = true,
            Key::MoveDown => self.down = true,
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::MoveUp => self.up = false,
            Key::MoveDown => self.down = false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::MoveUp => self.up,
            Key::MoveDown => self.down,
        }
    }

    pub fn clear(&mut self) {
        *self = InputState::default();
    }
}
