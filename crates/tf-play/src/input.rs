#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    A,
    D,
    W,
    S,
    Escape,
    Other,
}

/// Host input, already translated out of the windowing library.
///
/// Mouse positions are window coordinates with the origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { x: i32, y: i32 },
    MouseWheel { dy: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Button {
    /// Presses since the last `update`.
    pub downs: u8,
    pub pressed: bool,
}

impl Button {
    fn press(&mut self) {
        self.downs = self.downs.saturating_add(1);
        self.pressed = true;
    }

    fn release(&mut self) {
        self.pressed = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
}

impl InputState {
    fn button_mut(&mut self, key: Key) -> Option<&mut Button> {
        match key {
            Key::A => Some(&mut self.left),
            Key::D => Some(&mut self.right),
            Key::W => Some(&mut self.up),
            Key::S => Some(&mut self.down),
            Key::Escape | Key::Other => None,
        }
    }

    /// Returns whether `key` is a tracked button.
    pub fn key_down(&mut self, key: Key) -> bool {
        match self.button_mut(key) {
            Some(button) => {
                button.press();
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        match self.button_mut(key) {
            Some(button) => {
                button.release();
                true
            }
            None => false,
        }
    }

    pub fn clear_downs(&mut self) {
        for button in [
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.down,
        ] {
            button.downs = 0;
        }
    }
}
