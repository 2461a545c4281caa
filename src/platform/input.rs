//! Raw input events delivered by the frontend

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove(Vec2),
    PointerDown { button: PointerButton, pos: Vec2 },
    KeyDown(Key),
    WindowClose,
}

impl InputEvent {
    /// Left-button press position, if this is one
    pub fn left_click(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown {
                button: PointerButton::Left,
                pos,
            } => Some(pos),
            _ => None,
        }
    }
}
