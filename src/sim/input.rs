use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Pointer buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 0x01;
        const MIDDLE = 0x02;
        const RIGHT  = 0x04;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl From<MouseButton> for MouseButtons {
    fn from(b: MouseButton) -> Self {
        match b {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Right => MouseButtons::RIGHT,
        }
    }
}

/// Keys the viewer reacts to; anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    P,
    Q,
    Shift,
    Other,
}

/// One discrete input event, already demultiplexed by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    MouseButton {
        button: MouseButton,
        pressed: bool,
        pos: Vec2,
    },
    MouseMotion {
        pos: Vec2,
        buttons: MouseButtons,
    },
    Keyboard {
        key: Key,
        pressed: bool,
    },
}

/// Polled input, read once per update tick.
pub trait InputState {
    fn is_key_down(&self, key: Key) -> bool;

    /// Pointer position in canvas units and the buttons held.
    fn mouse_state(&self) -> (Vec2, MouseButtons);
}
