use crate::geometry::Point;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Delete,
    Backspace,
    Other,
}

/// Raw input as delivered by the host. Positions are in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        button: PointerButton,
    },
    /// Pointer left the window, the window lost focus, or the host aborted
    /// the gesture. Always returns the controller to idle.
    PointerCancel,
    DoubleClick {
        position: Point,
    },
    Wheel {
        position: Point,
        delta: Point,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        /// Focus is inside a text input; shortcuts must not fire.
        in_text_input: bool,
    },
}

impl InputEvent {
    pub fn primary_down(position: Point) -> Self {
        InputEvent::PointerDown {
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn primary_down_with(position: Point, modifiers: Modifiers) -> Self {
        InputEvent::PointerDown {
            position,
            button: PointerButton::Primary,
            modifiers,
        }
    }

    pub fn primary_up(position: Point) -> Self {
        InputEvent::PointerUp {
            position,
            button: PointerButton::Primary,
        }
    }

    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
            in_text_input: false,
        }
    }
}
