//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use gridstar_core::Coord;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    /// A printable character other than space.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed or dragged.
    Main,
    /// Secondary (right) button pressed or dragged.
    Secondary,
    /// Button released.
    Release,
    /// Pointer moved with no button held.
    Move,
}

/// An input message delivered to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event at a screen position (`row` = terminal line,
    /// `col` = terminal column).
    Mouse { action: MouseAction, pos: Coord },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` message.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Convenience: a mouse message at terminal column `x`, line `y`.
    pub fn mouse(action: MouseAction, x: i32, y: i32) -> Self {
        Self::Mouse {
            action,
            pos: Coord::new(y, x),
        }
    }
}
