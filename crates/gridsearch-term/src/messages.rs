//! Input and timer events: [`Msg`], [`Key`], [`MouseAction`], [`ModMask`].

use gridsearch_core::Point;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    /// A printable character other than space.
    Char(char),
}

/// Modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Left button pressed.
    Main,
    /// Right button pressed.
    Secondary,
    /// Button released.
    Release,
    WheelUp,
    WheelDown,
}

/// An event delivered to the [`Model`](crate::Model).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Msg {
    /// Sent once before anything else.
    Init,
    KeyDown { key: Key, modifiers: ModMask },
    /// A mouse event at a canvas position.
    Mouse { action: MouseAction, pos: Point },
    /// The terminal was resized.
    Screen { rows: i32, cols: i32 },
    /// The model's tick interval elapsed.
    Tick,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// A key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
        }
    }

    /// A left click at `(row, col)`.
    pub fn click(row: i32, col: i32) -> Self {
        Self::Mouse {
            action: MouseAction::Main,
            pos: Point::new(row, col),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn msg_round_trip() {
        let msgs = vec![Msg::key(Key::Char('n')), Msg::click(1, 2), Msg::Tick];
        let json = serde_json::to_string(&msgs).unwrap();
        let back: Vec<Msg> = serde_json::from_str(&json).unwrap();
        assert_eq!(msgs, back);
    }
}
