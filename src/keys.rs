// src/keys.rs

//! Key identity and the event delivered to the focused keyboard target.

use crate::geometry::Location;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held while a key was pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2; // Option on macOS
        const SUPER = 1 << 3; // Command / Windows key
    }
}

/// The key that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeySymbol {
    Char(char),

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,

    Enter,
    Backspace,
    Tab,
    Escape,

    #[default]
    Unknown,
}

impl KeySymbol {
    /// The printable character for this key, if it has one.
    pub fn as_char(&self) -> Option<char> {
        match self {
            KeySymbol::Char(c) => Some(*c),
            KeySymbol::Enter => Some('\n'),
            KeySymbol::Tab => Some('\t'),
            _ => None,
        }
    }

    /// Returns true for keys that move a cursor.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeySymbol::Left
                | KeySymbol::Right
                | KeySymbol::Up
                | KeySymbol::Down
                | KeySymbol::PageUp
                | KeySymbol::PageDown
                | KeySymbol::Home
                | KeySymbol::End
        )
    }
}

/// A key press routed to the component holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Grid location of the most recent pointer click before the key was
    /// pressed, or the origin if there has been none. This is not a text
    /// cursor: a focused component that tracks its own caret keeps it itself.
    pub location: Location,
    pub symbol: KeySymbol,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(location: Location, symbol: KeySymbol, modifiers: Modifiers) -> Self {
        Self {
            location,
            symbol,
            modifiers,
        }
    }

    /// A bare character press at the origin.
    pub fn char(c: char) -> Self {
        Self::new(Location::ORIGIN, KeySymbol::Char(c), Modifiers::empty())
    }

    pub fn has_modifier(&self, modifier: Modifiers) -> bool {
        self.modifiers.contains(modifier)
    }
}
