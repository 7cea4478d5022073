//! Navigation keys and their conversions from host key events.

use std::str::FromStr;

use crate::error::ControlError;

/// Keys understood by navigable controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Escape,
}

impl NavKey {
    /// Whether the key activates the current item.
    pub fn is_activation(self) -> bool {
        matches!(self, NavKey::Enter | NavKey::Space)
    }
}

/// Parses DOM-style key names (`"ArrowDown"`, `"Enter"`, `" "`, ...).
impl FromStr for NavKey {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" | "Up" => Ok(NavKey::ArrowUp),
            "ArrowDown" | "Down" => Ok(NavKey::ArrowDown),
            "Enter" => Ok(NavKey::Enter),
            " " | "Space" | "Spacebar" => Ok(NavKey::Space),
            "Escape" | "Esc" => Ok(NavKey::Escape),
            other => Err(ControlError::UnknownKey(other.to_string())),
        }
    }
}

// Conversion from crossterm types
impl TryFrom<crossterm::event::KeyCode> for NavKey {
    type Error = ControlError;

    fn try_from(code: crossterm::event::KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Up => Ok(NavKey::ArrowUp),
            KeyCode::Down => Ok(NavKey::ArrowDown),
            KeyCode::Enter => Ok(NavKey::Enter),
            KeyCode::Char(' ') => Ok(NavKey::Space),
            KeyCode::Esc => Ok(NavKey::Escape),
            other => Err(ControlError::UnknownKey(format!("{other:?}"))),
        }
    }
}

/// Result of handing an event to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; the host should not process it further
    Consumed,
    /// Event was not handled
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_parse_dom_names() {
        assert_eq!("ArrowUp".parse::<NavKey>(), Ok(NavKey::ArrowUp));
        assert_eq!(" ".parse::<NavKey>(), Ok(NavKey::Space));
        assert_eq!(
            "Tab".parse::<NavKey>(),
            Err(ControlError::UnknownKey("Tab".to_string()))
        );
    }

    #[test]
    fn test_from_crossterm() {
        assert_eq!(NavKey::try_from(KeyCode::Esc), Ok(NavKey::Escape));
        assert_eq!(NavKey::try_from(KeyCode::Char(' ')), Ok(NavKey::Space));
        assert!(NavKey::try_from(KeyCode::Tab).is_err());
    }
}
