//! Input events coming from the interaction surface.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::ItemId;

/// What the user clicked, resolved to the item it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Increment(ItemId),
    Decrement(ItemId),
    Add(ItemId),
    Delete(ItemId),
    Checkout,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Command `{0}` needs an item id")]
    MissingId(String),
    #[error("Invalid item id: {0}")]
    InvalidId(String),
}

impl FromStr for UiEvent {
    type Err = InputError;

    /// Parses commands such as `+ 1`, `- 1`, `add 1`, `delete 1` and `checkout`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(InputError::Empty)?;

        let constructor: fn(ItemId) -> UiEvent = match command {
            "checkout" => return Ok(UiEvent::Checkout),
            "+" | "inc" => UiEvent::Increment,
            "-" | "dec" => UiEvent::Decrement,
            "add" => UiEvent::Add,
            "delete" | "del" => UiEvent::Delete,
            other => return Err(InputError::UnknownCommand(other.to_string())),
        };

        let raw = words
            .next()
            .ok_or_else(|| InputError::MissingId(command.to_string()))?;
        let id = raw
            .parse::<ItemId>()
            .map_err(|_| InputError::InvalidId(raw.to_string()))?;
        Ok(constructor(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_commands() {
        assert_eq!("+ 1".parse(), Ok(UiEvent::Increment(1)));
        assert_eq!("dec 2".parse(), Ok(UiEvent::Decrement(2)));
        assert_eq!("  add   3 ".parse(), Ok(UiEvent::Add(3)));
        assert_eq!("delete 4".parse(), Ok(UiEvent::Delete(4)));
        assert_eq!("checkout".parse(), Ok(UiEvent::Checkout));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_eq!("".parse::<UiEvent>(), Err(InputError::Empty));
        assert_eq!("buy 1".parse::<UiEvent>(), Err(InputError::UnknownCommand("buy".into())));
        assert_eq!("add".parse::<UiEvent>(), Err(InputError::MissingId("add".into())));
        assert_eq!("add one".parse::<UiEvent>(), Err(InputError::InvalidId("one".into())));
        assert_eq!("+ -1".parse::<UiEvent>(), Err(InputError::InvalidId("-1".into())));
    }
}
