// SPDX-License-Identifier: MPL-2.0
//! Keyboard bindings for the book.

use super::controller::Message;
use iced::keyboard::{self, key::Named};

/// Maps a pressed key to a navigation request.
///
/// Arrow keys turn one page; Home and End jump to either cover. Any other
/// key is left for the rest of the application.
#[must_use]
pub fn navigation_for_key(key: &keyboard::Key) -> Option<Message> {
    match key {
        keyboard::Key::Named(Named::ArrowRight) => Some(Message::Next),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Message::Previous),
        keyboard::Key::Named(Named::Home) => Some(Message::First),
        keyboard::Key::Named(Named::End) => Some(Message::Last),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_turn_pages() {
        assert_eq!(
            navigation_for_key(&keyboard::Key::Named(Named::ArrowRight)),
            Some(Message::Next)
        );
        assert_eq!(
            navigation_for_key(&keyboard::Key::Named(Named::ArrowLeft)),
            Some(Message::Previous)
        );
    }

    #[test]
    fn home_and_end_jump() {
        assert_eq!(
            navigation_for_key(&keyboard::Key::Named(Named::Home)),
            Some(Message::First)
        );
        assert_eq!(
            navigation_for_key(&keyboard::Key::Named(Named::End)),
            Some(Message::Last)
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(
            navigation_for_key(&keyboard::Key::Named(Named::ArrowUp)),
            None
        );
        assert_eq!(
            navigation_for_key(&keyboard::Key::Character("n".into())),
            None
        );
    }
}
