// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard navigation and window close requests are always routed; animation
//! frames are only requested while a leaf is turning.

use super::Message;
use crate::book::input;
use iced::keyboard::{self, key::Named};
use iced::{event, window, Subscription};

/// Routes native events to application messages.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| {
        if let event::Event::Window(window::Event::CloseRequested) = &event {
            return Some(Message::WindowCloseRequested(window_id));
        }

        // Keys already consumed by a widget are not navigation.
        if status == event::Status::Captured {
            return None;
        }

        let event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = &event else {
            return None;
        };

        if *key == keyboard::Key::Named(Named::F5) {
            return Some(Message::ReloadStory);
        }
        input::navigation_for_key(key).map(Message::Navigate)
    })
}

/// Redraw on every frame while a flip animation runs.
pub fn create_frame_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        window::frames().map(Message::Frame)
    } else {
        Subscription::none()
    }
}
