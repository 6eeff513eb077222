// SPDX-License-Identifier: MPL-2.0
//! Flip-book core: page index control, delayed illustration swap, load
//! hints, leaf animation and the per-frame layout.
//!
//! Nothing in here draws; [`crate::ui::book_view`] renders a
//! [`layout::BookLayout`] and the application forwards input and timer
//! completions to the [`controller::Controller`].

pub mod animation;
pub mod controller;
pub mod image_window;
pub mod input;
pub mod layout;
pub mod settle;

pub use controller::{Controller, Effect, Message, ViewState};
pub use image_window::{ImageHints, ImageWindow, Loading};
pub use layout::BookLayout;
pub use settle::{SettleDelay, Ticket};
