// SPDX-License-Identifier: MPL-2.0
//! User interface components and styling.
//!
//! - [`book_view`] - The open book: resting stacks, turning leaves and click zones
//! - [`styles`] - Centralized container styles (paper, spine, desk)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod book_view;
pub mod design_tokens;
pub mod styles;
pub mod theming;
