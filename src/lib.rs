// SPDX-License-Identifier: MPL-2.0
//! `flipbook` presents an illustrated story as a book whose pages turn.
//!
//! The page-index core lives in [`book`] and is independent of the GUI: it
//! tracks the current page, debounces which illustration is shown in high
//! detail, hints which illustrations to load and computes the paint order of
//! the leaves. [`app`] wires it to Iced, [`media`] loads and caches the
//! illustrations and [`story`] reads the page records.

#![doc(html_root_url = "https://docs.rs/flipbook/0.1.0")]

pub mod app;
pub mod book;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod story;
pub mod ui;
