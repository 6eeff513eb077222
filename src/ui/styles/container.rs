// SPDX-License-Identifier: MPL-2.0
//! Container styles for the book surface.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::gradient::Linear;
use iced::widget::container;
use iced::{Background, Border, Color, Degrees, Gradient, Shadow, Theme};

/// Window background around the book.
pub fn desk(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    }
}

/// The book's base under both halves, carrying the drop shadow.
pub fn book_base(paper: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(paper)),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::BOOK,
        ..Default::default()
    }
}

/// A page face: paper, ink and an optional shadow.
pub fn page(paper: Color, ink: Color, page_shadow: Shadow) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(paper)),
        text_color: Some(ink),
        shadow: page_shadow,
        ..Default::default()
    }
}

/// One of the stacked edges peeking out behind a half.
pub fn page_edge(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::BLACK
            },
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

/// Shading that darkens toward the spine on both sides.
pub fn spine_shade(_theme: &Theme) -> container::Style {
    let shade = Color {
        a: opacity::SPINE_SHADE,
        ..palette::BLACK
    };
    let clear = Color {
        a: opacity::TRANSPARENT,
        ..palette::BLACK
    };
    let gradient = Linear::new(Degrees(90.0))
        .add_stop(0.0, clear)
        .add_stop(0.5, shade)
        .add_stop(1.0, clear);

    container::Style {
        background: Some(Background::Gradient(Gradient::Linear(gradient))),
        ..Default::default()
    }
}

/// The spine line itself.
pub fn spine_line(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    }
}

/// Panel shown where an illustration is missing or still loading.
pub fn placeholder(veil: Color, text: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(veil)),
        text_color: Some(text),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
