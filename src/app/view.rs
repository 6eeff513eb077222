// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::book::animation::FlipAnimator;
use crate::book::{BookLayout, Controller, ImageWindow};
use crate::i18n::I18n;
use crate::media::ImageCache;
use crate::ui::book_view;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles::container as styles;
use crate::ui::theming::AppTheme;
use iced::alignment::Horizontal;
use iced::widget::{Column, Container, Text};
use iced::{Element, Length};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub theme: &'a AppTheme,
    pub controller: &'a Controller,
    pub animator: &'a FlipAnimator,
    pub image_window: &'a ImageWindow,
    pub images: &'a ImageCache,
    pub notice: Option<&'a str>,
    pub now: Instant,
}

/// Renders the book with an optional notice line underneath.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let colors = ctx.theme.colors.clone();

    let layout = BookLayout::compute(
        ctx.controller.deck(),
        ctx.controller.view_state(),
        ctx.image_window,
        ctx.animator,
        ctx.now,
    );

    let book = book_view::view(
        book_view::ViewContext {
            i18n: ctx.i18n,
            colors: colors.clone(),
            images: ctx.images,
        },
        book_view::ViewModel { layout },
    )
    .map(Message::Book);

    let mut column = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(Container::new(book).width(Length::Fill).height(Length::Fill));

    let footer = match ctx.notice {
        Some(notice) => Some(
            Text::new(notice)
                .size(typography::BODY)
                .color(colors.error),
        ),
        None if ctx.controller.total() > 1 => Some(
            Text::new(ctx.i18n.tr("keyboard-hint"))
                .size(typography::CAPTION)
                .color(colors.chrome_text),
        ),
        None => None,
    };

    if let Some(footer) = footer {
        column = column.push(
            Container::new(footer)
                .width(Length::Fill)
                .padding(spacing::XS)
                .align_x(Horizontal::Center),
        );
    }

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::desk(colors.desk))
        .into()
}
