// SPDX-License-Identifier: MPL-2.0
//! Draws a [`BookLayout`]: page edges, the exposed left page, the leaves in
//! paint order, the spine and two click zones.
//!
//! Leaves are drawn as flat panels whose width follows the cosine of their
//! rotation. A leaf showing its front grows rightward from the spine; once
//! past the vertical it shows its back and grows leftward.

use crate::book::layout::{
    BookLayout, Face, ImageSlot, Leaf, PAGE_EDGE_OFFSETS, SPINE_LINE_WIDTH, SPINE_SHADOW_WIDTH,
};
use crate::i18n::I18n;
use crate::media::ImageCache;
use crate::ui::design_tokens::{shadow, sizing, spacing, typography};
use crate::ui::styles::container as styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::{image, mouse_area, responsive, Column, Container, Row, Space, Stack, Text};
use iced::{ContentFit, Element, Length, Size};

/// Clicks on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    PreviousClicked,
    NextClicked,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: ColorScheme,
    pub images: &'a ImageCache,
}

pub struct ViewModel<'a> {
    pub layout: BookLayout<'a>,
}

pub fn view<'a>(ctx: ViewContext<'a>, model: ViewModel<'a>) -> Element<'a, Message> {
    responsive(move |available: Size| view_inner(&ctx, &model, available)).into()
}

/// Largest book that fits `available`, or `None` when there is no room.
#[must_use]
pub fn book_size(available: Size) -> Option<Size> {
    let edge = PAGE_EDGE_OFFSETS[PAGE_EDGE_OFFSETS.len() - 1];
    let max_width = (available.width - 2.0 * (edge + sizing::BOOK_MARGIN))
        .min(sizing::BOOK_MAX_WIDTH);
    let max_height = available.height - 2.0 * sizing::BOOK_MARGIN;

    let width = max_width.min(max_height * sizing::BOOK_ASPECT);
    if !width.is_finite() || width < sizing::BOOK_MIN_WIDTH {
        return None;
    }
    Some(Size::new(width, width / sizing::BOOK_ASPECT))
}

/// Horizontal offset from the book's left edge and width of a leaf at `angle_deg`.
#[must_use]
pub fn leaf_span(angle_deg: f32, half: f32) -> (f32, f32) {
    let width = half * angle_deg.to_radians().cos().abs();
    if angle_deg > -90.0 {
        (half, width)
    } else {
        (half - width, width)
    }
}

fn view_inner<'a>(
    ctx: &ViewContext<'a>,
    model: &ViewModel<'a>,
    available: Size,
) -> Element<'a, Message> {
    let layout = &model.layout;
    let colors = &ctx.colors;

    let content: Element<'a, Message> = if layout.is_empty() {
        Text::new(ctx.i18n.tr("empty-deck"))
            .size(typography::BODY)
            .color(colors.chrome_text)
            .into()
    } else if let Some(size) = book_size(available) {
        book(ctx, layout, size)
    } else {
        Space::new().into()
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(styles::desk(colors.desk))
        .into()
}

fn book<'a>(ctx: &ViewContext<'a>, layout: &BookLayout<'a>, size: Size) -> Element<'a, Message> {
    let colors = &ctx.colors;
    let edge = PAGE_EDGE_OFFSETS[PAGE_EDGE_OFFSETS.len() - 1];
    let half = size.width / 2.0;

    let mut stack = Stack::new()
        .width(Length::Fixed(size.width + 2.0 * edge))
        .height(Length::Fixed(size.height));

    // Outermost edge first so nearer edges cover it.
    for offset in PAGE_EDGE_OFFSETS.iter().rev() {
        let edge_box = || {
            Container::new(Space::new())
                .width(Length::Fixed(half + offset))
                .height(Length::Fill)
                .style(styles::page_edge(colors.page_edge))
        };
        stack = stack.push(
            Row::new()
                .height(Length::Fill)
                .push(Space::new().width(Length::Fixed(edge - offset)))
                .push(edge_box())
                .push(edge_box()),
        );
    }

    stack = stack.push(positioned(
        edge,
        size.width,
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::book_base(colors.paper)),
    ));

    stack = stack.push(positioned(
        edge,
        half,
        face_panel(illustration(ctx, &layout.left.image), colors, shadow::NONE),
    ));

    for leaf in &layout.leaves {
        stack = stack.push(leaf_view(ctx, leaf, edge, half));
    }

    stack = stack.push(positioned(
        edge + half - SPINE_SHADOW_WIDTH,
        2.0 * SPINE_SHADOW_WIDTH,
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::spine_shade),
    ));
    stack = stack.push(positioned(
        edge + half - SPINE_LINE_WIDTH / 2.0,
        SPINE_LINE_WIDTH,
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::spine_line(colors.spine)),
    ));

    stack = stack.push(
        Row::new()
            .height(Length::Fill)
            .push(Space::new().width(Length::Fixed(edge)))
            .push(click_zone(half, Message::PreviousClicked))
            .push(click_zone(half, Message::NextClicked)),
    );

    stack.into()
}

/// Places `content` in a full-height column starting `x` from the stack's left edge.
fn positioned<'a>(
    x: f32,
    width: f32,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    Row::new()
        .height(Length::Fill)
        .push(Space::new().width(Length::Fixed(x.max(0.0))))
        .push(
            Container::new(content)
                .width(Length::Fixed(width.max(0.0)))
                .height(Length::Fill)
                .clip(true),
        )
        .into()
}

fn click_zone<'a>(width: f32, message: Message) -> Element<'a, Message> {
    mouse_area(
        Space::new()
            .width(Length::Fixed(width))
            .height(Length::Fill),
    )
    .on_press(message)
    .interaction(mouse::Interaction::Pointer)
    .into()
}

fn leaf_view<'a>(
    ctx: &ViewContext<'a>,
    leaf: &Leaf<'a>,
    edge: f32,
    half: f32,
) -> Element<'a, Message> {
    let colors = &ctx.colors;
    let (x, width) = leaf_span(leaf.angle_deg, half);

    let page_shadow = if leaf.in_flight {
        shadow::TURNING_PAGE
    } else if leaf.casts_shadow() {
        shadow::ACTIVE_PAGE
    } else {
        shadow::NONE
    };

    let panel = match leaf.face() {
        Face::Front => face_panel(front_content(leaf, colors, half), colors, page_shadow),
        Face::Back => face_panel(illustration(ctx, &leaf.back_image), colors, page_shadow),
    };

    positioned(edge + x, width, panel)
}

fn face_panel<'a>(
    content: Element<'a, Message>,
    colors: &ColorScheme,
    page_shadow: iced::Shadow,
) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .style(styles::page(colors.paper, colors.ink, page_shadow))
        .into()
}

fn front_content<'a>(leaf: &Leaf<'a>, colors: &ColorScheme, half: f32) -> Element<'a, Message> {
    // Text is laid out at full page width and clipped while the leaf narrows.
    let inner = (half - 2.0 * spacing::LG).max(0.0);

    Column::new()
        .width(Length::Fixed(inner))
        .height(Length::Fill)
        .spacing(spacing::MD)
        .push(
            Container::new(Text::new(leaf.page.content.as_str()).size(typography::PAGE_BODY))
                .height(Length::Fill),
        )
        .push(
            Container::new(
                Text::new(leaf.page.page_number.to_string())
                    .size(typography::CAPTION)
                    .color(colors.ink_muted),
            )
            .width(Length::Fill)
            .align_x(Horizontal::Center),
        )
        .into()
}

fn illustration<'a>(ctx: &ViewContext<'a>, slot: &ImageSlot<'a>) -> Element<'a, Message> {
    let colors = &ctx.colors;

    let (label, url) = match slot {
        ImageSlot::Image { url, alt_page, .. } => (
            ctx.i18n
                .tr_with_args("page-image-alt", &[("page", i64::from(*alt_page))]),
            Some(*url),
        ),
        ImageSlot::Placeholder => (ctx.i18n.tr("no-image"), None),
    };

    if let Some(data) = url.and_then(|url| ctx.images.peek(url)) {
        return image(data.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into();
    }

    Container::new(
        Text::new(label)
            .size(typography::CAPTION)
            .color(colors.ink_muted),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(Horizontal::Center)
    .align_y(Vertical::Center)
    .style(styles::placeholder(colors.placeholder, colors.ink_muted))
    .into()
}
