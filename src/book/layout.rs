// SPDX-License-Identifier: MPL-2.0
//! Pure description of what the book shows for one frame.
//!
//! [`BookLayout::compute`] turns the deck, the index state and the running
//! flip motions into two half-width regions: the exposed left page showing
//! the settled illustration, and the right-hand stack of leaves. The iced
//! view only draws what this module decides.

use super::animation::FlipAnimator;
use super::controller::{page_visual, PageVisual, ViewState};
use super::image_window::{ImageHints, ImageWindow};
use crate::story::{Deck, PageRecord};
use std::time::Instant;

/// Offsets of the decorative page edges behind each half, outermost last.
pub const PAGE_EDGE_OFFSETS: [f32; 3] = [10.0, 20.0, 30.0];

/// Width of the shading on each side of the spine.
pub const SPINE_SHADOW_WIDTH: f32 = 12.0;

/// Width of the spine line.
pub const SPINE_LINE_WIDTH: f32 = 1.0;

/// An illustration slot: either an image to fetch and draw or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot<'a> {
    Image {
        url: &'a str,
        /// Page number used in the alternative text ("Page {n} image").
        alt_page: u32,
        hints: ImageHints,
    },
    Placeholder,
}

impl<'a> ImageSlot<'a> {
    fn for_page(page: Option<&'a PageRecord>, alt_page: u32, hints: ImageHints) -> Self {
        match page.and_then(PageRecord::image) {
            Some(url) => ImageSlot::Image {
                url,
                alt_page,
                hints,
            },
            None => ImageSlot::Placeholder,
        }
    }

    #[must_use]
    pub fn url(&self) -> Option<&'a str> {
        match self {
            ImageSlot::Image { url, .. } => Some(url),
            ImageSlot::Placeholder => None,
        }
    }
}

/// Which side of a leaf faces the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Page text, seen while the leaf lies right of the spine.
    Front,
    /// Mirrored illustration, seen once the leaf passes the vertical.
    Back,
}

/// One leaf of the right-hand stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'a> {
    /// Deck position.
    pub position: usize,
    pub page: &'a PageRecord,
    pub visual: PageVisual,
    /// Illustration on the back face: the settled image, hinted by this leaf's distance.
    pub back_image: ImageSlot<'a>,
    /// Rotation about the spine, 0° on the right to -180° on the left.
    pub angle_deg: f32,
    pub in_flight: bool,
}

impl Leaf<'_> {
    #[must_use]
    pub fn face(&self) -> Face {
        if self.angle_deg > -90.0 {
            Face::Front
        } else {
            Face::Back
        }
    }

    /// Apparent width as a fraction of a half page.
    #[must_use]
    pub fn projected_width(&self) -> f32 {
        self.angle_deg.to_radians().cos().abs()
    }

    /// The active page resting on the right casts a shadow.
    #[must_use]
    pub fn casts_shadow(&self) -> bool {
        self.visual.active && !self.visual.flipped && !self.in_flight
    }
}

/// The exposed left page.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftPage<'a> {
    pub image: ImageSlot<'a>,
}

/// Everything the view needs to draw one frame of the book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookLayout<'a> {
    pub left: LeftPage<'a>,
    /// Leaves in paint order: later entries cover earlier ones.
    pub leaves: Vec<Leaf<'a>>,
    pub state: ViewState,
    pub total: usize,
}

impl<'a> BookLayout<'a> {
    #[must_use]
    pub fn compute(
        deck: &'a Deck,
        state: ViewState,
        window: &ImageWindow,
        animator: &FlipAnimator,
        now: Instant,
    ) -> Self {
        let current = state.current_index;
        let settled = state.settled_image_index;
        let settled_page = deck.get(settled);

        let left = LeftPage {
            image: ImageSlot::for_page(
                settled_page,
                settled_page.map_or(0, |p| p.page_number),
                window.hints(settled, current),
            ),
        };

        let mut resting_left = Vec::new();
        let mut resting_right = Vec::new();
        let mut turning_left = Vec::new();
        let mut turning_right = Vec::new();

        for (position, page) in deck.iter().enumerate() {
            let visual = page_visual(position, current);
            let leaf = Leaf {
                position,
                page,
                visual,
                back_image: ImageSlot::for_page(
                    settled_page,
                    page.page_number,
                    window.hints(position, current),
                ),
                angle_deg: animator.angle(page.id, visual.flipped, now),
                in_flight: animator.is_in_flight(page.id, now),
            };
            if leaf.in_flight {
                match leaf.face() {
                    Face::Back => turning_left.push(leaf),
                    Face::Front => turning_right.push(leaf),
                }
            } else if visual.flipped {
                resting_left.push(leaf);
            } else {
                resting_right.push(leaf);
            }
        }

        // Right stack: lower z first so the earliest unread page ends on top.
        resting_right.sort_by_key(|leaf| leaf.visual.z_index);
        // Left stack: the most recently read page ends on top.
        resting_left.sort_by_key(|leaf| leaf.position);
        // Turning leaves cover both stacks and stack among themselves like
        // the half they are over: later pages on top on the left, earlier
        // pages on top on the right.
        turning_left.sort_by_key(|leaf| leaf.position);
        turning_right.sort_by_key(|leaf| leaf.visual.z_index);

        let mut leaves = resting_left;
        leaves.extend(resting_right);
        leaves.extend(turning_left);
        leaves.extend(turning_right);

        Self {
            left,
            leaves,
            state,
            total: deck.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Leaves that can actually be seen: the top of each resting stack and
    /// every leaf in flight, still in paint order.
    #[must_use]
    pub fn visible_leaves(&self) -> Vec<&Leaf<'a>> {
        let top_left = self
            .leaves
            .iter()
            .filter(|leaf| !leaf.in_flight && leaf.visual.flipped)
            .max_by_key(|leaf| leaf.position);
        let top_right = self
            .leaves
            .iter()
            .filter(|leaf| !leaf.in_flight && !leaf.visual.flipped)
            .max_by_key(|leaf| leaf.visual.z_index);

        self.leaves
            .iter()
            .filter(|leaf| {
                leaf.in_flight
                    || top_left.is_some_and(|top| top.position == leaf.position)
                    || top_right.is_some_and(|top| top.position == leaf.position)
            })
            .collect()
    }

    /// Distinct illustration URLs the frame references, for fetching.
    #[must_use]
    pub fn image_urls(&self) -> Vec<&'a str> {
        let mut urls: Vec<&'a str> = Vec::new();
        let slots = std::iter::once(&self.left.image)
            .chain(self.leaves.iter().map(|leaf| &leaf.back_image));
        for url in slots.filter_map(ImageSlot::url) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }
}
