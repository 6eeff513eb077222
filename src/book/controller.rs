// SPDX-License-Identifier: MPL-2.0
//! Page index state for the flip book.
//!
//! The controller is the only owner of the current page. Every accepted move
//! yields [`Effect::IndexChanged`] exactly once; moves that hit either end of
//! the deck are silently absorbed and yield [`Effect::None`].

use super::settle::{Debounce, SettleDelay, Ticket};
use crate::story::Deck;

/// Stacking base: page `idx` stacks at `BASE_Z - idx`.
pub const BASE_Z: i32 = 100;

/// Index state of one reading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Page on top of the right-hand stack.
    pub current_index: usize,
    /// Page whose illustration is shown on the left; lags behind `current_index`.
    pub settled_image_index: usize,
}

/// Visual state derived for the page at one deck position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageVisual {
    /// The page has been read and rests on the left.
    pub flipped: bool,
    /// The page is the current one.
    pub active: bool,
    pub z_index: i32,
}

/// Derives the visual state of position `idx` while `current` is open.
#[must_use]
pub fn page_visual(idx: usize, current: usize) -> PageVisual {
    let offset = i32::try_from(idx).unwrap_or(i32::MAX);
    PageVisual {
        flipped: idx < current,
        active: idx == current,
        z_index: BASE_Z.saturating_sub(offset),
    }
}

/// Navigation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    /// The settle timer for this ticket has elapsed.
    SettleElapsed(Ticket),
}

/// Effects produced by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The current page moved; a settle update has been scheduled.
    IndexChanged {
        previous: usize,
        index: usize,
        settle: Ticket,
    },
    /// The left-hand illustration caught up with the current page.
    ImageSettled { index: usize },
}

/// Owns the deck and the index state of one reading session.
#[derive(Debug, Clone)]
pub struct Controller {
    deck: Deck,
    state: ViewState,
    settle: Debounce,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Deck::default(), 0, SettleDelay::default())
    }
}

impl Controller {
    /// Opens `deck` at `start`, clamped into the deck.
    #[must_use]
    pub fn new(deck: Deck, start: usize, delay: SettleDelay) -> Self {
        let index = start.min(deck.last_index());
        Self {
            deck,
            state: ViewState {
                current_index: index,
                settled_image_index: index,
            },
            settle: Debounce::new(delay),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub fn settled_image_index(&self) -> usize {
        self.state.settled_image_index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.state.current_index + 1 < self.deck.len()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.state.current_index > 0
    }

    #[must_use]
    pub fn visual(&self, idx: usize) -> PageVisual {
        page_visual(idx, self.state.current_index)
    }

    #[must_use]
    pub fn settle_delay(&self) -> std::time::Duration {
        self.settle.delay()
    }

    #[must_use]
    pub fn pending_settle(&self) -> Option<Ticket> {
        self.settle.pending()
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Next => self.go_next(),
            Message::Previous => self.go_previous(),
            Message::First => self.go_first(),
            Message::Last => self.go_last(),
            Message::GoTo(index) => self.go_to(index),
            Message::SettleElapsed(ticket) => self.settle_elapsed(ticket),
        }
    }

    pub fn go_next(&mut self) -> Effect {
        if !self.can_go_next() {
            return Effect::None;
        }
        self.move_to(self.state.current_index + 1)
    }

    pub fn go_previous(&mut self) -> Effect {
        if !self.can_go_previous() {
            return Effect::None;
        }
        self.move_to(self.state.current_index - 1)
    }

    /// Jumps to `index`, clamped into the deck.
    pub fn go_to(&mut self, index: usize) -> Effect {
        if self.deck.is_empty() {
            return Effect::None;
        }
        self.move_to(index.min(self.deck.last_index()))
    }

    pub fn go_first(&mut self) -> Effect {
        self.go_to(0)
    }

    pub fn go_last(&mut self) -> Effect {
        self.go_to(self.deck.last_index())
    }

    /// Swaps in a new deck (story reload) and pulls the indices back inside it.
    pub fn replace_deck(&mut self, deck: Deck) -> Effect {
        self.deck = deck;
        let last = self.deck.last_index();
        self.state.settled_image_index = self.state.settled_image_index.min(last);
        self.move_to(self.state.current_index.min(last))
    }

    /// Applies a settle update if `ticket` is still the pending one.
    pub fn settle_elapsed(&mut self, ticket: Ticket) -> Effect {
        match self.settle.fire(ticket) {
            Some(target) => {
                let index = target.min(self.deck.last_index());
                self.state.settled_image_index = index;
                Effect::ImageSettled { index }
            }
            None => Effect::None,
        }
    }

    /// Cancels any pending settle update; call when the session ends.
    pub fn teardown(&mut self) -> Option<Ticket> {
        self.settle.cancel()
    }

    fn move_to(&mut self, index: usize) -> Effect {
        let previous = self.state.current_index;
        if index == previous {
            return Effect::None;
        }
        self.state.current_index = index;
        let settle = self.settle.schedule(index);
        Effect::IndexChanged {
            previous,
            index,
            settle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::PageRecord;

    fn deck(len: usize) -> Deck {
        Deck::new(
            (0..len)
                .map(|i| PageRecord {
                    id: i as u32 + 1,
                    page_number: i as u32 + 1,
                    content: format!("page {}", i + 1),
                    image_url: Some(format!("https://storage.googleapis.com/b/{i}.png")),
                })
                .collect(),
        )
    }

    fn controller(len: usize, start: usize) -> Controller {
        Controller::new(deck(len), start, SettleDelay::default())
    }

    fn changed_to(effect: Effect) -> Option<usize> {
        match effect {
            Effect::IndexChanged { index, .. } => Some(index),
            _ => None,
        }
    }

    #[test]
    fn start_index_is_clamped_into_deck() {
        for len in 1..6 {
            for start in 0..10 {
                let c = controller(len, start);
                assert!(c.current_index() < len);
                assert_eq!(c.current_index(), start.min(len - 1));
                assert_eq!(c.settled_image_index(), c.current_index());
            }
        }
    }

    #[test]
    fn next_from_first_page_flips_it() {
        let mut c = controller(3, 0);

        let effect = c.go_next();

        assert_eq!(changed_to(effect), Some(1));
        assert_eq!(c.current_index(), 1);
        assert!(c.visual(0).flipped);
        assert!(c.visual(1).active);
        assert!(!c.visual(1).flipped);
        assert!(!c.visual(2).flipped);
    }

    #[test]
    fn index_change_reports_previous_index() {
        let mut c = controller(4, 2);
        match c.go_previous() {
            Effect::IndexChanged {
                previous, index, ..
            } => {
                assert_eq!(previous, 2);
                assert_eq!(index, 1);
            }
            other => panic!("expected IndexChanged, got {other:?}"),
        }
    }

    #[test]
    fn next_at_last_page_is_a_silent_no_op() {
        let mut c = controller(3, 2);
        for _ in 0..3 {
            assert_eq!(c.go_next(), Effect::None);
            assert_eq!(c.current_index(), 2);
        }
        assert!(c.pending_settle().is_none());
    }

    #[test]
    fn previous_at_first_page_is_a_silent_no_op() {
        let mut c = controller(3, 0);
        assert_eq!(c.go_previous(), Effect::None);
        assert_eq!(c.current_index(), 0);
        assert!(c.pending_settle().is_none());
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut c = controller(5, 0);
        let moves = [true, true, false, true, true, true, true, false, false, false, false, false];
        for forward in moves {
            if forward {
                c.go_next();
            } else {
                c.go_previous();
            }
            assert!(c.current_index() < 5);
        }
    }

    #[test]
    fn empty_deck_is_inert() {
        let mut c = controller(0, 7);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.go_next(), Effect::None);
        assert_eq!(c.go_previous(), Effect::None);
        assert_eq!(c.go_last(), Effect::None);
        assert_eq!(c.go_to(3), Effect::None);
        assert_eq!(c.current_index(), 0);
        assert!(!c.can_go_next());
        assert!(!c.can_go_previous());
    }

    #[test]
    fn rapid_navigation_settles_once_on_final_index() {
        let mut c = controller(10, 0);
        let mut tickets = Vec::new();
        for _ in 0..4 {
            if let Effect::IndexChanged { settle, .. } = c.go_next() {
                tickets.push(settle);
            }
        }
        assert_eq!(tickets.len(), 4);
        assert_eq!(c.settled_image_index(), 0);

        let settled: Vec<Effect> = tickets
            .into_iter()
            .map(|t| c.handle(Message::SettleElapsed(t)))
            .filter(|e| *e != Effect::None)
            .collect();

        assert_eq!(settled, vec![Effect::ImageSettled { index: 4 }]);
        assert_eq!(c.settled_image_index(), 4);
    }

    #[test]
    fn no_op_does_not_disturb_pending_settle() {
        let mut c = controller(2, 0);
        let Effect::IndexChanged { settle, .. } = c.go_next() else {
            panic!("expected a move");
        };
        assert_eq!(c.go_next(), Effect::None);
        assert_eq!(c.pending_settle(), Some(settle));
    }

    #[test]
    fn teardown_cancels_pending_settle() {
        let mut c = controller(3, 0);
        let Effect::IndexChanged { settle, .. } = c.go_next() else {
            panic!("expected a move");
        };

        assert_eq!(c.teardown(), Some(settle));
        assert_eq!(c.settle_elapsed(settle), Effect::None);
        assert_eq!(c.settled_image_index(), 0);
    }

    #[test]
    fn flipped_iff_before_current() {
        for current in 0..6 {
            for idx in 0..6 {
                assert_eq!(page_visual(idx, current).flipped, idx < current);
                assert_eq!(page_visual(idx, current).active, idx == current);
            }
        }
    }

    #[test]
    fn z_index_descends_with_position() {
        assert_eq!(page_visual(0, 0).z_index, BASE_Z);
        assert_eq!(page_visual(3, 0).z_index, BASE_Z - 3);
        assert!(page_visual(1, 5).z_index > page_visual(2, 5).z_index);
    }

    #[test]
    fn go_to_clamps_and_skips_same_index() {
        let mut c = controller(4, 1);
        assert_eq!(changed_to(c.go_to(99)), Some(3));
        assert_eq!(c.go_to(3), Effect::None);
        assert_eq!(changed_to(c.go_first()), Some(0));
        assert_eq!(changed_to(c.go_last()), Some(3));
    }

    #[test]
    fn shrinking_deck_reclamps_and_notifies() {
        let mut c = controller(6, 5);

        let effect = c.replace_deck(deck(3));

        assert_eq!(changed_to(effect), Some(2));
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.settled_image_index(), 2);
    }

    #[test]
    fn replacing_with_empty_deck_resets_to_zero() {
        let mut c = controller(4, 3);
        assert_eq!(changed_to(c.replace_deck(Deck::default())), Some(0));
        assert_eq!(c.view_state(), ViewState::default());
    }

    #[test]
    fn growing_deck_keeps_index_silently() {
        let mut c = controller(3, 1);
        assert_eq!(c.replace_deck(deck(8)), Effect::None);
        assert_eq!(c.current_index(), 1);
        assert!(c.can_go_next());
    }

    #[test]
    fn settle_after_shrink_never_points_past_deck() {
        let mut c = controller(6, 0);
        let Effect::IndexChanged { settle, .. } = c.go_last() else {
            panic!("expected a move");
        };
        // The reclamp reschedules, so the old ticket is stale.
        c.replace_deck(deck(2));
        assert_eq!(c.settle_elapsed(settle), Effect::None);

        let pending = c.pending_settle().expect("reclamp schedules a settle");
        assert_eq!(
            c.settle_elapsed(pending),
            Effect::ImageSettled { index: 1 }
        );
    }
}
