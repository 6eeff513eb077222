// SPDX-License-Identifier: MPL-2.0
//! Debounced "settled image" update.
//!
//! After each page change the left-hand illustration waits for the flip to
//! cover it before following the current page. Only the most recent request
//! may land: scheduling again supersedes whatever was pending, and a
//! cancelled or superseded [`Ticket`] is rejected when its timer fires.

use crate::config::{DEFAULT_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS, MIN_SETTLE_DELAY_MS};
use std::time::Duration;

/// Settle delay in milliseconds, clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelay(u64);

impl SettleDelay {
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS))
    }

    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        Self::new(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for SettleDelay {
    fn default() -> Self {
        Self(DEFAULT_SETTLE_DELAY_MS)
    }
}

/// Identifies one scheduled settle update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    target: usize,
}

impl Ticket {
    /// Page index the settled image will move to.
    #[must_use]
    pub fn target(self) -> usize {
        self.target
    }
}

/// Single-slot debouncer: at most one update is pending at any time.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    delay: SettleDelay,
    generation: u64,
    pending: Option<Ticket>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: SettleDelay) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay.as_duration()
    }

    /// Schedules an update toward `target`, superseding any pending one.
    pub fn schedule(&mut self, target: usize) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = Ticket {
            generation: self.generation,
            target,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Consumes `ticket` if it is still the pending one.
    ///
    /// Returns the target index to apply, or `None` for stale tickets.
    pub fn fire(&mut self, ticket: Ticket) -> Option<usize> {
        if self.pending == Some(ticket) {
            self.pending = None;
            Some(ticket.target)
        } else {
            None
        }
    }

    /// Drops the pending update, if any.
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }
}

/// Waits out the settle delay, then hands the ticket back.
pub async fn wait(ticket: Ticket, delay: Duration) -> Ticket {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_clamped() {
        assert_eq!(
            SettleDelay::new(u64::MAX).as_duration(),
            Duration::from_millis(MAX_SETTLE_DELAY_MS)
        );
        assert_eq!(
            SettleDelay::default().as_duration(),
            Duration::from_millis(DEFAULT_SETTLE_DELAY_MS)
        );
        assert_eq!(
            SettleDelay::from_duration(Duration::from_millis(250)).as_duration(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn latest_ticket_fires_once() {
        let mut debounce = Debounce::default();
        let ticket = debounce.schedule(3);

        assert_eq!(debounce.fire(ticket), Some(3));
        assert_eq!(debounce.fire(ticket), None);
        assert!(debounce.pending().is_none());
    }

    #[test]
    fn rescheduling_supersedes_previous_ticket() {
        let mut debounce = Debounce::default();
        let tickets: Vec<Ticket> = (1..=5).map(|target| debounce.schedule(target)).collect();

        let fired: Vec<usize> = tickets
            .into_iter()
            .filter_map(|ticket| debounce.fire(ticket))
            .collect();
        assert_eq!(fired, vec![5]);
    }

    #[test]
    fn same_target_rescheduled_is_still_distinct() {
        let mut debounce = Debounce::default();
        let first = debounce.schedule(2);
        let second = debounce.schedule(2);

        assert_ne!(first, second);
        assert_eq!(debounce.fire(first), None);
        assert_eq!(debounce.fire(second), Some(2));
    }

    #[test]
    fn cancel_rejects_pending_ticket() {
        let mut debounce = Debounce::default();
        let ticket = debounce.schedule(1);

        assert_eq!(debounce.cancel(), Some(ticket));
        assert_eq!(debounce.fire(ticket), None);
        assert_eq!(debounce.cancel(), None);
    }

    #[tokio::test]
    async fn wait_returns_ticket_after_delay() {
        let mut debounce = Debounce::new(SettleDelay::new(5));
        let ticket = debounce.schedule(4);

        let returned = wait(ticket, debounce.delay()).await;
        assert_eq!(returned, ticket);
        assert_eq!(debounce.fire(returned), Some(4));
    }
}
