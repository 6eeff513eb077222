// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Controller effects become tasks here: a page change restarts the settle
//! timer, starts the leaf animation, notifies the index observer and plans
//! illustration fetches.

use super::{App, Message};
use crate::book::{self, settle, Effect, Ticket};
use crate::error::Error;
use crate::media::{self, ImageData, ImageSource};
use crate::story::{self, PageRecord, Story};
use crate::ui::book_view;
use iced::{window, Task};
use std::time::Instant;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(request) => self.navigate(request),
            Message::Book(book_view::Message::PreviousClicked) => {
                self.navigate(book::Message::Previous)
            }
            Message::Book(book_view::Message::NextClicked) => self.navigate(book::Message::Next),
            Message::SettleElapsed(ticket) => self.handle_settle_elapsed(ticket),
            Message::ImageLoaded { url, result } => {
                self.handle_image_loaded(url, result);
                Task::none()
            }
            Message::Frame(now) => {
                self.clock = now;
                self.animator.prune(now);
                Task::none()
            }
            Message::ReloadStory => self.reload_story(),
            Message::StoryReloaded(result) => self.handle_story_reloaded(result),
            Message::WindowCloseRequested(id) => {
                self.teardown();
                window::close(id)
            }
        }
    }

    fn navigate(&mut self, request: book::Message) -> Task<Message> {
        let effect = self.controller.handle(request);
        self.apply(effect, true)
    }

    fn handle_settle_elapsed(&mut self, ticket: Ticket) -> Task<Message> {
        let effect = self.controller.settle_elapsed(ticket);
        // A stale ticket leaves the live timer's handle in place.
        if matches!(effect, Effect::ImageSettled { .. }) {
            self.settle_task = None;
        }
        self.apply(effect, true)
    }

    /// Turns a controller effect into follow-up work.
    fn apply(&mut self, effect: Effect, animate: bool) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::IndexChanged {
                previous,
                index,
                settle,
            } => {
                let now = Instant::now();
                self.clock = now;
                if animate {
                    self.animator
                        .transition(self.controller.deck(), previous, index, now);
                }
                tracing::debug!(previous, index, "page changed");
                if let Some(observer) = &self.on_index_change {
                    observer(index);
                }
                Task::batch([self.schedule_settle(settle), self.prefetch()])
            }
            Effect::ImageSettled { index } => {
                tracing::debug!(index, "illustration settled");
                self.prefetch()
            }
        }
    }

    /// Starts the settle timer for `ticket`, aborting the previous one.
    fn schedule_settle(&mut self, ticket: Ticket) -> Task<Message> {
        if let Some(handle) = self.settle_task.take() {
            handle.abort();
        }
        let delay = self.controller.settle_delay();
        let (task, handle) =
            Task::perform(settle::wait(ticket, delay), Message::SettleElapsed).abortable();
        self.settle_task = Some(handle);
        task
    }

    /// Cancels everything still pending for this reading session.
    pub(super) fn teardown(&mut self) {
        if let Some(ticket) = self.controller.teardown() {
            tracing::debug!(target_index = ticket.target(), "cancelled pending settle");
        }
        if let Some(handle) = self.settle_task.take() {
            handle.abort();
        }
        self.animator.clear();
    }

    /// Fetches illustrations the current frame or the next few turns will show.
    ///
    /// The settled illustration comes first, followed by the eager window
    /// around the current page, nearest first.
    pub(super) fn prefetch(&mut self) -> Task<Message> {
        let deck = self.controller.deck().clone();
        let plan = std::iter::once(self.controller.settled_image_index()).chain(
            self.image_window
                .prefetch_plan(self.controller.current_index(), deck.len()),
        );
        let wanted: Vec<&str> = plan
            .filter_map(|index| deck.get(index).and_then(PageRecord::image))
            .collect();

        let base_dir = self
            .story_path
            .as_deref()
            .and_then(std::path::Path::parent)
            .map(std::path::Path::to_path_buf);
        let allow_svg = self.policy.allow_svg();
        let max_bytes = self.images.max_image_bytes();

        let mut tasks = Vec::new();
        for url in self.images.urls_to_fetch(&wanted) {
            match ImageSource::resolve(&url, base_dir.as_deref(), &self.policy) {
                Ok(source) => {
                    self.images.mark_pending(&url);
                    tasks.push(Task::perform(
                        media::load(source, allow_svg, max_bytes),
                        move |result| Message::ImageLoaded { url, result },
                    ));
                }
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "illustration refused");
                    self.images.finish(url, Err(err));
                }
            }
        }
        Task::batch(tasks)
    }

    fn handle_image_loaded(&mut self, url: String, result: Result<ImageData, Error>) {
        match &result {
            Ok(image) => {
                tracing::debug!(url = %url, width = image.width, height = image.height, "illustration loaded");
            }
            Err(err) => tracing::warn!(url = %url, error = %err, "illustration failed"),
        }
        self.images.finish(url, result);
    }

    fn reload_story(&mut self) -> Task<Message> {
        match self.story_path.clone() {
            Some(path) => Task::perform(
                async move { story::load_from_path(&path) },
                Message::StoryReloaded,
            ),
            None => Task::done(Message::StoryReloaded(Ok(story::demo()))),
        }
    }

    fn handle_story_reloaded(&mut self, result: Result<Story, Error>) -> Task<Message> {
        let story = match result {
            Ok(story) => story,
            Err(err) => {
                tracing::warn!(error = %err, "story reload failed");
                self.notice = Some(self.i18n.tr(err.i18n_key()));
                return Task::none();
            }
        };

        tracing::info!(title = %story.title, pages = story.pages.len(), "story reloaded");
        self.notice = None;
        self.story_title = story.title.clone();
        self.animator.clear();
        self.images.clear_failures();

        let effect = self.controller.replace_deck(story.deck());
        let effect_task = self.apply(effect, false);
        Task::batch([effect_task, self.prefetch()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::i18n::I18n;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn story(len: u32) -> Story {
        Story {
            id: None,
            title: "Test".into(),
            pages: (1..=len)
                .map(|n| PageRecord {
                    id: n,
                    page_number: n,
                    content: format!("page {n}"),
                    image_url: None,
                })
                .collect(),
        }
    }

    fn app(len: u32) -> App {
        let config = Config::default();
        let i18n = I18n::new(Some("en-US".into()), &config);
        App::with_story(story(len), None, &config, i18n)
    }

    #[test]
    fn clicks_turn_pages() {
        let mut app = app(3);
        let _ = app.update(Message::Book(book_view::Message::NextClicked));
        assert_eq!(app.current_index(), 1);
        let _ = app.update(Message::Book(book_view::Message::PreviousClicked));
        assert_eq!(app.current_index(), 0);
    }

    #[test]
    fn observer_sees_every_change_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut app = app(3).with_index_observer(Arc::new(move |index| {
            sink.lock().expect("lock").push(index);
        }));

        for _ in 0..4 {
            let _ = app.update(Message::Navigate(book::Message::Next));
        }
        let _ = app.update(Message::Navigate(book::Message::First));

        assert_eq!(*seen.lock().expect("lock"), vec![1, 2, 0]);
    }

    #[test]
    fn settled_image_waits_for_latest_ticket() {
        let mut app = app(4);
        let _ = app.update(Message::Navigate(book::Message::Next));
        let first = app.controller.pending_settle().expect("scheduled");
        let _ = app.update(Message::Navigate(book::Message::Next));
        let second = app.controller.pending_settle().expect("scheduled");

        let _ = app.update(Message::SettleElapsed(first));
        assert_eq!(app.settled_image_index(), 0);

        let _ = app.update(Message::SettleElapsed(second));
        assert_eq!(app.settled_image_index(), 2);
    }

    #[test]
    fn stale_settle_keeps_live_timer_handle() {
        let mut app = app(4);
        let _ = app.update(Message::Navigate(book::Message::Next));
        let first = app.controller.pending_settle().expect("scheduled");
        let _ = app.update(Message::Navigate(book::Message::Next));
        let second = app.controller.pending_settle().expect("scheduled");

        let _ = app.update(Message::SettleElapsed(first));
        assert!(app.settle_task.is_some());

        let _ = app.update(Message::SettleElapsed(second));
        assert!(app.settle_task.is_none());
    }

    #[test]
    fn prefetch_keeps_wanted_illustrations_cached() {
        let config = Config::default();
        let i18n = I18n::new(Some("en-US".into()), &config);
        let mut story = story(6);
        for page in &mut story.pages {
            page.image_url = Some(format!("embedded:missing-{}.png", page.id));
        }
        let mut app = App::with_story(story, None, &config, i18n);
        app.images = crate::media::ImageCache::new(crate::media::CacheConfig {
            max_bytes: 10_000_000,
            max_images: 3,
        });

        // The first page's illustration is on screen; two others fill the cache.
        let shown = "embedded:missing-1.png";
        for url in [shown, "embedded:old-a.png", "embedded:old-b.png"] {
            app.images
                .finish(url.into(), Ok(ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])));
        }

        let _ = app.prefetch();
        app.images.finish(
            "embedded:missing-2.png".into(),
            Ok(ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])),
        );

        assert!(app.images.contains(shown));
        assert!(!app.images.contains("embedded:old-a.png"));
    }

    #[test]
    fn frames_continue_until_drawn_flip_finishes() {
        let mut app = app(3);
        let _ = app.update(Message::Navigate(book::Message::Next));
        assert!(app.wants_frames());

        let start = app.clock;
        let duration = app.animator.duration();
        let _ = app.update(Message::Frame(start + duration - Duration::from_millis(5)));
        // The flip may be over by wall time, but the last drawn frame is not.
        std::thread::sleep(Duration::from_millis(20));
        assert!(app.wants_frames());

        let _ = app.update(Message::Frame(start + duration + Duration::from_millis(1)));
        assert!(!app.wants_frames());
    }

    #[test]
    fn close_request_cancels_pending_settle() {
        let mut app = app(3);
        let _ = app.update(Message::Navigate(book::Message::Next));
        let ticket = app.controller.pending_settle().expect("scheduled");

        app.teardown();
        assert!(app.settle_task.is_none());

        let _ = app.update(Message::SettleElapsed(ticket));
        assert_eq!(app.settled_image_index(), 0);
    }

    #[test]
    fn empty_story_ignores_navigation() {
        let mut app = app(0);
        for request in [
            book::Message::Next,
            book::Message::Previous,
            book::Message::Last,
        ] {
            let _ = app.update(Message::Navigate(request));
        }
        assert_eq!(app.current_index(), 0);
        assert!(app.controller.pending_settle().is_none());
    }

    #[test]
    fn shorter_reload_clamps_current_page() {
        let mut app = app(5);
        let _ = app.update(Message::Navigate(book::Message::Last));
        assert_eq!(app.current_index(), 4);

        let _ = app.update(Message::StoryReloaded(Ok(story(2))));
        assert_eq!(app.current_index(), 1);
        assert!(app.settled_image_index() <= 1);
    }

    #[test]
    fn failed_reload_keeps_deck_and_shows_notice() {
        let mut app = app(3);
        let _ = app.update(Message::StoryReloaded(Err(Error::Io("gone".into()))));
        assert_eq!(app.controller.total(), 3);
        assert_eq!(app.notice(), Some("The story file could not be read."));
    }

    #[test]
    fn image_results_land_in_cache() {
        let mut app = app(1);
        let _ = app.update(Message::ImageLoaded {
            url: "embedded:forest.svg".into(),
            result: Ok(ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])),
        });
        assert!(app.images.contains("embedded:forest.svg"));
    }

    #[test]
    fn title_shows_page_indicator() {
        let mut app = app(3);
        let _ = app.update(Message::Navigate(book::Message::Next));
        assert_eq!(app.title(), "Page 2 of 3 - Test - Flipbook");
    }
}
