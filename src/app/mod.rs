// SPDX-License-Identifier: MPL-2.0
//! Application root state and the glue between the book core and iced.
//!
//! The `App` owns the page [`Controller`], the leaf animator and the
//! illustration cache, and turns controller effects into tasks: the
//! abortable settle timer, illustration fetches and index-change
//! notifications.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::book::animation::FlipAnimator;
use crate::book::{Controller, ImageWindow, SettleDelay};
use crate::config::{self, Config};
use crate::i18n::I18n;
use crate::media::{CacheConfig, ImageCache, RemotePolicy};
use crate::story::{self, Story};
use crate::ui::theming::AppTheme;
use iced::{task, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Callback invoked with the new page index after every page change.
pub type IndexObserver = Arc<dyn Fn(usize) + Send + Sync>;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme: AppTheme,
    controller: Controller,
    animator: FlipAnimator,
    image_window: ImageWindow,
    policy: RemotePolicy,
    images: ImageCache,
    /// Abort handle of the pending settle timer.
    settle_task: Option<task::Handle>,
    /// Instant the book was last laid out for.
    clock: Instant,
    story_title: String,
    story_path: Option<PathBuf>,
    /// Translated warning shown under the book.
    notice: Option<String>,
    on_index_change: Option<IndexObserver>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("story_title", &self.story_title)
            .field("view_state", &self.controller.view_state())
            .field("total", &self.controller.total())
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 360;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        // Closing goes through `WindowCloseRequested` so pending timers are cancelled first.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_story(Story::default(), None, &Config::default(), I18n::default())
    }
}

impl App {
    /// Builds the application around an already loaded story.
    pub fn with_story(
        story: Story,
        start: Option<usize>,
        config: &Config,
        i18n: I18n,
    ) -> Self {
        let start = start.or(config.book.start_page).unwrap_or(config::DEFAULT_START_PAGE);
        let (priority, eager) = config.images.windows();

        Self {
            i18n,
            theme: AppTheme::new(config.general.theme_mode),
            controller: Controller::new(
                story.deck(),
                start,
                SettleDelay::from_duration(config.book.settle_delay()),
            ),
            animator: FlipAnimator::new(config.book.flip_duration()),
            image_window: ImageWindow::new(priority, eager),
            policy: RemotePolicy::from_config(&config.images),
            images: ImageCache::new(CacheConfig::from_config(&config.images)),
            settle_task: None,
            clock: Instant::now(),
            story_title: story.title,
            story_path: None,
            notice: None,
            on_index_change: None,
        }
    }

    /// Registers a callback run after every page change.
    #[must_use]
    pub fn with_index_observer(mut self, observer: IndexObserver) -> Self {
        self.on_index_change = Some(observer);
        self
    }

    /// Initializes application state from the CLI flags and settings file.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let story_path = flags.story_path.map(PathBuf::from);
        let (story, story_error) = match &story_path {
            Some(path) => match story::load_from_path(path) {
                Ok(story) => (story, None),
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "cannot open story");
                    (Story::default(), Some(err))
                }
            },
            None => (story::demo(), None),
        };

        // `--page` is 1-based like the printed page numbers.
        let start = flags.page.map(|page| page.saturating_sub(1));
        let mut app = Self::with_story(story, start, &config, i18n);
        app.story_path = story_path;
        app.notice = story_error
            .map(|err| app.i18n.tr(err.i18n_key()))
            .or_else(|| config_warning.map(|key| app.i18n.tr(&key)));

        tracing::info!(
            title = %app.story_title,
            pages = app.controller.total(),
            start = app.controller.current_index(),
            "book opened"
        );

        let task = app.prefetch();
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = if self.story_title.trim().is_empty() {
            self.i18n.tr("window-title")
        } else {
            self.i18n
                .tr_with_text("window-title-story", &[("title", self.story_title.as_str())])
        };

        if self.controller.total() == 0 {
            return app_name;
        }

        let indicator = self.page_indicator();
        format!("{indicator} - {app_name}")
    }

    fn page_indicator(&self) -> String {
        self.i18n.tr_with_args(
            "page-indicator",
            &[
                (
                    "current",
                    i64::try_from(self.controller.current_index() + 1).unwrap_or(i64::MAX),
                ),
                (
                    "total",
                    i64::try_from(self.controller.total()).unwrap_or(i64::MAX),
                ),
            ],
        )
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let frame_sub = subscription::create_frame_subscription(self.wants_frames());

        Subscription::batch([event_sub, frame_sub])
    }

    /// Frames keep coming until the layout drawn at `clock` is at rest.
    fn wants_frames(&self) -> bool {
        self.animator.is_animating(self.clock)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            theme: &self.theme,
            controller: &self.controller,
            animator: &self.animator,
            image_window: &self.image_window,
            images: &self.images,
            notice: self.notice.as_deref(),
            now: self.clock,
        })
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    #[must_use]
    pub fn settled_image_index(&self) -> usize {
        self.controller.settled_image_index()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
