// SPDX-License-Identifier: MPL-2.0
use flipbook::book::animation::FlipAnimator;
use flipbook::book::layout::ImageSlot;
use flipbook::book::{BookLayout, Controller, Effect, ImageWindow, Loading, SettleDelay};
use flipbook::config::{self, Config};
use flipbook::i18n::I18n;
use flipbook::story;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

const STORY_TOML: &str = r#"
title = "Three Little Pages"

[[pages]]
id = 7
page_number = 1
content = "One"
image_url = "one.png"

[[pages]]
id = 8
page_number = 2
content = "Two"

[[pages]]
id = 9
page_number = 3
content = "Three"
image_url = "three.png"
"#;

fn write_config(config: &Config, path: &Path) {
    let content = toml::to_string_pretty(config).expect("Failed to serialize config");
    std::fs::write(path, content).expect("Failed to write config file");
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    write_config(&initial_config, &temp_config_file_path);

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    write_config(&french_config, &temp_config_file_path);

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_story_file_drives_controller() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("story.toml");
    std::fs::write(&path, STORY_TOML).expect("Failed to write story");

    let story = story::load_from_path(&path).expect("Failed to load story");
    assert_eq!(story.title, "Three Little Pages");

    let mut controller = Controller::new(
        story.deck(),
        0,
        SettleDelay::from_duration(Duration::from_millis(600)),
    );

    let Effect::IndexChanged { settle: first, .. } = controller.go_next() else {
        panic!("expected a page change");
    };
    let Effect::IndexChanged { settle: second, .. } = controller.go_next() else {
        panic!("expected a page change");
    };
    assert_eq!(controller.current_index(), 2);
    assert!(matches!(controller.go_next(), Effect::None));

    // Only the latest settle timer promotes the illustration.
    assert!(matches!(controller.settle_elapsed(first), Effect::None));
    assert_eq!(controller.settled_image_index(), 0);
    assert!(matches!(
        controller.settle_elapsed(second),
        Effect::ImageSettled { index: 2 }
    ));
    assert_eq!(controller.settled_image_index(), 2);
}

#[test]
fn test_layout_hints_follow_current_page() {
    let story = story::from_toml(STORY_TOML).expect("valid story");
    let controller = Controller::new(story.deck(), 2, SettleDelay::default());
    let animator = FlipAnimator::new(Duration::from_millis(500));

    let layout = BookLayout::compute(
        controller.deck(),
        controller.view_state(),
        &ImageWindow::default(),
        &animator,
        Instant::now(),
    );

    assert_eq!(layout.total, 3);
    assert_eq!(layout.leaves.len(), 3);
    // Every visible illustration is the settled one.
    assert_eq!(layout.image_urls(), vec!["three.png"]);

    let current = layout
        .leaves
        .iter()
        .find(|leaf| leaf.position == 2)
        .expect("current leaf");
    let ImageSlot::Image { hints, .. } = &current.back_image else {
        panic!("current page has an image");
    };
    assert!(hints.priority);
    assert_eq!(hints.loading, Loading::Eager);

    let far = layout
        .leaves
        .iter()
        .find(|leaf| leaf.position == 0)
        .expect("first leaf");
    let ImageSlot::Image { hints, .. } = &far.back_image else {
        panic!("settled image is drawn on every back face");
    };
    assert!(!hints.priority);
    assert_eq!(hints.loading, Loading::Eager);
}

#[test]
fn test_bundled_demo_story_is_readable() {
    let story = story::demo();
    assert!(!story.pages.is_empty());
    assert!(story.pages.iter().any(|page| page.image().is_none()));
}
