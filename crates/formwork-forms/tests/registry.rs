//! The process-wide theme registry.
//!
//! Every test here replaces the global registry, so they hold `REGISTRY_LOCK`.

use std::sync::{Arc, Mutex, PoisonError};

use formwork_core::settings::{Settings, SETTINGS};
use formwork_forms::prelude::*;
use formwork_forms::theme::{self, initialize, initialize_from_settings};

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

fn container(default: &str, container_class: &str) -> ThemeContainer {
    let options = FieldOptions {
        container_class: Some(container_class.into()),
        ..FieldOptions::default()
    };
    ThemeContainer::default()
        .theme(default, ThemeConfig::new(options))
        .default_config(default)
}

fn render_job() -> String {
    let schema = FormSchema::builder("TextForm")
        .attribute("job", [TypeTag::String])
        .build();
    Field::text(&FormModel::new(&schema), "job")
        .unwrap()
        .use_container(true)
        .render()
}

#[test]
fn test_initialize_replaces_registry() {
    let _lock = REGISTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    initialize(container("first", "one"));
    assert_eq!(theme::current().default_name(), "first");
    assert!(render_job().starts_with(r#"<div class="one">"#));

    initialize(container("second", "two"));
    let current = theme::current();
    assert_eq!(current.default_name(), "second");
    assert!(current.get("first").is_none());
    assert!(current.get("second").is_some());
    assert!(render_job().starts_with(r#"<div class="two">"#));
}

#[test]
fn test_scoped_container_shadows_registry() {
    let _lock = REGISTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    initialize(container("global", "outer"));
    theme::scoped(Arc::new(container("local", "inner")), || {
        assert!(render_job().starts_with(r#"<div class="inner">"#));
    });
    assert!(render_job().starts_with(r#"<div class="outer">"#));
}

#[test]
fn test_initialize_from_settings() {
    let _lock = REGISTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    let dir = std::env::temp_dir().join(format!("formwork-registry-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plain.toml");
    std::fs::write(&path, "containerClass = \"plain\"\n").unwrap();

    let mut settings = Settings::default();
    settings.default_theme = "plain".to_string();
    settings.theme_files.insert("plain".to_string(), path);
    SETTINGS.configure(settings);

    initialize_from_settings().unwrap();
    let current = theme::current();
    assert_eq!(current.default_name(), "plain");
    assert!(current.enricher().is_some());
    assert!(render_job().starts_with(r#"<div class="plain">"#));

    std::fs::remove_dir_all(&dir).ok();
}
