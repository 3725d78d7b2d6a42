//! Integration tests for the command/query surface: degraded mode, input
//! clamping, cache behavior and change notifications.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serial_test::serial;

use clipkeeper::config::{Setting, SettingPatch, ThemeMode};
use clipkeeper::core::event_bus::{DataChangedEvent, EventBus, ThemeChangedEvent};
use clipkeeper::error::AppError;
use clipkeeper::infrastructure::storage::AddOptions;
use clipkeeper::services::HistoryService;

use common::{test_context, FakeClipboard};

/// Service without a store: every call degrades instead of failing.
fn detached_service() -> (HistoryService, Arc<EventBus>) {
    let event_bus = Arc::new(EventBus::new());
    let service = HistoryService::new(
        None,
        Arc::new(FakeClipboard::new()),
        event_bus.clone(),
        Arc::new(RwLock::new(Setting::default())),
    );
    (service, event_bus)
}

#[tokio::test]
async fn test_absent_store_degrades_to_defaults() {
    let (service, _bus) = detached_service();

    assert!(service.add_entry("text", AddOptions::default()).await.is_none());
    assert!(service.get_all_entries().await.is_empty());
    assert!(service.get_recent_entries(Some(10)).await.is_empty());
    assert!(service.search_entries("x").await.is_empty());
    assert!(service.get_entry(1).await.is_none());
    assert_eq!(service.get_count().await, 0);
    assert!(!service.delete_entry(1).await);
    assert!(!service.toggle_favorite(1).await);
    assert!(!service.clear_all_entries().await);
    assert!(service.get_categories().await.is_empty());
    assert!(service.create_category("X", None, None).await.is_none());

    let result = service.decrypt_entry(1, "pw", None).await;
    assert!(matches!(result, Err(AppError::Storage(_))));
}

#[tokio::test]
async fn test_mutations_publish_data_changed() {
    let (context, _clipboard, _dir) = test_context(Setting::default());
    let notifications = Arc::new(AtomicUsize::new(0));

    let counter = notifications.clone();
    context.event_bus.subscribe::<DataChangedEvent, _>(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let id = context
        .history
        .add_entry("notify me", AddOptions::default())
        .await
        .expect("add should succeed");
    assert_eq!(notifications.load(Ordering::SeqCst), 1);

    context.history.toggle_favorite(id).await;
    assert_eq!(notifications.load(Ordering::SeqCst), 2);

    context.history.rename_entry(id, Some("named")).await;
    assert_eq!(notifications.load(Ordering::SeqCst), 3);

    context.history.delete_entry(id).await;
    assert_eq!(notifications.load(Ordering::SeqCst), 4);

    // A failed mutation notifies nobody
    assert!(!context.history.delete_entry(id).await);
    assert_eq!(notifications.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_page_size_is_clamped() {
    let (context, _clipboard, _dir) = test_context(Setting::default());

    for i in 0..3 {
        context
            .history
            .add_entry(&format!("entry {}", i), AddOptions::default())
            .await
            .expect("add should succeed");
    }

    // A nonsensical page size is clamped up to one entry, not zero
    let one = context.history.get_recent_entries(Some(0)).await;
    assert_eq!(one.len(), 1);

    let all = context.history.get_recent_entries(Some(-7)).await;
    assert_eq!(all.len(), 1);

    // Default page size applies when no limit is requested
    let defaulted = context.history.get_recent_entries(None).await;
    assert_eq!(defaulted.len(), 3);
}

#[tokio::test]
async fn test_entries_with_categories_cache_and_invalidation() {
    let (context, _clipboard, _dir) = test_context(Setting::default());

    context
        .history
        .add_entry("first", AddOptions::default())
        .await
        .expect("add should succeed");
    let view = context.history.get_entries_with_categories().await;
    assert_eq!(view.len(), 1);

    // A write that bypasses the service is invisible while the cache is warm
    context
        .store
        .add_entry("behind the cache", AddOptions::default())
        .await
        .unwrap();
    let cached = context.history.get_entries_with_categories().await;
    assert_eq!(cached.len(), 1);

    // Any service mutation invalidates, so the next read sees everything
    context
        .history
        .add_entry("third", AddOptions::default())
        .await
        .expect("add should succeed");
    let fresh = context.history.get_entries_with_categories().await;
    assert_eq!(fresh.len(), 3);
}

#[tokio::test]
async fn test_copy_entry_writes_to_clipboard() {
    let (context, clipboard, _dir) = test_context(Setting::default());

    let id = context
        .history
        .add_entry("copy me back", AddOptions::default())
        .await
        .unwrap();

    assert!(context.history.copy_entry(id).await);
    assert_eq!(clipboard.current(), "copy me back");

    assert!(!context.history.copy_entry(99_999).await);
}

#[tokio::test]
async fn test_decrypt_via_service() {
    let (context, _clipboard, _dir) = test_context(Setting::default());

    let id = context
        .history
        .add_entry(
            "service secret",
            AddOptions {
                encrypt: true,
                password: Some("pw".to_string()),
                title: None,
            },
        )
        .await
        .unwrap();

    let plaintext = context.history.decrypt_entry(id, "pw", None).await.unwrap();
    assert_eq!(plaintext, "service secret");

    let failure = context.history.decrypt_entry(id, "nope", None).await;
    assert!(matches!(failure, Err(AppError::Encryption(_))));
}

#[tokio::test]
#[serial]
async fn test_update_settings_clamps_and_persists() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let setting_path = temp_dir.path().join("settings.json");
    std::env::set_var("CLIPKEEPER_SETTING_PATH", &setting_path);

    let (context, _clipboard, _dir) = test_context(Setting::default());

    assert!(context.history.update_settings(SettingPatch {
        clipboard_check_interval: Some(500),
        max_entries: Some(50_000),
        ..Default::default()
    }));

    let settings = context.history.get_settings();
    assert_eq!(settings.clipboard_check_interval, 1_000);
    assert_eq!(settings.max_entries, 10_000);

    // Persisted to disk with the clamped values
    let reloaded = Setting::load(Some(setting_path)).unwrap();
    assert_eq!(reloaded.clipboard_check_interval, 1_000);
    assert_eq!(reloaded.max_entries, 10_000);

    std::env::remove_var("CLIPKEEPER_SETTING_PATH");
}

#[tokio::test]
#[serial]
async fn test_theme_change_notifies_shells() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let setting_path = temp_dir.path().join("settings.json");
    std::env::set_var("CLIPKEEPER_SETTING_PATH", &setting_path);

    let (context, _clipboard, _dir) = test_context(Setting::default());

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    context.event_bus.subscribe::<ThemeChangedEvent, _>(move |event| {
        assert_eq!(event.mode, ThemeMode::Dark);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(context.history.get_theme_mode(), ThemeMode::Light);
    assert!(context.history.set_theme_mode(ThemeMode::Dark));
    assert_eq!(context.history.get_theme_mode(), ThemeMode::Dark);
    assert_eq!(notified.load(Ordering::SeqCst), 1);

    std::env::remove_var("CLIPKEEPER_SETTING_PATH");
}
