//! End-to-end poller tests: fake clipboard feeding the real store.

mod common;

use std::sync::Arc;
use std::time::Duration;

use clipkeeper::config::Setting;
use clipkeeper::infrastructure::clipboard::{ClipboardPoller, SystemClock};

use common::test_context;

#[tokio::test]
async fn test_observations_flow_into_the_store() {
    let (context, clipboard, _dir) = test_context(Setting::default());
    let poller = ClipboardPoller::new(
        clipboard.clone(),
        Arc::new(SystemClock),
        context.history.clone(),
        context.settings.clone(),
    );

    clipboard.set("first copy");
    assert!(poller.poll_once().await);
    assert_eq!(context.history.get_count().await, 1);

    // Same clipboard content on the next tick: no new observation
    assert!(!poller.poll_once().await);
    assert_eq!(context.history.get_count().await, 1);

    let entries = context.history.get_all_entries().await;
    assert_eq!(entries[0].content, "first copy");
    assert!(!entries[0].is_encrypted, "Poller stores with default options");
}

#[tokio::test]
async fn test_debounce_then_accept() {
    let (context, clipboard, _dir) = test_context(Setting::default());
    let poller = ClipboardPoller::new(
        clipboard.clone(),
        Arc::new(SystemClock),
        context.history.clone(),
        context.settings.clone(),
    );

    clipboard.set("one");
    assert!(poller.poll_once().await);

    // New content inside the debounce floor is skipped for now
    clipboard.set("two");
    assert!(!poller.poll_once().await);
    assert_eq!(context.history.get_count().await, 1);

    // After the floor elapses the same content is picked up
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(poller.poll_once().await);
    assert_eq!(context.history.get_count().await, 2);
}

#[tokio::test]
async fn test_whitespace_clipboard_is_ignored() {
    let (context, clipboard, _dir) = test_context(Setting::default());
    let poller = ClipboardPoller::new(
        clipboard.clone(),
        Arc::new(SystemClock),
        context.history.clone(),
        context.settings.clone(),
    );

    clipboard.set("  \n ");
    assert!(!poller.poll_once().await);
    assert_eq!(context.history.get_count().await, 0);
}
