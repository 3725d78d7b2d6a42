use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::config::ThemeMode;

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) usize);

/// Type-indexed observer bus.
///
/// Every event type gets its own listener list, keyed by `TypeId`. Publishing
/// is fire-and-forget: the store and services do not know how many shells
/// (main window, overlay, tray menu) are listening, or whether any are.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<HashMap<TypeId, Vec<(ListenerId, Arc<dyn Fn(&dyn Any) + Send + Sync>)>>>,
    next_listener_id: Mutex<usize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            next_listener_id: Mutex::new(0),
        }
    }

    /// Subscribe to events of type `E`.
    ///
    /// Returns a `ListenerId` usable with [`EventBus::unsubscribe`].
    pub fn subscribe<E, F>(&self, callback: F) -> ListenerId
    where
        E: 'static + Clone,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        let id = {
            let mut id_guard = self.next_listener_id.lock().unwrap();
            let id = ListenerId(*id_guard);
            *id_guard += 1;
            id
        };

        // Wrap the typed callback so it can live in the Any-keyed map
        let any_callback: Arc<dyn Fn(&dyn Any) + Send + Sync> = Arc::new(move |any| {
            if let Some(event) = any.downcast_ref::<E>() {
                callback(event);
            }
        });

        let mut listeners = self.listeners.write().unwrap();
        listeners
            .entry(type_id)
            .or_insert_with(Vec::new)
            .push((id, any_callback));

        id
    }

    /// Remove a listener.
    ///
    /// Returns `true` when a listener with the given id was found and removed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let mut found = false;

        for (_type_id, type_listeners) in listeners.iter_mut() {
            let before_len = type_listeners.len();
            type_listeners.retain(|(listener_id, _)| *listener_id != id);
            if type_listeners.len() < before_len {
                found = true;
            }
        }

        found
    }

    /// Publish an event to every listener registered for its type.
    pub fn publish<E>(&self, event: E)
    where
        E: 'static + Clone,
    {
        let type_id = TypeId::of::<E>();

        let listeners = self.listeners.read().unwrap();
        if let Some(type_listeners) = listeners.get(&type_id) {
            for (_, callback) in type_listeners {
                callback(&event);
            }
        }
    }
}

/// Published after any mutation of the history store.
///
/// Lost notifications are self-healing: shells re-read full state on the
/// next poll or user refresh.
#[derive(Clone)]
pub struct DataChangedEvent {
    /// Event time (Unix epoch milliseconds)
    pub timestamp: i64,
}

impl DataChangedEvent {
    pub fn now() -> Self {
        Self {
            timestamp: crate::utils::helpers::current_time_millis(),
        }
    }
}

/// Published when the user switches the theme.
#[derive(Clone)]
pub struct ThemeChangedEvent {
    pub mode: ThemeMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_and_publish() {
        let event_bus = EventBus::new();
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = called.clone();

        #[derive(Clone)]
        struct TestEvent(i32);

        let _id = event_bus.subscribe::<TestEvent, _>(move |event| {
            assert_eq!(event.0, 42);
            called_clone.store(true, Ordering::SeqCst);
        });

        event_bus.publish(TestEvent(42));
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_unsubscribe() {
        let event_bus = EventBus::new();
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = called.clone();

        #[derive(Clone)]
        struct TestEvent;

        let id = event_bus.subscribe::<TestEvent, _>(move |_| {
            called_clone.store(true, Ordering::SeqCst);
        });

        event_bus.unsubscribe(id);
        event_bus.publish(TestEvent);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_multiple_listeners_fan_out() {
        let event_bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = count.clone();
            event_bus.subscribe::<DataChangedEvent, _>(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        event_bus.publish(DataChangedEvent::now());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_multiple_event_types() {
        let event_bus = EventBus::new();
        let data_called = Arc::new(AtomicBool::new(false));
        let data_called_clone = data_called.clone();
        let theme_called = Arc::new(AtomicBool::new(false));
        let theme_called_clone = theme_called.clone();

        event_bus.subscribe::<DataChangedEvent, _>(move |_| {
            data_called_clone.store(true, Ordering::SeqCst);
        });
        event_bus.subscribe::<ThemeChangedEvent, _>(move |_| {
            theme_called_clone.store(true, Ordering::SeqCst);
        });

        event_bus.publish(DataChangedEvent::now());
        assert!(data_called.load(Ordering::SeqCst));
        assert!(!theme_called.load(Ordering::SeqCst));

        event_bus.publish(ThemeChangedEvent {
            mode: ThemeMode::Dark,
        });
        assert!(theme_called.load(Ordering::SeqCst));
    }
}
