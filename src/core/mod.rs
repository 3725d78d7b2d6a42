pub mod context;
pub mod event_bus;

pub use context::AppContext;
pub use event_bus::{DataChangedEvent, EventBus, ListenerId, ThemeChangedEvent};
