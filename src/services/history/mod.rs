pub mod cache;
pub mod service;

pub use cache::QueryCache;
pub use service::HistoryService;
