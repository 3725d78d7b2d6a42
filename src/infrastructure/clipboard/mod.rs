pub mod poller;
pub mod port;

pub use poller::ClipboardPoller;
pub use port::{Clock, ClipboardPort, SystemClipboard, SystemClock};
