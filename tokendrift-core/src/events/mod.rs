//! Scan lifecycle events: handler trait, payload types, dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ScanEventHandler;
pub use types::{FileFailedEvent, ScanCompleteEvent, ScanProgressEvent, ScanStartedEvent};
