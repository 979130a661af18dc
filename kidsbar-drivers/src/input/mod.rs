//! Navigation input

pub mod dispatch;

pub use dispatch::{InputDispatcher, EVENT_QUEUE_LEN};
