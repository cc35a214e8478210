//! Realtime audio output.

mod output;

pub use output::{CpalRenderer, MESSAGE_QUEUE_SIZE};
