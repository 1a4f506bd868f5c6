//! Infrastructure adapters: file-backed event log.

pub mod event_log;

pub use event_log::FileEventSink;
