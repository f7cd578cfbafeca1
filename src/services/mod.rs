//! Side-channel services invoked by the HTTP handlers.

pub mod notifier;
