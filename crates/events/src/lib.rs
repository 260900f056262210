//! In-process change notifications for the captioning workbench.
//!
//! The controllers publish [`WorkbenchEvent`]s on an [`EventBus`]; a
//! presentation layer subscribes and re-renders from them, keeping all
//! control flow out of UI event handlers.

pub mod bus;

pub use bus::{EventBus, WorkbenchEvent};
