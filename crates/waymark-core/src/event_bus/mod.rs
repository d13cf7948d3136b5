//! # Event Bus Module
//!
//! Decoupled notification of editor state changes. The editor publishes an
//! `EditorEvent` after every completed marker, path, or dialog operation;
//! hosts subscribe with a filter or poll an async receiver.
//!
//! ```rust,ignore
//! use waymark_core::event_bus::{EditorEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let sub = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Marker]),
//!     |event| tracing::info!("{}", event.description()),
//! );
//! bus.unsubscribe(sub);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
