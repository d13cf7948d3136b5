//! # Waymark Core
//!
//! Core types, errors, and events for Waymark.
//! Provides geographic value types, stable marker identities, the editor
//! error taxonomy, and the event bus the editor publishes to.

pub mod data;
pub mod error;
pub mod event_bus;

pub use data::{LatLng, LayerId, MarkerId};

pub use error::{EditorError, Error, Result};

pub use event_bus::{
    DialogEvent, DialogResolution, EditorEvent, EventBus, EventBusConfig, EventBusError,
    EventCategory, EventFilter, MarkerEvent, PathEvent, SubscriptionId,
};
