//! Context and command queue setup for a selected device.

pub mod builder;
pub mod properties;

pub use builder::{ContextBuilder, SESSION_QUEUE_PROPERTIES};
pub use properties::{ContextProperties, InteropHandles, QueueProperties};
