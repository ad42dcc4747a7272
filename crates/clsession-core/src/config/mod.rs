//! Configuration for session construction.

pub mod session;

// Re-export key items
pub use session::{PlatformChoice, SessionConfig, SessionConfigBuilder};
