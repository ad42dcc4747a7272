//! Session configuration.
//!
//! Everything that shapes session construction is passed in explicitly
//! through [`SessionConfig`]; there is no process-wide state.

use crate::{context::InteropHandles, runtime::DeviceClass};

/// Which platform a session uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlatformChoice {
    /// The first platform the runtime enumerates
    #[default]
    First,
    /// The platform at this enumeration index
    Index(usize),
    /// The first platform whose name contains this text, ignoring case
    Name(String),
}

/// Configuration for building a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Request GPU devices rather than CPU devices.
    pub prefer_accelerator: bool,
    /// Report every platform and candidate device while building.
    pub verbose: bool,
    /// Platform override.
    pub platform: PlatformChoice,
    /// Share objects with the current GL context.
    pub graphics_interop: bool,
    /// GL handles from the windowing layer, required when interop is on.
    pub interop_handles: Option<InteropHandles>,
}

impl SessionConfig {
    /// Device class implied by the accelerator preference.
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_preference(self.prefer_accelerator)
    }

    /// Starts a builder from the defaults.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prefer_accelerator: true,
            verbose: false,
            platform: PlatformChoice::First,
            graphics_interop: false,
            interop_handles: None,
        }
    }
}

/// Builder for creating a session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    /// Request GPU (`true`) or CPU (`false`) devices.
    pub fn prefer_accelerator(mut self, prefer: bool) -> Self {
        self.config.prefer_accelerator = prefer;
        self
    }

    /// Enable or disable the platform and device reports.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Use the platform at `index`.
    pub fn platform_index(mut self, index: usize) -> Self {
        self.config.platform = PlatformChoice::Index(index);
        self
    }

    /// Use the first platform whose name contains `name`.
    pub fn platform_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.platform = PlatformChoice::Name(name.into());
        self
    }

    /// Share objects with the GL context identified by `handles`.
    pub fn graphics_interop(mut self, handles: InteropHandles) -> Self {
        self.config.graphics_interop = true;
        self.config.interop_handles = Some(handles);
        self
    }

    /// Request interop without supplying handles yet.
    pub fn request_graphics_interop(mut self, requested: bool) -> Self {
        self.config.graphics_interop = requested;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
