//! Context and command queue construction.

use super::properties::{ContextProperties, InteropHandles, QueueProperties};
use crate::{
    error::{Result, SessionError},
    runtime::ComputeRuntime,
};

/// Properties of every queue a session creates. Profiling is always on so
/// callers can read event timestamps.
pub const SESSION_QUEUE_PROPERTIES: QueueProperties = QueueProperties::PROFILING_ENABLE;

/// Builds the context and queue for a selected device.
#[derive(Debug)]
pub struct ContextBuilder<'r, R: ComputeRuntime> {
    runtime: &'r R,
    interop_requested: bool,
    interop: Option<InteropHandles>,
}

impl<'r, R: ComputeRuntime> ContextBuilder<'r, R> {
    /// Creates a builder without graphics interop.
    pub fn new(runtime: &'r R) -> Self {
        Self {
            runtime,
            interop_requested: false,
            interop: None,
        }
    }

    /// Requests graphics interop with the handles from the windowing layer.
    pub fn graphics_interop(mut self, requested: bool, handles: Option<InteropHandles>) -> Self {
        self.interop_requested = requested;
        self.interop = handles;
        self
    }

    /// Assembles the context properties for `platform`.
    pub fn properties(&self, platform: R::Platform) -> Result<ContextProperties> {
        let raw_platform = self.runtime.raw_platform(platform);
        if !self.interop_requested {
            return Ok(ContextProperties::for_platform(raw_platform, None));
        }

        let handles = self.interop.as_ref().ok_or_else(|| {
            SessionError::invalid_construction(
                "context",
                "graphics interop requested but no GL handles were supplied",
            )
        })?;
        tracing::warn!(?handles, "embedding GL sharing handles in context properties");
        Ok(ContextProperties::for_platform(raw_platform, Some(handles)))
    }

    /// Creates a context bound to `device` and one profiling queue on it.
    pub fn build(&self, platform: R::Platform, device: R::Device) -> Result<(R::Context, R::Queue)> {
        let properties = self.properties(platform)?;

        let context = self
            .runtime
            .create_context(device, &properties)
            .map_err(|err| SessionError::construction("context", err))?;
        tracing::info!(device = ?device, interop = properties.has_interop(), "created context");

        let queue = self
            .runtime
            .create_queue(&context, device, SESSION_QUEUE_PROPERTIES)
            .map_err(|err| SessionError::construction("command queue", err))?;
        tracing::info!(device = ?device, "created profiling command queue");

        Ok((context, queue))
    }
}
