//! Compute session: one platform, one device, one context and one queue.
//!
//! Construction runs platform selection, device selection and context
//! construction in that order. It either fully succeeds or returns an error;
//! a half-built session is never handed out.

use crate::{
    config::{PlatformChoice, SessionConfig},
    context::ContextBuilder,
    device::{DevicePicker, DeviceSelection, DeviceSelector, FirstDevice},
    error::{Result, SessionError},
    kernel_args::{bind_kernel_args, KernelArg},
    query::{DeviceReport, PlatformReport},
    runtime::{ComputeRuntime, PlatformParam},
};
use std::fmt;

/// A context and profiling queue bound to one selected device.
///
/// The session owns its runtime, context and queue; they are dropped
/// together.
pub struct ComputeSession<R: ComputeRuntime> {
    runtime: R,
    platform: R::Platform,
    device: R::Device,
    context: R::Context,
    queue: R::Queue,
    config: SessionConfig,
    platform_reports: Vec<PlatformReport>,
    device_reports: Vec<DeviceReport>,
}

impl<R: ComputeRuntime> ComputeSession<R> {
    /// Builds a session on the first device of the configured class.
    pub fn new(runtime: R, config: SessionConfig) -> Result<Self> {
        Self::with_picker(runtime, config, &FirstDevice)
    }

    /// Builds a session, letting `picker` choose among the class-filtered
    /// devices.
    pub fn with_picker<P>(runtime: R, config: SessionConfig, picker: &P) -> Result<Self>
    where
        P: DevicePicker<R> + ?Sized,
    {
        let (platform, platform_reports) = select_platform(&runtime, &config)?;

        let DeviceSelection {
            device,
            reports: device_reports,
            ..
        } = DeviceSelector::new(&runtime, config.device_class())
            .verbose(config.verbose)
            .select_with(platform, picker)?;

        let (context, queue) = ContextBuilder::new(&runtime)
            .graphics_interop(config.graphics_interop, config.interop_handles)
            .build(platform, device)?;

        Ok(Self {
            runtime,
            platform,
            device,
            context,
            queue,
            config,
            platform_reports,
            device_reports,
        })
    }

    /// Runtime the session was built on.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Selected platform.
    pub fn platform(&self) -> R::Platform {
        self.platform
    }

    /// Selected device.
    pub fn device(&self) -> R::Device {
        self.device
    }

    /// Context bound to the selected device.
    pub fn context(&self) -> &R::Context {
        &self.context
    }

    /// Profiling command queue on the context.
    pub fn queue(&self) -> &R::Queue {
        &self.queue
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Platform reports gathered during construction. Empty unless verbose.
    pub fn platform_reports(&self) -> &[PlatformReport] {
        &self.platform_reports
    }

    /// Device reports gathered during construction. Empty unless verbose.
    pub fn device_reports(&self) -> &[DeviceReport] {
        &self.device_reports
    }

    /// Binds `args` to `kernel` positionally.
    pub fn set_args(&self, kernel: &R::Kernel, args: &[KernelArg<'_>]) -> Result<()> {
        bind_kernel_args(&self.runtime, kernel, args)
    }

    /// Releases the session, returning the runtime.
    pub fn into_runtime(self) -> R {
        self.runtime
    }
}

impl<R: ComputeRuntime> fmt::Debug for ComputeSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeSession")
            .field("platform", &self.platform)
            .field("device", &self.device)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Enumerates platforms, reports them if verbose, and applies the
/// configured platform choice.
fn select_platform<R: ComputeRuntime>(
    runtime: &R,
    config: &SessionConfig,
) -> Result<(R::Platform, Vec<PlatformReport>)> {
    let platforms = runtime
        .platforms()
        .map_err(|err| SessionError::construction("platform list", err))?;
    tracing::debug!(count = platforms.len(), "enumerated platforms");
    if platforms.is_empty() {
        return Err(SessionError::selection("no compute platforms available"));
    }

    let reports = if config.verbose {
        platforms
            .iter()
            .map(|&platform| {
                let report = PlatformReport::collect(runtime, platform);
                tracing::info!(target: "clsession::report", "{report}");
                report
            })
            .collect()
    } else {
        Vec::new()
    };

    let platform = match &config.platform {
        PlatformChoice::First => platforms[0],
        PlatformChoice::Index(index) => *platforms.get(*index).ok_or_else(|| {
            SessionError::selection(format!(
                "platform index {index} requested but only {} platforms exist",
                platforms.len()
            ))
        })?,
        PlatformChoice::Name(name) => {
            let needle = name.to_lowercase();
            platforms
                .iter()
                .copied()
                .find(|&platform| {
                    runtime
                        .platform_info(platform, PlatformParam::Name)
                        .map(|found| found.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
                .ok_or_else(|| {
                    SessionError::selection(format!("no platform named like '{name}'"))
                })?
        }
    };

    tracing::info!(platform = ?platform, "selected platform");
    Ok((platform, reports))
}
