//! Device pickers.
//!
//! A picker looks at the class-filtered device list and returns the index
//! of the device to use, or `None`. `None` is always a selection failure;
//! pickers never filter by device class themselves. A picker that needs to
//! query devices returns the first query error instead of skipping the
//! device.

use super::extensions::device_extensions;
use crate::{error::Result, runtime::ComputeRuntime};

/// Extension tokens advertising GL sharing. The two are vendor spellings of
/// the same capability.
pub const GL_SHARING_EXTENSIONS: [&str; 2] = ["cl_khr_gl_sharing", "cl_APPLE_gl_sharing"];

/// Strategy choosing one device out of a list.
pub trait DevicePicker<R: ComputeRuntime> {
    /// Returns the index of the chosen device in `devices`.
    fn pick(&self, runtime: &R, devices: &[R::Device]) -> Result<Option<usize>>;
}

impl<R, F> DevicePicker<R> for F
where
    R: ComputeRuntime,
    F: Fn(&R, &[R::Device]) -> Option<usize>,
{
    fn pick(&self, runtime: &R, devices: &[R::Device]) -> Result<Option<usize>> {
        Ok(self(runtime, devices))
    }
}

/// Picks the first device. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDevice;

impl<R: ComputeRuntime> DevicePicker<R> for FirstDevice {
    fn pick(&self, _runtime: &R, devices: &[R::Device]) -> Result<Option<usize>> {
        Ok((!devices.is_empty()).then_some(0))
    }
}

/// Picks the first device advertising any of the given extensions.
#[derive(Debug, Clone)]
pub struct HasExtension {
    tokens: Vec<String>,
}

impl HasExtension {
    /// Matches a single extension token.
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            tokens: vec![token.into()],
        }
    }

    /// Matches any of several spellings of one capability.
    pub fn any_of<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl<R: ComputeRuntime> DevicePicker<R> for HasExtension {
    fn pick(&self, runtime: &R, devices: &[R::Device]) -> Result<Option<usize>> {
        for (index, &device) in devices.iter().enumerate() {
            let set = device_extensions(runtime, device)?;
            if self.tokens.iter().any(|t| set.contains(t)) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

/// Index of the first device that supports GL sharing.
///
/// Fails with the query error of the first device whose extensions cannot
/// be listed.
pub fn has_graphics_interop<R: ComputeRuntime>(
    runtime: &R,
    devices: &[R::Device],
) -> Result<Option<usize>> {
    HasExtension::any_of(GL_SHARING_EXTENSIONS).pick(runtime, devices)
}

/// Picks the first device that supports GL sharing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicsInterop;

impl<R: ComputeRuntime> DevicePicker<R> for GraphicsInterop {
    fn pick(&self, runtime: &R, devices: &[R::Device]) -> Result<Option<usize>> {
        has_graphics_interop(runtime, devices)
    }
}
