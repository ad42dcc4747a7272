//! Boundary to the native compute runtime.
//!
//! Everything this crate does to the native API goes through the
//! [`ComputeRuntime`] trait: enumeration, raw attribute queries, context and
//! queue creation, and kernel argument binding. The OpenCL implementation
//! lives in [`crate::backend`]; an in-memory implementation for tests is
//! available with the `test-utils` feature.

use crate::{
    context::{ContextProperties, QueueProperties},
    error::NativeError,
    kernel_args::KernelArg,
};
use std::fmt;

/// Class of device requested from a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceClass {
    /// GPU-like accelerator devices
    Accelerator,
    /// General purpose CPU devices
    GeneralPurpose,
}

impl DeviceClass {
    /// Native device type bit for GPU devices.
    pub const GPU_BITS: u64 = 1 << 2;
    /// Native device type bit for CPU devices.
    pub const CPU_BITS: u64 = 1 << 1;

    /// Picks the class from an accelerator preference.
    pub fn from_preference(prefer_accelerator: bool) -> Self {
        if prefer_accelerator {
            Self::Accelerator
        } else {
            Self::GeneralPurpose
        }
    }

    /// Native device type bits for this class.
    pub fn native_bits(self) -> u64 {
        match self {
            Self::Accelerator => Self::GPU_BITS,
            Self::GeneralPurpose => Self::CPU_BITS,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accelerator => write!(f, "GPU"),
            Self::GeneralPurpose => write!(f, "CPU"),
        }
    }
}

/// Platform attributes that can be queried as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformParam {
    /// Platform name
    Name,
    /// Platform vendor
    Vendor,
    /// Supported API version
    Version,
    /// Full or embedded profile
    Profile,
    /// Space separated extension list
    Extensions,
}

impl PlatformParam {
    /// All platform attributes, in report order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Vendor,
        Self::Version,
        Self::Profile,
        Self::Extensions,
    ];

    /// Native attribute key.
    pub fn key(self) -> u32 {
        match self {
            Self::Profile => 0x0900,
            Self::Version => 0x0901,
            Self::Name => 0x0902,
            Self::Vendor => 0x0903,
            Self::Extensions => 0x0904,
        }
    }

    /// Native attribute name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "CL_PLATFORM_NAME",
            Self::Vendor => "CL_PLATFORM_VENDOR",
            Self::Version => "CL_PLATFORM_VERSION",
            Self::Profile => "CL_PLATFORM_PROFILE",
            Self::Extensions => "CL_PLATFORM_EXTENSIONS",
        }
    }
}

/// Host-side object model of a native compute runtime.
///
/// All calls are blocking. Implementations are not required to be
/// thread-safe; a session owns its runtime and uses it from one thread.
pub trait ComputeRuntime {
    /// Platform handle
    type Platform: Copy + fmt::Debug;
    /// Device handle
    type Device: Copy + fmt::Debug;
    /// Owned context
    type Context;
    /// Owned command queue
    type Queue;
    /// Compiled kernel
    type Kernel;

    /// Lists platforms in native enumeration order.
    fn platforms(&self) -> Result<Vec<Self::Platform>, NativeError>;

    /// Queries a textual platform attribute.
    fn platform_info(
        &self,
        platform: Self::Platform,
        param: PlatformParam,
    ) -> Result<String, NativeError>;

    /// Lists the platform's devices of one class, in native order.
    ///
    /// An empty class yields an empty list rather than an error.
    fn devices(
        &self,
        platform: Self::Platform,
        class: DeviceClass,
    ) -> Result<Vec<Self::Device>, NativeError>;

    /// Fetches the raw bytes of a device attribute.
    fn device_info(&self, device: Self::Device, key: u32) -> Result<Vec<u8>, NativeError>;

    /// Value embedded as the platform context property.
    fn raw_platform(&self, platform: Self::Platform) -> isize;

    /// Creates a context bound to exactly one device.
    fn create_context(
        &self,
        device: Self::Device,
        properties: &ContextProperties,
    ) -> Result<Self::Context, NativeError>;

    /// Creates a command queue on a context.
    fn create_queue(
        &self,
        context: &Self::Context,
        device: Self::Device,
        properties: QueueProperties,
    ) -> Result<Self::Queue, NativeError>;

    /// Binds one argument to a kernel parameter slot.
    fn set_kernel_arg(
        &self,
        kernel: &Self::Kernel,
        slot: u32,
        arg: &KernelArg<'_>,
    ) -> Result<(), NativeError>;
}

/// Lets a session borrow a runtime the caller keeps using.
impl<R: ComputeRuntime + ?Sized> ComputeRuntime for &R {
    type Platform = R::Platform;
    type Device = R::Device;
    type Context = R::Context;
    type Queue = R::Queue;
    type Kernel = R::Kernel;

    fn platforms(&self) -> Result<Vec<Self::Platform>, NativeError> {
        (**self).platforms()
    }

    fn platform_info(
        &self,
        platform: Self::Platform,
        param: PlatformParam,
    ) -> Result<String, NativeError> {
        (**self).platform_info(platform, param)
    }

    fn devices(
        &self,
        platform: Self::Platform,
        class: DeviceClass,
    ) -> Result<Vec<Self::Device>, NativeError> {
        (**self).devices(platform, class)
    }

    fn device_info(&self, device: Self::Device, key: u32) -> Result<Vec<u8>, NativeError> {
        (**self).device_info(device, key)
    }

    fn raw_platform(&self, platform: Self::Platform) -> isize {
        (**self).raw_platform(platform)
    }

    fn create_context(
        &self,
        device: Self::Device,
        properties: &ContextProperties,
    ) -> Result<Self::Context, NativeError> {
        (**self).create_context(device, properties)
    }

    fn create_queue(
        &self,
        context: &Self::Context,
        device: Self::Device,
        properties: QueueProperties,
    ) -> Result<Self::Queue, NativeError> {
        (**self).create_queue(context, device, properties)
    }

    fn set_kernel_arg(
        &self,
        kernel: &Self::Kernel,
        slot: u32,
        arg: &KernelArg<'_>,
    ) -> Result<(), NativeError> {
        (**self).set_kernel_arg(kernel, slot, arg)
    }
}
