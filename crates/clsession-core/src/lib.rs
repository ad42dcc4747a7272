//! Device selection and capability introspection for native compute runtimes.
//!
//! This crate discovers compute platforms and devices, selects one device
//! according to caller policy, builds the context and profiling command
//! queue bound to it, and provides tools for inspecting device capabilities
//! and binding argument lists to kernels.
//!
//! # Key Concepts
//!
//! - **Runtime**: the native host API, reached only through [`ComputeRuntime`]
//! - **Selection**: devices of one class are enumerated and a picker chooses one
//! - **Queries**: type-erased attribute queries that record failures instead of
//!   aborting a report
//! - **Session**: the platform, device, context and queue built together
//!
//! # Modules
//!
//! - [`backend`]: OpenCL implementation of the runtime (feature `opencl`)
//! - [`config`]: Session configuration and its builder
//! - [`context`]: Context properties, graphics interop and queue creation
//! - [`device`]: Extension listing, device pickers and the device selector
//! - [`error`]: Error types
//! - [`kernel_args`]: Positional kernel argument binding
//! - [`query`]: Attribute registry, value decoding and reports
//! - [`runtime`]: The native runtime boundary
//! - [`session`]: The compute session

pub mod backend;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod kernel_args;
pub mod query;
pub mod runtime;
pub mod session;
pub mod utils;

// Re-export commonly used items at the crate root
pub use config::{PlatformChoice, SessionConfig, SessionConfigBuilder};
pub use error::{NativeError, Result, SessionError};
pub use runtime::{ComputeRuntime, DeviceClass, PlatformParam};
pub use session::ComputeSession;

#[cfg(feature = "opencl")]
pub use backend::OpenClRuntime;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use clsession_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{PlatformChoice, SessionConfig, SessionConfigBuilder};
    pub use crate::context::{
        ContextBuilder, ContextProperties, InteropHandles, QueueProperties,
        SESSION_QUEUE_PROPERTIES,
    };
    pub use crate::device::{
        has_graphics_interop, DevicePicker, DeviceSelection, DeviceSelector, ExtensionSet,
        FirstDevice, GraphicsInterop, HasExtension,
    };
    pub use crate::error::{NativeError, Result, SessionError};
    pub use crate::kernel_args;
    pub use crate::kernel_args::{bind_kernel_args, KernelArg};
    pub use crate::query::{
        DeviceReport, ParamQuery, ParamValue, PlatformReport, ReportEntry, DEVICE_PARAMS,
    };
    pub use crate::runtime::{ComputeRuntime, DeviceClass, PlatformParam};
    pub use crate::session::ComputeSession;

    #[cfg(feature = "opencl")]
    pub use crate::backend::OpenClRuntime;
}
