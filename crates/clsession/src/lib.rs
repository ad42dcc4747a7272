//! Device selection and context setup for GPU compute runtimes.
//!
//! `clsession` picks a compute platform and device according to caller
//! policy, builds a context and a profiling command queue bound to that
//! device, and reports device capabilities along the way.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "opencl")]
//! # {
//! use clsession::prelude::*;
//!
//! let config = SessionConfig::builder()
//!     .prefer_accelerator(true)
//!     .verbose(true)
//!     .build();
//! let session = ComputeSession::with_picker(OpenClRuntime::new(), config, &GraphicsInterop)?;
//! # }
//! # Ok::<(), clsession::SessionError>(())
//! ```
//!
//! # Features
//!
//! - `opencl`: the OpenCL runtime
//! - `serde`: serialization of reports and configuration enums
//! - `test-utils`: the in-memory runtime used by the test suites

pub use clsession_core::*;

/// Convenient imports for sessions, pickers and reports.
pub mod prelude {
    pub use clsession_core::prelude::*;
}
