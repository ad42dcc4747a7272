//! Native runtime implementations.
//!
//! # Requirements
//!
//! - An OpenCL ICD loader and at least one installed platform
//! - Enable the `opencl` feature flag
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "opencl")]
//! # {
//! use clsession_core::{backend::OpenClRuntime, ComputeSession, SessionConfig};
//!
//! let config = SessionConfig::builder().verbose(true).build();
//! let session = ComputeSession::new(OpenClRuntime::new(), config).unwrap();
//! println!("using {:?}", session.device());
//! # }
//! ```

#[cfg(feature = "opencl")]
pub mod opencl;

#[cfg(feature = "opencl")]
pub use opencl::OpenClRuntime;
