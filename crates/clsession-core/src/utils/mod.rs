//! Test support.

#[cfg(any(test, feature = "test-utils"))]
pub mod mock_runtime;
