//! Prints the platform and device report for this machine.
//!
//! ```text
//! RUST_LOG=clsession=info cargo run --example device_report --features opencl
//! RUST_LOG=clsession=info cargo run --example device_report --features opencl -- cpu
//! ```

use clsession_core::{backend::OpenClRuntime, ComputeSession, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() -> clsession_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clsession=info")),
        )
        .init();

    let prefer_accelerator = std::env::args().nth(1).as_deref() != Some("cpu");
    let config = SessionConfig::builder()
        .prefer_accelerator(prefer_accelerator)
        .verbose(true)
        .build();

    let session = ComputeSession::new(OpenClRuntime::new(), config)?;

    println!("=== Platforms ===");
    for report in session.platform_reports() {
        println!("{report}");
    }

    println!("=== {} devices ===", session.config().device_class());
    for report in session.device_reports() {
        println!("{report}");
    }

    println!("Selected device {:?}", session.device());
    Ok(())
}
