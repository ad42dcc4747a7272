//! End-to-end session construction against the in-memory runtime.

use clsession::prelude::*;
use clsession::context::properties::keys;
use clsession::utils::mock_runtime::{MockDevice, MockDeviceId, MockRuntime};

/// One platform exposing one CPU and one GPU, CPU enumerated first.
fn workstation() -> (MockRuntime, MockDeviceId, MockDeviceId) {
    let mut runtime = MockRuntime::new();
    let platform = runtime.add_platform("Workstation");
    let cpu = runtime.add_device(
        platform,
        MockDevice::new("Ryzen", DeviceClass::GeneralPurpose).with_extensions("cl_khr_fp64"),
    );
    let gpu = runtime.add_device(
        platform,
        MockDevice::new("Radeon", DeviceClass::Accelerator)
            .with_extensions("cl_khr_fp64 cl_khr_gl_sharing"),
    );
    (runtime, cpu, gpu)
}

#[test]
fn test_accelerator_preferred() {
    let (runtime, _, gpu) = workstation();
    let config = SessionConfig::builder().prefer_accelerator(true).build();

    let session = ComputeSession::new(runtime, config).unwrap();
    assert_eq!(session.device(), gpu);
    assert_eq!(session.context().devices(), &[gpu]);
    assert_eq!(session.queue().device(), gpu);
    assert!(session
        .queue()
        .properties()
        .contains(QueueProperties::PROFILING_ENABLE));
}

#[test]
fn test_general_purpose_requested() {
    let (runtime, cpu, _) = workstation();
    let config = SessionConfig::builder().prefer_accelerator(false).build();

    let session = ComputeSession::new(runtime, config).unwrap();
    assert_eq!(session.device(), cpu);
    assert_eq!(session.runtime().device_name(session.device()), "Ryzen");
}

#[test]
fn test_never_picker_builds_nothing() {
    let (runtime, _, _) = workstation();
    let never = |_: &MockRuntime, _: &[MockDeviceId]| None;

    let err = ComputeSession::with_picker(runtime, SessionConfig::default(), &never).unwrap_err();
    assert!(err.is_selection());
    assert!(matches!(err, SessionError::Selection { .. }));
}

#[test]
fn test_never_picker_creates_no_context() {
    let (runtime, _, _) = workstation();
    let never = |_: &&MockRuntime, _: &[MockDeviceId]| -> Option<usize> { None };

    let err = ComputeSession::with_picker(&runtime, SessionConfig::default(), &never).unwrap_err();
    assert!(err.is_selection());
    assert_eq!(runtime.contexts_created(), 0);
}

#[test]
fn test_borrowed_runtime_session_creates_one_context() {
    let (runtime, _, gpu) = workstation();

    let session = ComputeSession::new(&runtime, SessionConfig::default()).unwrap();
    assert_eq!(session.device(), gpu);
    assert_eq!(runtime.contexts_created(), 1);
}

#[test]
fn test_unlistable_extensions_fail_interop_session() {
    let mut runtime = MockRuntime::new();
    let platform = runtime.add_platform("Mixed");
    runtime.add_device(platform, MockDevice::new("Unlisted", DeviceClass::Accelerator));
    runtime.add_device(
        platform,
        MockDevice::new("Radeon", DeviceClass::Accelerator).with_extensions("cl_khr_gl_sharing"),
    );

    let err = ComputeSession::with_picker(&runtime, SessionConfig::default(), &GraphicsInterop)
        .unwrap_err();
    match err {
        SessionError::Query { param, .. } => assert_eq!(param, "CL_DEVICE_EXTENSIONS"),
        other => panic!("expected query failure, got {other}"),
    }
    assert_eq!(runtime.contexts_created(), 0);
}

#[test]
fn test_graphics_interop_session() {
    let (runtime, _, gpu) = workstation();
    let config = SessionConfig::builder()
        .graphics_interop(InteropHandles::Glx {
            gl_context: 0xabc,
            display: 0xdef,
        })
        .build();

    let session = ComputeSession::with_picker(runtime, config, &GraphicsInterop).unwrap();
    assert_eq!(session.device(), gpu);

    let raw = session.context().properties().to_raw();
    assert_eq!(
        raw,
        vec![
            keys::GL_CONTEXT_KHR,
            0xabc,
            keys::GLX_DISPLAY_KHR,
            0xdef,
            keys::CONTEXT_PLATFORM,
            session.runtime().raw_platform(session.platform()),
            0,
        ]
    );
}

#[test]
fn test_interop_picker_without_sharing_device() {
    let mut runtime = MockRuntime::new();
    let platform = runtime.add_platform("Headless");
    runtime.add_device(
        platform,
        MockDevice::new("Tesla", DeviceClass::Accelerator).with_extensions("cl_khr_fp64"),
    );

    let err = ComputeSession::with_picker(runtime, SessionConfig::default(), &GraphicsInterop)
        .unwrap_err();
    assert!(err.is_selection());
}

#[test]
fn test_interop_requested_without_handles() {
    let (runtime, _, _) = workstation();
    let config = SessionConfig::builder()
        .request_graphics_interop(true)
        .build();

    let err = ComputeSession::new(runtime, config).unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn test_verbose_session_reports() {
    let (runtime, _, _) = workstation();
    let config = SessionConfig::builder().verbose(true).build();

    let session = ComputeSession::new(runtime, config).unwrap();
    assert_eq!(session.platform_reports().len(), 1);
    assert_eq!(session.device_reports().len(), 1);

    let report = &session.device_reports()[0];
    assert_eq!(report.get("CL_DEVICE_NAME").unwrap().value, "Radeon");
    // Only the name is answered by the mock; everything else degrades.
    assert_eq!(report.failed_count(), DEVICE_PARAMS.len() - 1);
    assert!(report.to_string().contains("\tcl_khr_gl_sharing\n"));
}
