//! Serialization of reports and configuration enums.

#![cfg(feature = "serde")]

use clsession::prelude::*;
use clsession::utils::mock_runtime::{MockDevice, MockRuntime};
use clsession::query::keys;
use pretty_assertions::assert_eq;

#[test]
fn test_device_report_roundtrip() {
    let mut runtime = MockRuntime::new();
    let platform = runtime.add_platform("Mock");
    runtime.add_device(
        platform,
        MockDevice::new("gpu0", DeviceClass::Accelerator)
            .with_uint(keys::DEVICE_MAX_COMPUTE_UNITS, 20)
            .with_extensions("cl_khr_fp64"),
    );

    let config = SessionConfig::builder().verbose(true).build();
    let session = ComputeSession::new(runtime, config).unwrap();
    let report = &session.device_reports()[0];

    let json = serde_json::to_string(report).unwrap();
    let back: DeviceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, report);
    assert_eq!(back.get("CL_DEVICE_MAX_COMPUTE_UNITS").unwrap().value, "20");
}

#[test]
fn test_platform_report_fields() {
    let mut runtime = MockRuntime::new();
    let platform = runtime.add_platform("Mock");
    let report = PlatformReport::collect(&runtime, platform);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["entries"][0]["name"], "CL_PLATFORM_NAME");
    assert_eq!(value["entries"][0]["value"], "Mock");
    assert_eq!(value["entries"][0]["failed"], false);
}

#[test]
fn test_config_enums() {
    let json = serde_json::to_string(&DeviceClass::Accelerator).unwrap();
    assert_eq!(json, "\"Accelerator\"");

    let choice: PlatformChoice = serde_json::from_str("{\"Index\":1}").unwrap();
    assert_eq!(choice, PlatformChoice::Index(1));
}
