//! Device enumeration and selection.
//!
//! The selector lists a platform's devices of one class, optionally runs
//! the full attribute report over them, and hands the list to a picker.
//! An empty list, or a picker that finds nothing, fails the selection;
//! there is no fallback to another device class.

use super::predicates::{DevicePicker, FirstDevice};
use crate::{
    error::{Result, SessionError},
    query::{DeviceReport, ParamQuery, ParamSpec, DEVICE_PARAMS},
    runtime::{ComputeRuntime, DeviceClass, PlatformParam},
};

/// Outcome of a successful selection.
#[derive(Debug, Clone)]
pub struct DeviceSelection<D> {
    /// The chosen device
    pub device: D,
    /// Its position in the class-filtered enumeration
    pub index: usize,
    /// Number of devices of the requested class
    pub candidates: usize,
    /// Reports for every enumerated device, when verbose
    pub reports: Vec<DeviceReport>,
}

/// Selects one device of a class from a platform.
#[derive(Debug)]
pub struct DeviceSelector<'r, R: ComputeRuntime> {
    runtime: &'r R,
    class: DeviceClass,
    verbose: bool,
    params: &'r [ParamSpec],
}

impl<'r, R: ComputeRuntime> DeviceSelector<'r, R> {
    /// Creates a selector for one device class.
    pub fn new(runtime: &'r R, class: DeviceClass) -> Self {
        Self {
            runtime,
            class,
            verbose: false,
            params: DEVICE_PARAMS,
        }
    }

    /// Enables the per-device attribute report.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replaces the attributes included in the report.
    pub fn with_params(mut self, params: &'r [ParamSpec]) -> Self {
        self.params = params;
        self
    }

    /// Requested device class.
    pub fn class(&self) -> DeviceClass {
        self.class
    }

    /// Lists the platform's devices of the requested class.
    pub fn enumerate(&self, platform: R::Platform) -> Result<Vec<R::Device>> {
        let devices = self.runtime.devices(platform, self.class).map_err(|err| {
            SessionError::construction(format!("{} device list", self.class), err)
        })?;
        tracing::debug!(class = %self.class, count = devices.len(), "enumerated devices");
        Ok(devices)
    }

    /// Platform name for messages, or its handle when the name is unavailable.
    fn platform_label(&self, platform: R::Platform) -> String {
        match self.runtime.platform_info(platform, PlatformParam::Name) {
            Ok(name) if !name.is_empty() => format!("'{name}'"),
            _ => format!("{platform:?}"),
        }
    }

    /// Builds a report for every device.
    pub fn report(&self, devices: &[R::Device]) -> Vec<DeviceReport> {
        devices
            .iter()
            .map(|&device| {
                let mut queries: Vec<ParamQuery> =
                    self.params.iter().copied().map(ParamQuery::new).collect();
                let report = DeviceReport::collect(self.runtime, device, &mut queries);
                tracing::info!(target: "clsession::report", "{report}");
                report
            })
            .collect()
    }

    /// Selects the first device of the class.
    pub fn select(&self, platform: R::Platform) -> Result<DeviceSelection<R::Device>> {
        self.select_with(platform, &FirstDevice)
    }

    /// Selects a device with a custom picker.
    pub fn select_with<P>(
        &self,
        platform: R::Platform,
        picker: &P,
    ) -> Result<DeviceSelection<R::Device>>
    where
        P: DevicePicker<R> + ?Sized,
    {
        let devices = self.enumerate(platform)?;
        if devices.is_empty() {
            return Err(SessionError::selection(format!(
                "no {} devices on platform {}",
                self.class,
                self.platform_label(platform)
            )));
        }

        let reports = if self.verbose {
            self.report(&devices)
        } else {
            Vec::new()
        };

        let index = picker.pick(self.runtime, &devices)?.ok_or_else(|| {
            SessionError::selection(format!(
                "failed to find requested device among {} {} devices on platform {}",
                devices.len(),
                self.class,
                self.platform_label(platform)
            ))
        })?;
        let device = *devices.get(index).ok_or_else(|| {
            SessionError::selection(format!(
                "picker chose device {index} but only {} {} devices exist on platform {}",
                devices.len(),
                self.class,
                self.platform_label(platform)
            ))
        })?;

        tracing::info!(device = ?device, index, class = %self.class, "selected device");
        Ok(DeviceSelection {
            device,
            index,
            candidates: devices.len(),
            reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        device::predicates::GraphicsInterop,
        query::keys,
        utils::mock_runtime::{MockDevice, MockDeviceId, MockRuntime},
    };

    fn mixed_platform() -> (MockRuntime, crate::utils::mock_runtime::MockPlatformId) {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("Mock Platform");
        runtime.add_device(platform, MockDevice::new("cpu0", DeviceClass::GeneralPurpose));
        runtime.add_device(
            platform,
            MockDevice::new("gpu0", DeviceClass::Accelerator).with_extensions("cl_khr_fp64"),
        );
        runtime.add_device(
            platform,
            MockDevice::new("gpu1", DeviceClass::Accelerator).with_extensions("cl_khr_gl_sharing"),
        );
        (runtime, platform)
    }

    #[test]
    fn test_default_picks_first_of_class() {
        let (runtime, platform) = mixed_platform();

        let selection = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select(platform)
            .unwrap();
        assert_eq!(runtime.device_name(selection.device), "gpu0");
        assert_eq!(selection.index, 0);
        assert_eq!(selection.candidates, 2);
        assert!(selection.reports.is_empty());

        let selection = DeviceSelector::new(&runtime, DeviceClass::GeneralPurpose)
            .select(platform)
            .unwrap();
        assert_eq!(runtime.device_name(selection.device), "cpu0");
    }

    #[test]
    fn test_picker_sees_only_class() {
        let (runtime, platform) = mixed_platform();
        let seen = |rt: &MockRuntime, devices: &[MockDeviceId]| {
            assert!(devices.iter().all(|&d| rt.device_name(d).starts_with("gpu")));
            Some(devices.len() - 1)
        };

        let selection = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select_with(platform, &seen)
            .unwrap();
        assert_eq!(runtime.device_name(selection.device), "gpu1");
    }

    #[test]
    fn test_graphics_interop_picker() {
        let (runtime, platform) = mixed_platform();
        let selection = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select_with(platform, &GraphicsInterop)
            .unwrap();
        assert_eq!(selection.index, 1);
    }

    #[test]
    fn test_empty_class_fails() {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("CPU only");
        runtime.add_device(platform, MockDevice::new("cpu0", DeviceClass::GeneralPurpose));

        let always = |_: &MockRuntime, _: &[MockDeviceId]| Some(0);
        let err = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select_with(platform, &always)
            .unwrap_err();
        assert!(err.is_selection());
    }

    #[test]
    fn test_picker_none_fails() {
        let (runtime, platform) = mixed_platform();
        let never = |_: &MockRuntime, _: &[MockDeviceId]| None;
        let err = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select_with(platform, &never)
            .unwrap_err();
        assert!(err.is_selection());
        assert!(err.to_string().contains("failed to find requested device"));
        assert!(err.to_string().contains("'Mock Platform'"));
    }

    #[test]
    fn test_failure_messages_name_the_platform() {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("Portable Runtime");
        runtime.add_device(platform, MockDevice::new("cpu0", DeviceClass::GeneralPurpose));

        let err = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select(platform)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Device selection failed: no GPU devices on platform 'Portable Runtime'"
        );
    }

    #[test]
    fn test_picker_query_error_propagates() {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("Mock Platform");
        // No extension list registered, so listing gpu0's extensions fails.
        runtime.add_device(platform, MockDevice::new("gpu0", DeviceClass::Accelerator));
        runtime.add_device(
            platform,
            MockDevice::new("gpu1", DeviceClass::Accelerator).with_extensions("cl_khr_gl_sharing"),
        );

        let err = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select_with(platform, &GraphicsInterop)
            .unwrap_err();
        assert!(!err.is_selection());
        assert!(matches!(err, SessionError::Query { .. }));
    }

    #[test]
    fn test_picker_out_of_range_fails() {
        let (runtime, platform) = mixed_platform();
        let beyond = |_: &MockRuntime, devices: &[MockDeviceId]| Some(devices.len());
        let err = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select_with(platform, &beyond)
            .unwrap_err();
        assert!(err.is_selection());
    }

    #[test]
    fn test_verbose_reports_every_device() {
        let (runtime, platform) = mixed_platform();
        let selection = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .verbose(true)
            .select(platform)
            .unwrap();

        assert_eq!(selection.reports.len(), 2);
        let report = &selection.reports[1];
        assert_eq!(report.get("CL_DEVICE_NAME").unwrap().value, "gpu1");
        assert_eq!(report.entries.len(), DEVICE_PARAMS.len());
        assert_eq!(
            report.extensions.as_deref(),
            Some(&["cl_khr_gl_sharing".to_string()][..])
        );
    }

    #[test]
    fn test_custom_report_params() {
        let (runtime, platform) = mixed_platform();
        let params = [*crate::query::params::find_param(keys::DEVICE_NAME).unwrap()];
        let selection = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .verbose(true)
            .with_params(&params)
            .select(platform)
            .unwrap();
        assert!(selection.reports.iter().all(|r| r.entries.len() == 1));
    }

    #[test]
    fn test_enumeration_failure_is_construction_error() {
        let (mut runtime, platform) = mixed_platform();
        runtime.fail_device_listing(true);
        let err = DeviceSelector::new(&runtime, DeviceClass::Accelerator)
            .select(platform)
            .unwrap_err();
        assert!(err.is_construction());
    }
}
