//! Diagnostic reports for platforms and devices.

use super::{ParamQuery, FAILED};
use crate::{
    device::extensions::device_extensions,
    runtime::{ComputeRuntime, PlatformParam},
};
use std::fmt;

/// One formatted attribute line of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportEntry {
    /// Native attribute name
    pub name: String,
    /// Formatted value, or `-failed-`
    pub value: String,
    /// Whether the query failed
    pub failed: bool,
}

impl From<&ParamQuery> for ReportEntry {
    fn from(query: &ParamQuery) -> Self {
        Self {
            name: query.name().to_string(),
            value: query.format(),
            failed: query.failed(),
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\t{}", self.name, self.value)
    }
}

/// Attributes of one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformReport {
    /// Platform handle, as printed by the runtime
    pub platform: String,
    /// One entry per platform attribute
    pub entries: Vec<ReportEntry>,
}

impl PlatformReport {
    /// Queries every platform attribute.
    pub fn collect<R: ComputeRuntime>(runtime: &R, platform: R::Platform) -> Self {
        let entries = PlatformParam::ALL
            .iter()
            .map(|&param| match runtime.platform_info(platform, param) {
                Ok(value) => ReportEntry {
                    name: param.name().to_string(),
                    value,
                    failed: false,
                },
                Err(err) => {
                    tracing::debug!(param = param.name(), error = %err, "platform query failed");
                    ReportEntry {
                        name: param.name().to_string(),
                        value: FAILED.to_string(),
                        failed: true,
                    }
                }
            })
            .collect();

        Self {
            platform: format!("{platform:?}"),
            entries,
        }
    }

    /// Finds an entry by attribute name.
    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl fmt::Display for PlatformReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "platform {}", self.platform)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Attributes and extensions of one device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceReport {
    /// Device handle, as printed by the runtime
    pub device: String,
    /// One entry per queried attribute, in query order
    pub entries: Vec<ReportEntry>,
    /// Extension tokens, or `None` if they could not be listed
    pub extensions: Option<Vec<String>>,
}

impl DeviceReport {
    /// Runs every query against `device` and collects the results.
    pub fn collect<R: ComputeRuntime>(
        runtime: &R,
        device: R::Device,
        queries: &mut [ParamQuery],
    ) -> Self {
        let entries = queries
            .iter_mut()
            .map(|query| {
                query.query(runtime, device);
                ReportEntry::from(&*query)
            })
            .collect();

        let extensions = match device_extensions(runtime, device) {
            Ok(set) => Some(set.into_iter().collect()),
            Err(err) => {
                tracing::debug!(device = ?device, error = %err, "extension listing failed");
                None
            }
        };

        Self {
            device: format!("{device:?}"),
            entries,
            extensions,
        }
    }

    /// Finds an entry by attribute name.
    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of attributes whose query failed.
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.failed).count()
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "device {}", self.device)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        match &self.extensions {
            Some(extensions) => {
                writeln!(f, "CL_DEVICE_EXTENSIONS:")?;
                for ext in extensions {
                    writeln!(f, "\t{ext}")?;
                }
            }
            None => writeln!(f, "CL_DEVICE_EXTENSIONS:\t{FAILED}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::{keys, params::find_param},
        runtime::DeviceClass,
        utils::mock_runtime::{MockDevice, MockRuntime},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_device_report_format() {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("Mock Platform");
        let device = runtime.add_device(
            platform,
            MockDevice::new("Tahiti", DeviceClass::Accelerator)
                .with_uint(keys::DEVICE_MAX_COMPUTE_UNITS, 32)
                .with_extensions("cl_khr_fp64 cl_khr_gl_sharing\0\0"),
        );

        let mut queries = vec![
            ParamQuery::new(*find_param(keys::DEVICE_NAME).unwrap()),
            ParamQuery::new(*find_param(keys::DEVICE_MAX_COMPUTE_UNITS).unwrap()),
            ParamQuery::new(*find_param(keys::DEVICE_GLOBAL_MEM_SIZE).unwrap()),
        ];
        let report = DeviceReport::collect(&runtime, device, &mut queries);

        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.to_string(),
            format!(
                "device {device:?}\n\
                 CL_DEVICE_NAME:\tTahiti\n\
                 CL_DEVICE_MAX_COMPUTE_UNITS:\t32\n\
                 CL_DEVICE_GLOBAL_MEM_SIZE:\t-failed-\n\
                 CL_DEVICE_EXTENSIONS:\n\
                 \tcl_khr_fp64\n\
                 \tcl_khr_gl_sharing\n"
            )
        );
    }

    #[test]
    fn test_device_report_without_extensions() {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("Mock Platform");
        let device = runtime.add_device(platform, MockDevice::new("Bare", DeviceClass::GeneralPurpose));

        let report = DeviceReport::collect(&runtime, device, &mut []);
        assert!(report.extensions.is_none());
        assert!(report.to_string().ends_with("CL_DEVICE_EXTENSIONS:\t-failed-\n"));
    }

    #[test]
    fn test_platform_report() {
        let mut runtime = MockRuntime::new();
        let platform = runtime.add_platform("Mock Platform");

        let report = PlatformReport::collect(&runtime, platform);
        assert_eq!(report.entries.len(), 5);
        assert_eq!(report.get("CL_PLATFORM_NAME").unwrap().value, "Mock Platform");
        assert!(!report.get("CL_PLATFORM_VERSION").unwrap().failed);
        assert!(report.to_string().starts_with(&format!("platform {platform:?}\n")));
    }
}
