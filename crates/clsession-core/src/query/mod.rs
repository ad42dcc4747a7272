//! Type-erased device attribute queries.
//!
//! A [`ParamQuery`] is created from a static [`ParamSpec`], fetches the raw
//! bytes of its attribute from a device, and decodes them according to the
//! attribute's [`ValueKind`]. A failed fetch or decode is recorded on the
//! query instead of being returned, so one bad attribute never aborts a
//! report. Queries are reporting-only and never influence selection.

pub mod flags;
pub mod params;
pub mod report;
pub mod value;

pub use flags::{decode_flags, DecodedFlags, FlagTable};
pub use params::{keys, ParamSpec, DEVICE_PARAMS};
pub use report::{DeviceReport, PlatformReport, ReportEntry};
pub use value::{ParamValue, ValueKind, Width};

use crate::runtime::ComputeRuntime;
use std::fmt;

/// Text shown in place of a value whose query failed.
pub const FAILED: &str = "-failed-";

/// One attribute query against one device.
#[derive(Debug, Clone)]
pub struct ParamQuery {
    spec: ParamSpec,
    value: Option<ParamValue>,
    failed: bool,
}

impl ParamQuery {
    /// Creates an unqueried descriptor.
    pub fn new(spec: ParamSpec) -> Self {
        Self {
            spec,
            value: None,
            failed: false,
        }
    }

    /// Creates one descriptor per registered device attribute.
    pub fn registered() -> Vec<Self> {
        DEVICE_PARAMS.iter().copied().map(Self::new).collect()
    }

    /// Native attribute key.
    pub fn key(&self) -> u32 {
        self.spec.key
    }

    /// Native attribute name.
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Whether the last query failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// The decoded value, if the last query succeeded.
    pub fn value(&self) -> Option<&ParamValue> {
        self.value.as_ref()
    }

    /// Fetches and decodes the attribute from `device`.
    ///
    /// Native and decode errors set the failed flag and are not returned.
    pub fn query<R: ComputeRuntime>(&mut self, runtime: &R, device: R::Device) {
        match runtime
            .device_info(device, self.spec.key)
            .and_then(|bytes| self.spec.kind.decode(&bytes))
        {
            Ok(value) => {
                self.value = Some(value);
                self.failed = false;
            }
            Err(err) => {
                tracing::debug!(param = self.spec.name, device = ?device, error = %err, "device query failed");
                self.value = None;
                self.failed = true;
            }
        }
    }

    /// Formats the value, or [`FAILED`] if the query failed.
    pub fn format(&self) -> String {
        if self.failed {
            return FAILED.to_string();
        }
        self.value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl fmt::Display for ParamQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\t{}", self.spec.name, self.format())
    }
}
