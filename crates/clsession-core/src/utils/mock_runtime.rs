//! In-memory compute runtime for tests.
//!
//! Platforms and devices are registered up front; attribute queries answer
//! from a per-device table of raw bytes, and kernels record the bytes bound
//! to each parameter slot.

#![cfg(any(test, feature = "test-utils"))]

use crate::{
    context::{ContextProperties, QueueProperties},
    error::NativeError,
    kernel_args::KernelArg,
    query::keys,
    runtime::{ComputeRuntime, DeviceClass, PlatformParam},
};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

/// Platform handle of the mock runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockPlatformId(pub usize);

/// Device handle of the mock runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockDeviceId(pub usize);

/// A device description registered with [`MockRuntime::add_device`].
#[derive(Debug, Clone)]
pub struct MockDevice {
    name: String,
    class: DeviceClass,
    info: HashMap<u32, Vec<u8>>,
}

impl MockDevice {
    /// A device answering only its name; every other query fails.
    pub fn new<S: Into<String>>(name: S, class: DeviceClass) -> Self {
        let name = name.into();
        let mut info = HashMap::new();
        info.insert(keys::DEVICE_NAME, nul_terminated(&name));
        Self { name, class, info }
    }

    /// Answers `key` with a 32-bit value.
    pub fn with_uint(self, key: u32, value: u32) -> Self {
        self.with_raw(key, value.to_ne_bytes().to_vec())
    }

    /// Answers `key` with a 64-bit value.
    pub fn with_ulong(self, key: u32, value: u64) -> Self {
        self.with_raw(key, value.to_ne_bytes().to_vec())
    }

    /// Answers `key` with a host-sized value.
    pub fn with_size(self, key: u32, value: usize) -> Self {
        self.with_raw(key, value.to_ne_bytes().to_vec())
    }

    /// Answers `key` with a native boolean.
    pub fn with_bool(self, key: u32, value: bool) -> Self {
        self.with_uint(key, u32::from(value))
    }

    /// Answers `key` with NUL terminated text.
    pub fn with_text(self, key: u32, value: &str) -> Self {
        self.with_raw(key, nul_terminated(value))
    }

    /// Answers `key` with exactly these bytes.
    pub fn with_raw(mut self, key: u32, bytes: Vec<u8>) -> Self {
        self.info.insert(key, bytes);
        self
    }

    /// Answers the extension listing with `list`.
    pub fn with_extensions(self, list: &str) -> Self {
        self.with_text(keys::DEVICE_EXTENSIONS, list)
    }
}

fn nul_terminated(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

#[derive(Debug)]
struct MockPlatform {
    info: HashMap<PlatformParam, String>,
}

/// Context created by the mock runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct MockContext {
    devices: Vec<MockDeviceId>,
    properties: ContextProperties,
}

impl MockContext {
    /// Devices the context was created for.
    pub fn devices(&self) -> &[MockDeviceId] {
        &self.devices
    }

    /// Properties passed at creation.
    pub fn properties(&self) -> &ContextProperties {
        &self.properties
    }
}

/// Command queue created by the mock runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct MockQueue {
    device: MockDeviceId,
    properties: QueueProperties,
}

impl MockQueue {
    /// Device the queue submits to.
    pub fn device(&self) -> MockDeviceId {
        self.device
    }

    /// Properties passed at creation.
    pub fn properties(&self) -> QueueProperties {
        self.properties
    }
}

/// Kernel with a fixed parameter layout.
#[derive(Debug)]
pub struct MockKernel {
    name: String,
    params: Vec<usize>,
    slots: RefCell<Vec<Option<Vec<u8>>>>,
}

impl MockKernel {
    /// A kernel whose parameter `i` takes `param_sizes[i]` bytes.
    pub fn new<S: Into<String>>(name: S, param_sizes: &[usize]) -> Self {
        Self {
            name: name.into(),
            params: param_sizes.to_vec(),
            slots: RefCell::new(vec![None; param_sizes.len()]),
        }
    }

    /// Kernel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes bound to `slot`, if any. Local memory binds as zeroes.
    pub fn arg(&self, slot: u32) -> Option<Vec<u8>> {
        self.slots
            .borrow()
            .get(slot as usize)
            .and_then(|bound| bound.clone())
    }
}

/// In-memory [`ComputeRuntime`].
#[derive(Debug, Default)]
pub struct MockRuntime {
    platforms: Vec<MockPlatform>,
    devices: Vec<(MockPlatformId, MockDevice)>,
    fail_listing: bool,
    fail_context: bool,
    contexts: Cell<usize>,
}

impl MockRuntime {
    /// An empty runtime with no platforms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a platform. Its other text attributes get fixed defaults.
    pub fn add_platform<S: Into<String>>(&mut self, name: S) -> MockPlatformId {
        let mut info = HashMap::new();
        info.insert(PlatformParam::Name, name.into());
        info.insert(PlatformParam::Vendor, "Mock Vendor".to_string());
        info.insert(PlatformParam::Version, "OpenCL 1.2 mock".to_string());
        info.insert(PlatformParam::Profile, "FULL_PROFILE".to_string());
        info.insert(PlatformParam::Extensions, "cl_khr_icd".to_string());
        self.platforms.push(MockPlatform { info });
        MockPlatformId(self.platforms.len() - 1)
    }

    /// Registers a device on `platform`.
    pub fn add_device(&mut self, platform: MockPlatformId, device: MockDevice) -> MockDeviceId {
        self.devices.push((platform, device));
        MockDeviceId(self.devices.len() - 1)
    }

    /// Name the device was registered with.
    ///
    /// # Panics
    ///
    /// Panics if `device` was not created by this runtime.
    pub fn device_name(&self, device: MockDeviceId) -> &str {
        &self.devices[device.0].1.name
    }

    /// Makes every device listing fail.
    pub fn fail_device_listing(&mut self, fail: bool) {
        self.fail_listing = fail;
    }

    /// Makes every context creation fail.
    pub fn fail_context_creation(&mut self, fail: bool) {
        self.fail_context = fail;
    }

    /// Number of contexts created so far.
    pub fn contexts_created(&self) -> usize {
        self.contexts.get()
    }

    fn device(&self, device: MockDeviceId) -> Result<&MockDevice, NativeError> {
        self.devices
            .get(device.0)
            .map(|(_, d)| d)
            .ok_or_else(|| NativeError::new(NativeError::INVALID_DEVICE, "unknown mock device"))
    }
}

impl ComputeRuntime for MockRuntime {
    type Platform = MockPlatformId;
    type Device = MockDeviceId;
    type Context = MockContext;
    type Queue = MockQueue;
    type Kernel = MockKernel;

    fn platforms(&self) -> Result<Vec<MockPlatformId>, NativeError> {
        Ok((0..self.platforms.len()).map(MockPlatformId).collect())
    }

    fn platform_info(
        &self,
        platform: MockPlatformId,
        param: PlatformParam,
    ) -> Result<String, NativeError> {
        self.platforms
            .get(platform.0)
            .and_then(|p| p.info.get(&param))
            .cloned()
            .ok_or_else(|| NativeError::new(NativeError::INVALID_PLATFORM, "unknown mock platform"))
    }

    fn devices(
        &self,
        platform: MockPlatformId,
        class: DeviceClass,
    ) -> Result<Vec<MockDeviceId>, NativeError> {
        if self.fail_listing {
            return Err(NativeError::other("mock device listing disabled"));
        }
        if platform.0 >= self.platforms.len() {
            return Err(NativeError::new(
                NativeError::INVALID_PLATFORM,
                "unknown mock platform",
            ));
        }
        Ok(self
            .devices
            .iter()
            .enumerate()
            .filter(|(_, (p, d))| *p == platform && d.class == class)
            .map(|(i, _)| MockDeviceId(i))
            .collect())
    }

    fn device_info(&self, device: MockDeviceId, key: u32) -> Result<Vec<u8>, NativeError> {
        self.device(device)?
            .info
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                NativeError::new(NativeError::INVALID_VALUE, format!("mock has no value for {key:#x}"))
            })
    }

    fn raw_platform(&self, platform: MockPlatformId) -> isize {
        0x1000 + platform.0 as isize
    }

    fn create_context(
        &self,
        device: MockDeviceId,
        properties: &ContextProperties,
    ) -> Result<MockContext, NativeError> {
        if self.fail_context {
            return Err(NativeError::new(
                NativeError::INVALID_PROPERTY,
                "mock context creation disabled",
            ));
        }
        self.device(device)?;
        self.contexts.set(self.contexts.get() + 1);
        Ok(MockContext {
            devices: vec![device],
            properties: properties.clone(),
        })
    }

    fn create_queue(
        &self,
        context: &MockContext,
        device: MockDeviceId,
        properties: QueueProperties,
    ) -> Result<MockQueue, NativeError> {
        if !context.devices.contains(&device) {
            return Err(NativeError::new(
                NativeError::INVALID_DEVICE,
                "device is not part of the context",
            ));
        }
        Ok(MockQueue { device, properties })
    }

    fn set_kernel_arg(
        &self,
        kernel: &MockKernel,
        slot: u32,
        arg: &KernelArg<'_>,
    ) -> Result<(), NativeError> {
        let expected = *kernel.params.get(slot as usize).ok_or_else(|| {
            NativeError::new(
                NativeError::INVALID_ARG_INDEX,
                format!("{} has no parameter {slot}", kernel.name),
            )
        })?;

        let bytes = match arg.value_bytes() {
            Some(bytes) => {
                if bytes.len() != expected {
                    return Err(NativeError::new(
                        NativeError::INVALID_ARG_SIZE,
                        format!("size {} does not match {expected}", bytes.len()),
                    ));
                }
                bytes.into_owned()
            }
            None => vec![0; arg.size()],
        };
        kernel.slots.borrow_mut()[slot as usize] = Some(bytes);
        Ok(())
    }
}
