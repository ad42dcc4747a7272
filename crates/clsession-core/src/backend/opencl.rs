//! OpenCL runtime built on the `ocl` crate.
//!
//! Enumeration goes through `ocl::core`. Attribute queries, context and
//! queue creation, and argument binding call the raw FFI directly so that
//! arbitrary attribute keys, property lists and argument layouts can be
//! passed through unchanged.

#![allow(unsafe_code)]

use crate::{
    context::{ContextProperties, QueueProperties},
    error::NativeError,
    kernel_args::KernelArg,
    runtime::{ComputeRuntime, DeviceClass, PlatformParam},
};
use ocl::core::{
    self, ClDeviceIdPtr, CommandQueue, Context, DeviceId, DeviceType, Kernel, PlatformId,
};
use ocl::ffi;
use std::{ffi::c_void, ptr};

const CL_SUCCESS: i32 = 0;

fn core_error(call: &str, err: &core::Error) -> NativeError {
    NativeError {
        status: err.api_status().map(|status| status as i32),
        message: format!("{call}: {err}"),
    }
}

fn check(call: &str, status: i32) -> Result<(), NativeError> {
    if status == CL_SUCCESS {
        Ok(())
    } else {
        Err(NativeError::new(status, call))
    }
}

/// Raw `clGet*Info` bytes using the size-then-fetch protocol.
fn fetch_info<F>(call: &str, query: F) -> Result<Vec<u8>, NativeError>
where
    F: Fn(usize, *mut c_void, *mut usize) -> i32,
{
    let mut size = 0usize;
    check(call, query(0, ptr::null_mut(), &mut size))?;
    let mut bytes = vec![0u8; size];
    if size > 0 {
        check(call, query(size, bytes.as_mut_ptr().cast(), ptr::null_mut()))?;
    }
    Ok(bytes)
}

/// [`ComputeRuntime`] backed by the system's OpenCL ICD loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenClRuntime;

impl OpenClRuntime {
    /// Creates the runtime. Nothing is loaded until the first call.
    pub fn new() -> Self {
        Self
    }
}

impl ComputeRuntime for OpenClRuntime {
    type Platform = PlatformId;
    type Device = DeviceId;
    type Context = Context;
    type Queue = CommandQueue;
    type Kernel = Kernel;

    fn platforms(&self) -> Result<Vec<PlatformId>, NativeError> {
        core::get_platform_ids().map_err(|err| core_error("clGetPlatformIDs", &err))
    }

    fn platform_info(&self, platform: PlatformId, param: PlatformParam) -> Result<String, NativeError> {
        let raw = platform.as_ptr();
        let bytes = fetch_info("clGetPlatformInfo", |size, value, size_ret| {
            // SAFETY: `raw` comes from clGetPlatformIDs and `value` points to
            // at least `size` writable bytes or is null with `size == 0`.
            unsafe { ffi::clGetPlatformInfo(raw, param.key(), size, value, size_ret) }
        })?;
        Ok(crate::query::value::decode_text(&bytes))
    }

    fn devices(&self, platform: PlatformId, class: DeviceClass) -> Result<Vec<DeviceId>, NativeError> {
        let device_type = DeviceType::from_bits_truncate(class.native_bits());
        match core::get_device_ids(platform, Some(device_type), None) {
            Ok(devices) => Ok(devices),
            Err(err) => {
                let err = core_error("clGetDeviceIDs", &err);
                if err.is_device_not_found() {
                    tracing::debug!(platform = ?platform, %class, "platform has no devices of class");
                    Ok(Vec::new())
                } else {
                    Err(err)
                }
            }
        }
    }

    fn device_info(&self, device: DeviceId, key: u32) -> Result<Vec<u8>, NativeError> {
        let raw = device.as_ptr();
        fetch_info("clGetDeviceInfo", |size, value, size_ret| {
            // SAFETY: `raw` comes from clGetDeviceIDs and `value` points to
            // at least `size` writable bytes or is null with `size == 0`.
            unsafe { ffi::clGetDeviceInfo(raw, key, size, value, size_ret) }
        })
    }

    fn raw_platform(&self, platform: PlatformId) -> isize {
        platform.as_ptr() as isize
    }

    fn create_context(
        &self,
        device: DeviceId,
        properties: &ContextProperties,
    ) -> Result<Context, NativeError> {
        let raw_properties = properties.to_raw();
        let devices = [device.as_ptr()];
        let mut status = CL_SUCCESS;

        // SAFETY: the property list is zero terminated, `devices` holds one
        // valid device id, and no callback is registered.
        let raw = unsafe {
            ffi::clCreateContext(
                raw_properties.as_ptr(),
                1,
                devices.as_ptr(),
                None,
                ptr::null_mut(),
                &mut status,
            )
        };
        check("clCreateContext", status)?;
        if raw.is_null() {
            return Err(NativeError::other("clCreateContext returned a null context"));
        }
        // SAFETY: `raw` is a freshly created context whose single reference
        // is handed over to the wrapper.
        Ok(unsafe { Context::from_raw_create_ptr(raw) })
    }

    fn create_queue(
        &self,
        context: &Context,
        device: DeviceId,
        properties: QueueProperties,
    ) -> Result<CommandQueue, NativeError> {
        let mut status = CL_SUCCESS;
        // SAFETY: `context` is live for the call and `device` belongs to it.
        let raw = unsafe {
            ffi::clCreateCommandQueue(context.as_ptr(), device.as_ptr(), properties.bits(), &mut status)
        };
        check("clCreateCommandQueue", status)?;
        if raw.is_null() {
            return Err(NativeError::other("clCreateCommandQueue returned a null queue"));
        }
        // SAFETY: `raw` is a freshly created queue whose single reference is
        // handed over to the wrapper.
        Ok(unsafe { CommandQueue::from_raw_create_ptr(raw) })
    }

    fn set_kernel_arg(&self, kernel: &Kernel, slot: u32, arg: &KernelArg<'_>) -> Result<(), NativeError> {
        let value = arg.value_bytes();
        let value_ptr = value
            .as_ref()
            .map_or(ptr::null(), |bytes| bytes.as_ptr().cast::<c_void>());

        // SAFETY: `value_ptr` is null for local memory or points to exactly
        // `arg.size()` readable bytes that outlive the call.
        let status = unsafe { ffi::clSetKernelArg(kernel.as_ptr(), slot, arg.size(), value_ptr) };
        check("clSetKernelArg", status)
    }
}
