//! Positional kernel argument binding.
//!
//! Arguments are type-erased into [`KernelArg`] values and bound in order:
//! argument `i` goes to parameter slot `i` unless it carries an explicit
//! slot. Binding stops at the first argument the runtime rejects.

use crate::{
    error::{NativeError, Result, SessionError},
    runtime::ComputeRuntime,
};
use std::borrow::Cow;

/// Payload of a kernel argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgData<'a> {
    /// Plain bytes copied into the parameter
    Bytes(Cow<'a, [u8]>),
    /// Handle of a memory object
    Mem(usize),
    /// Size of an uninitialized local memory allocation
    Local(usize),
}

/// One type-erased kernel argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelArg<'a> {
    data: ArgData<'a>,
    slot: Option<u32>,
}

impl<'a> KernelArg<'a> {
    /// Argument from raw bytes.
    pub fn bytes(bytes: &'a [u8]) -> Self {
        Self {
            data: ArgData::Bytes(Cow::Borrowed(bytes)),
            slot: None,
        }
    }

    /// Argument holding a memory object handle.
    pub fn mem(handle: usize) -> Self {
        Self {
            data: ArgData::Mem(handle),
            slot: None,
        }
    }

    /// Local memory allocation of `size` bytes.
    pub fn local(size: usize) -> Self {
        Self {
            data: ArgData::Local(size),
            slot: None,
        }
    }

    /// Binds this argument to `slot` instead of its list position.
    pub fn at(mut self, slot: u32) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Explicit slot, if one was set.
    pub fn slot(&self) -> Option<u32> {
        self.slot
    }

    /// Payload.
    pub fn data(&self) -> &ArgData<'a> {
        &self.data
    }

    /// Size in bytes the runtime is told about.
    pub fn size(&self) -> usize {
        match &self.data {
            ArgData::Bytes(bytes) => bytes.len(),
            ArgData::Mem(_) => std::mem::size_of::<usize>(),
            ArgData::Local(size) => *size,
        }
    }

    /// Bytes the runtime copies, or `None` for local memory.
    pub fn value_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match &self.data {
            ArgData::Bytes(bytes) => Some(Cow::Borrowed(bytes.as_ref())),
            ArgData::Mem(handle) => Some(Cow::Owned(handle.to_ne_bytes().to_vec())),
            ArgData::Local(_) => None,
        }
    }
}

macro_rules! impl_scalar_arg {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for KernelArg<'static> {
                fn from(value: $t) -> Self {
                    Self {
                        data: ArgData::Bytes(Cow::Owned(value.to_ne_bytes().to_vec())),
                        slot: None,
                    }
                }
            }
        )*
    };
}

impl_scalar_arg!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Builds an ordered argument list.
///
/// Each expression is converted with `KernelArg::from`, so scalars and
/// ready-made [`KernelArg`] values can be mixed.
#[macro_export]
macro_rules! kernel_args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::kernel_args::KernelArg::from($arg)),*]
    };
}

/// Binds `args` to `kernel` in order.
pub fn bind_kernel_args<R: ComputeRuntime>(
    runtime: &R,
    kernel: &R::Kernel,
    args: &[KernelArg<'_>],
) -> Result<()> {
    for (position, arg) in args.iter().enumerate() {
        let slot = match arg.slot {
            Some(slot) => slot,
            None => u32::try_from(position).map_err(|_| {
                SessionError::binding(
                    u32::MAX,
                    NativeError::new(NativeError::INVALID_ARG_INDEX, "argument list too long"),
                )
            })?,
        };
        runtime
            .set_kernel_arg(kernel, slot, arg)
            .map_err(|err| SessionError::binding(slot, err))?;
    }
    tracing::debug!(count = args.len(), "bound kernel arguments");
    Ok(())
}
