//! Value kinds of device attributes and decoding of their raw bytes.

use super::flags::{decode_flags, FlagTable};
use crate::error::NativeError;
use nalgebra::DVector;
use std::fmt;

/// Width of a native integer attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// `cl_uint` / `cl_bool`
    U32,
    /// `cl_ulong` / `cl_bitfield`
    U64,
    /// `size_t` and pointer-sized handles
    Size,
}

impl Width {
    /// Size in bytes on this host.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U32 => 4,
            Self::U64 => 8,
            Self::Size => std::mem::size_of::<usize>(),
        }
    }

    fn read(self, bytes: &[u8]) -> Option<u64> {
        match self {
            Self::U32 => Some(u64::from(u32::from_ne_bytes(bytes.get(..4)?.try_into().ok()?))),
            Self::U64 => Some(u64::from_ne_bytes(bytes.get(..8)?.try_into().ok()?)),
            Self::Size => {
                let raw = bytes.get(..Self::Size.bytes())?;
                let value = usize::from_ne_bytes(raw.try_into().ok()?);
                u64::try_from(value).ok()
            }
        }
    }
}

/// Kind of value an attribute holds.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    /// Plain unsigned number
    Scalar(Width),
    /// Opaque native handle, shown in hex
    Handle,
    /// `cl_bool`
    Boolean,
    /// NUL terminated string
    Text,
    /// Fixed number of unsigned numbers
    Vector {
        /// Element width
        width: Width,
        /// Number of elements kept
        len: usize,
    },
    /// Bitfield decoded against a named flag table
    Flags {
        /// Bitfield width
        width: Width,
        /// Known flags of this attribute
        table: &'static FlagTable,
    },
}

impl ValueKind {
    /// Decodes raw attribute bytes into a value of this kind.
    pub fn decode(&self, bytes: &[u8]) -> Result<ParamValue, NativeError> {
        let short = |width: usize| {
            NativeError::other(format!(
                "expected at least {width} bytes, runtime returned {}",
                bytes.len()
            ))
        };

        match *self {
            Self::Scalar(width) => width
                .read(bytes)
                .map(ParamValue::Scalar)
                .ok_or_else(|| short(width.bytes())),
            Self::Handle => Width::Size
                .read(bytes)
                .map(ParamValue::Handle)
                .ok_or_else(|| short(Width::Size.bytes())),
            Self::Boolean => Width::U32
                .read(bytes)
                .map(|v| ParamValue::Boolean(v != 0))
                .ok_or_else(|| short(Width::U32.bytes())),
            Self::Text => Ok(ParamValue::Text(decode_text(bytes))),
            Self::Vector { width, len } => {
                let needed = width.bytes() * len;
                let elements = bytes
                    .get(..needed)
                    .ok_or_else(|| short(needed))?
                    .chunks_exact(width.bytes())
                    .map(|chunk| width.read(chunk).ok_or_else(|| short(width.bytes())))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ParamValue::Vector(DVector::from_vec(elements)))
            }
            Self::Flags { width, table } => width
                .read(bytes)
                .map(|raw| ParamValue::Flags { raw, table })
                .ok_or_else(|| short(width.bytes())),
        }
    }
}

/// Reads a native string, stopping at the first NUL.
///
/// Some drivers pad their strings with trailing NULs; anything after the
/// first one is ignored.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = bytes.split(|&b| b == 0).next().unwrap_or_default();
    String::from_utf8_lossy(text).trim_end().to_string()
}

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Plain unsigned number
    Scalar(u64),
    /// Opaque native handle
    Handle(u64),
    /// Boolean
    Boolean(bool),
    /// String
    Text(String),
    /// Fixed size vector
    Vector(DVector<u64>),
    /// Raw bitfield with its flag table
    Flags {
        /// Raw bits
        raw: u64,
        /// Known flags of the attribute
        table: &'static FlagTable,
    },
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Handle(v) => write!(f, "{v:#x}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Vector(v) => {
                write!(f, "(")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, ")")
            }
            Self::Flags { raw, table } => write!(f, "{}", decode_flags(*raw, table)),
        }
    }
}
