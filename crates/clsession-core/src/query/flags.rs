//! Named bit flag tables and bitmask decoding.
//!
//! Each table pairs the native bit values of one bitfield attribute with
//! their native names. Decoding lists every known flag that is set and
//! reports whatever bits remain so that flags added by newer drivers stay
//! visible.

use num_traits::PrimInt;
use std::fmt;

/// A table of `(bits, name)` pairs for one bitfield attribute.
pub type FlagTable<T = u64> = [(T, &'static str)];

/// Floating point capability flags (`cl_device_fp_config`).
pub const FP_CONFIG_FLAGS: &FlagTable = &[
    (1 << 0, "CL_FP_DENORM"),
    (1 << 1, "CL_FP_INF_NAN"),
    (1 << 2, "CL_FP_ROUND_TO_NEAREST"),
    (1 << 3, "CL_FP_ROUND_TO_ZERO"),
    (1 << 4, "CL_FP_ROUND_TO_INF"),
    (1 << 5, "CL_FP_FMA"),
    (1 << 6, "CL_FP_SOFT_FLOAT"),
    (1 << 7, "CL_FP_CORRECTLY_ROUNDED_DIVIDE_SQRT"),
];

/// Execution capability flags (`cl_device_exec_capabilities`).
pub const EXEC_CAPABILITY_FLAGS: &FlagTable = &[
    (1 << 0, "CL_EXEC_KERNEL"),
    (1 << 1, "CL_EXEC_NATIVE_KERNEL"),
];

/// Device type flags (`cl_device_type`).
pub const DEVICE_TYPE_FLAGS: &FlagTable = &[
    (1 << 0, "CL_DEVICE_TYPE_DEFAULT"),
    (1 << 1, "CL_DEVICE_TYPE_CPU"),
    (1 << 2, "CL_DEVICE_TYPE_GPU"),
    (1 << 3, "CL_DEVICE_TYPE_ACCELERATOR"),
    (1 << 4, "CL_DEVICE_TYPE_CUSTOM"),
];

/// Command queue property flags (`cl_command_queue_properties`).
pub const QUEUE_PROPERTY_FLAGS: &FlagTable = &[
    (1 << 0, "CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE"),
    (1 << 1, "CL_QUEUE_PROFILING_ENABLE"),
    (1 << 2, "CL_QUEUE_ON_DEVICE"),
    (1 << 3, "CL_QUEUE_ON_DEVICE_DEFAULT"),
];

/// Result of decoding a raw bitmask against a flag table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFlags<T> {
    /// Names of the known flags that were set, in table order
    pub names: Vec<&'static str>,
    /// Bits left over after every known flag was cleared
    pub residual: Option<T>,
}

impl<T: PrimInt> DecodedFlags<T> {
    /// Whether the raw value held no bits outside the table.
    pub fn is_fully_known(&self) -> bool {
        self.residual.is_none()
    }
}

/// Decodes `raw` against `table`.
///
/// A flag matches when all of its bits are set. Matched bits are cleared
/// from a working copy; anything nonzero after the last flag becomes the
/// residual.
pub fn decode_flags<T: PrimInt>(raw: T, table: &FlagTable<T>) -> DecodedFlags<T> {
    let mut remaining = raw;
    let mut names = Vec::new();

    for &(bits, name) in table {
        if bits != T::zero() && remaining & bits == bits {
            remaining = remaining & !bits;
            names.push(name);
        }
    }

    DecodedFlags {
        names,
        residual: (remaining != T::zero()).then_some(remaining),
    }
}

impl<T: PrimInt + fmt::LowerHex> fmt::Display for DecodedFlags<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.names {
            write!(f, "\n\t{name}")?;
        }
        if let Some(residual) = self.residual {
            write!(f, "\n\textra flags: {residual:#x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ABC: &FlagTable<u32> = &[(0x1, "A"), (0x2, "B"), (0x4, "C")];

    #[test]
    fn test_known_bits_only() {
        let decoded = decode_flags(0x5u32, ABC);
        assert_eq!(decoded.names, vec!["A", "C"]);
        assert!(decoded.is_fully_known());
        assert_eq!(decoded.to_string(), "\n\tA\n\tC");
    }

    #[test]
    fn test_residual_is_reported() {
        let only_a: &FlagTable<u32> = &[(0x1, "A")];
        let decoded = decode_flags(0x9u32, only_a);
        assert_eq!(decoded.names, vec!["A"]);
        assert_eq!(decoded.residual, Some(0x8));
        assert_eq!(decoded.to_string(), "\n\tA\n\textra flags: 0x8");
    }

    #[test]
    fn test_zero_value() {
        let decoded = decode_flags(0u64, FP_CONFIG_FLAGS);
        assert!(decoded.names.is_empty());
        assert!(decoded.is_fully_known());
        assert_eq!(decoded.to_string(), "");
    }

    #[test]
    fn test_fp_config_table() {
        // denorm | inf/nan | round to nearest | fma
        let decoded = decode_flags(0x27u64, FP_CONFIG_FLAGS);
        assert_eq!(
            decoded.names,
            vec!["CL_FP_DENORM", "CL_FP_INF_NAN", "CL_FP_ROUND_TO_NEAREST", "CL_FP_FMA"]
        );
    }

    #[test]
    fn test_device_type_table() {
        let decoded = decode_flags(0x4u64, DEVICE_TYPE_FLAGS);
        assert_eq!(decoded.names, vec!["CL_DEVICE_TYPE_GPU"]);
        let decoded = decode_flags(0x2u64 | 0x100, DEVICE_TYPE_FLAGS);
        assert_eq!(decoded.names, vec!["CL_DEVICE_TYPE_CPU"]);
        assert_eq!(decoded.residual, Some(0x100));
    }

    proptest! {
        #[test]
        fn prop_names_and_residual_partition_raw(raw in any::<u64>()) {
            let decoded = decode_flags(raw, FP_CONFIG_FLAGS);
            let known: u64 = FP_CONFIG_FLAGS
                .iter()
                .filter(|(_, name)| decoded.names.contains(name))
                .fold(0, |acc, (bits, _)| acc | bits);
            prop_assert_eq!(known | decoded.residual.unwrap_or(0), raw);
            prop_assert_eq!(known & decoded.residual.unwrap_or(0), 0);
        }
    }
}
