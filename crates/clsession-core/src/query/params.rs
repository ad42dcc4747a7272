//! Native device attribute keys and the registry of reported attributes.

use super::{
    flags::{DEVICE_TYPE_FLAGS, EXEC_CAPABILITY_FLAGS, FP_CONFIG_FLAGS, QUEUE_PROPERTY_FLAGS},
    value::{ValueKind, Width},
};

/// Native `cl_device_info` keys.
#[allow(missing_docs)]
pub mod keys {
    pub const DEVICE_TYPE: u32 = 0x1000;
    pub const DEVICE_VENDOR_ID: u32 = 0x1001;
    pub const DEVICE_MAX_COMPUTE_UNITS: u32 = 0x1002;
    pub const DEVICE_MAX_WORK_ITEM_DIMENSIONS: u32 = 0x1003;
    pub const DEVICE_MAX_WORK_GROUP_SIZE: u32 = 0x1004;
    pub const DEVICE_MAX_WORK_ITEM_SIZES: u32 = 0x1005;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_CHAR: u32 = 0x1006;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_SHORT: u32 = 0x1007;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_INT: u32 = 0x1008;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_LONG: u32 = 0x1009;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT: u32 = 0x100A;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE: u32 = 0x100B;
    pub const DEVICE_MAX_CLOCK_FREQUENCY: u32 = 0x100C;
    pub const DEVICE_ADDRESS_BITS: u32 = 0x100D;
    pub const DEVICE_MAX_READ_IMAGE_ARGS: u32 = 0x100E;
    pub const DEVICE_MAX_WRITE_IMAGE_ARGS: u32 = 0x100F;
    pub const DEVICE_MAX_MEM_ALLOC_SIZE: u32 = 0x1010;
    pub const DEVICE_IMAGE2D_MAX_WIDTH: u32 = 0x1011;
    pub const DEVICE_IMAGE2D_MAX_HEIGHT: u32 = 0x1012;
    pub const DEVICE_IMAGE3D_MAX_WIDTH: u32 = 0x1013;
    pub const DEVICE_IMAGE3D_MAX_HEIGHT: u32 = 0x1014;
    pub const DEVICE_IMAGE3D_MAX_DEPTH: u32 = 0x1015;
    pub const DEVICE_IMAGE_SUPPORT: u32 = 0x1016;
    pub const DEVICE_MAX_PARAMETER_SIZE: u32 = 0x1017;
    pub const DEVICE_MAX_SAMPLERS: u32 = 0x1018;
    pub const DEVICE_MEM_BASE_ADDR_ALIGN: u32 = 0x1019;
    pub const DEVICE_MIN_DATA_TYPE_ALIGN_SIZE: u32 = 0x101A;
    pub const DEVICE_SINGLE_FP_CONFIG: u32 = 0x101B;
    pub const DEVICE_GLOBAL_MEM_CACHE_TYPE: u32 = 0x101C;
    pub const DEVICE_GLOBAL_MEM_CACHELINE_SIZE: u32 = 0x101D;
    pub const DEVICE_GLOBAL_MEM_CACHE_SIZE: u32 = 0x101E;
    pub const DEVICE_GLOBAL_MEM_SIZE: u32 = 0x101F;
    pub const DEVICE_MAX_CONSTANT_BUFFER_SIZE: u32 = 0x1020;
    pub const DEVICE_MAX_CONSTANT_ARGS: u32 = 0x1021;
    pub const DEVICE_LOCAL_MEM_TYPE: u32 = 0x1022;
    pub const DEVICE_LOCAL_MEM_SIZE: u32 = 0x1023;
    pub const DEVICE_ERROR_CORRECTION_SUPPORT: u32 = 0x1024;
    pub const DEVICE_PROFILING_TIMER_RESOLUTION: u32 = 0x1025;
    pub const DEVICE_ENDIAN_LITTLE: u32 = 0x1026;
    pub const DEVICE_AVAILABLE: u32 = 0x1027;
    pub const DEVICE_COMPILER_AVAILABLE: u32 = 0x1028;
    pub const DEVICE_EXECUTION_CAPABILITIES: u32 = 0x1029;
    pub const DEVICE_QUEUE_PROPERTIES: u32 = 0x102A;
    pub const DEVICE_NAME: u32 = 0x102B;
    pub const DEVICE_VENDOR: u32 = 0x102C;
    pub const DRIVER_VERSION: u32 = 0x102D;
    pub const DEVICE_PROFILE: u32 = 0x102E;
    pub const DEVICE_VERSION: u32 = 0x102F;
    pub const DEVICE_EXTENSIONS: u32 = 0x1030;
    pub const DEVICE_PLATFORM: u32 = 0x1031;
    pub const DEVICE_DOUBLE_FP_CONFIG: u32 = 0x1032;
    pub const DEVICE_HALF_FP_CONFIG: u32 = 0x1033;
}

/// Static description of one queryable attribute.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Native attribute key
    pub key: u32,
    /// Native attribute name
    pub name: &'static str,
    /// Kind of value the attribute holds
    pub kind: ValueKind,
}

impl ParamSpec {
    /// Creates a new attribute description.
    pub const fn new(key: u32, name: &'static str, kind: ValueKind) -> Self {
        Self { key, name, kind }
    }
}

macro_rules! param {
    ($key:ident, $kind:expr) => {
        ParamSpec::new(keys::$key, concat!("CL_", stringify!($key)), $kind)
    };
}

const UINT: ValueKind = ValueKind::Scalar(Width::U32);
const ULONG: ValueKind = ValueKind::Scalar(Width::U64);
const SIZE: ValueKind = ValueKind::Scalar(Width::Size);
const FP_CONFIG: ValueKind = ValueKind::Flags {
    width: Width::U64,
    table: FP_CONFIG_FLAGS,
};

/// Every attribute reported for a device, in report order.
///
/// The extension list is reported separately from this table.
pub const DEVICE_PARAMS: &[ParamSpec] = &[
    param!(DEVICE_NAME, ValueKind::Text),
    param!(DEVICE_VENDOR, ValueKind::Text),
    param!(DEVICE_VERSION, ValueKind::Text),
    param!(DRIVER_VERSION, ValueKind::Text),
    param!(DEVICE_VENDOR_ID, UINT),
    param!(DEVICE_PLATFORM, ValueKind::Handle),
    param!(DEVICE_AVAILABLE, ValueKind::Boolean),
    param!(DEVICE_COMPILER_AVAILABLE, ValueKind::Boolean),
    param!(DEVICE_MAX_CLOCK_FREQUENCY, UINT),
    param!(DEVICE_MAX_COMPUTE_UNITS, UINT),
    param!(
        DEVICE_TYPE,
        ValueKind::Flags {
            width: Width::U64,
            table: DEVICE_TYPE_FLAGS,
        }
    ),
    param!(DEVICE_HALF_FP_CONFIG, FP_CONFIG),
    param!(DEVICE_SINGLE_FP_CONFIG, FP_CONFIG),
    param!(DEVICE_DOUBLE_FP_CONFIG, FP_CONFIG),
    param!(DEVICE_ENDIAN_LITTLE, ValueKind::Boolean),
    param!(
        DEVICE_EXECUTION_CAPABILITIES,
        ValueKind::Flags {
            width: Width::U64,
            table: EXEC_CAPABILITY_FLAGS,
        }
    ),
    param!(DEVICE_ADDRESS_BITS, UINT),
    param!(DEVICE_ERROR_CORRECTION_SUPPORT, ValueKind::Boolean),
    param!(DEVICE_GLOBAL_MEM_SIZE, ULONG),
    param!(DEVICE_GLOBAL_MEM_CACHE_SIZE, ULONG),
    // CL_NONE, CL_READ_ONLY_CACHE or CL_READ_WRITE_CACHE
    param!(DEVICE_GLOBAL_MEM_CACHE_TYPE, UINT),
    param!(DEVICE_GLOBAL_MEM_CACHELINE_SIZE, UINT),
    param!(DEVICE_LOCAL_MEM_SIZE, ULONG),
    // CL_LOCAL or CL_GLOBAL
    param!(DEVICE_LOCAL_MEM_TYPE, UINT),
    param!(DEVICE_MEM_BASE_ADDR_ALIGN, UINT),
    param!(DEVICE_MIN_DATA_TYPE_ALIGN_SIZE, UINT),
    param!(DEVICE_IMAGE_SUPPORT, ValueKind::Boolean),
    param!(DEVICE_IMAGE2D_MAX_WIDTH, SIZE),
    param!(DEVICE_IMAGE2D_MAX_HEIGHT, SIZE),
    param!(DEVICE_IMAGE3D_MAX_WIDTH, SIZE),
    param!(DEVICE_IMAGE3D_MAX_HEIGHT, SIZE),
    param!(DEVICE_IMAGE3D_MAX_DEPTH, SIZE),
    param!(DEVICE_MAX_CONSTANT_ARGS, UINT),
    param!(DEVICE_MAX_CONSTANT_BUFFER_SIZE, ULONG),
    param!(DEVICE_MAX_MEM_ALLOC_SIZE, ULONG),
    param!(DEVICE_MAX_PARAMETER_SIZE, SIZE),
    param!(DEVICE_MAX_READ_IMAGE_ARGS, UINT),
    param!(DEVICE_MAX_WRITE_IMAGE_ARGS, UINT),
    param!(DEVICE_MAX_SAMPLERS, UINT),
    param!(DEVICE_PREFERRED_VECTOR_WIDTH_CHAR, UINT),
    param!(DEVICE_PREFERRED_VECTOR_WIDTH_SHORT, UINT),
    param!(DEVICE_PREFERRED_VECTOR_WIDTH_INT, UINT),
    param!(DEVICE_PREFERRED_VECTOR_WIDTH_LONG, UINT),
    param!(DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT, UINT),
    param!(DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE, UINT),
    param!(DEVICE_MAX_WORK_GROUP_SIZE, SIZE),
    param!(DEVICE_MAX_WORK_ITEM_DIMENSIONS, UINT),
    param!(
        DEVICE_MAX_WORK_ITEM_SIZES,
        ValueKind::Vector {
            width: Width::Size,
            len: 3,
        }
    ),
    param!(DEVICE_PROFILE, ValueKind::Text),
    param!(DEVICE_PROFILING_TIMER_RESOLUTION, SIZE),
    param!(
        DEVICE_QUEUE_PROPERTIES,
        ValueKind::Flags {
            width: Width::U64,
            table: QUEUE_PROPERTY_FLAGS,
        }
    ),
];

/// Looks up a registered attribute by native key.
pub fn find_param(key: u32) -> Option<&'static ParamSpec> {
    DEVICE_PARAMS.iter().find(|spec| spec.key == key)
}
