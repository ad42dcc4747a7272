//! Device discovery and selection.
//!
//! This module lists device extensions, provides reusable device pickers
//! and selects one device of a requested class from a platform.

pub mod extensions;
pub mod predicates;
pub mod selector;

pub use extensions::{device_extensions, ExtensionSet};
pub use predicates::{
    has_graphics_interop, DevicePicker, FirstDevice, GraphicsInterop, HasExtension,
    GL_SHARING_EXTENSIONS,
};
pub use selector::{DeviceSelection, DeviceSelector};
