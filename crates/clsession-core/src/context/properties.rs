//! Context creation properties and queue properties.

use bitflags::bitflags;

/// Native `cl_context_properties` names.
#[allow(missing_docs)]
pub mod keys {
    pub const CONTEXT_PLATFORM: isize = 0x1084;
    pub const GL_CONTEXT_KHR: isize = 0x2008;
    pub const EGL_DISPLAY_KHR: isize = 0x2009;
    pub const GLX_DISPLAY_KHR: isize = 0x200A;
    pub const WGL_HDC_KHR: isize = 0x200B;
    pub const CGL_SHAREGROUP_APPLE: isize = 0x1000_0000;
}

bitflags! {
    /// Command queue creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct QueueProperties: u64 {
        /// Commands may execute out of submission order
        const OUT_OF_ORDER_EXEC_MODE_ENABLE = 1 << 0;
        /// Commands record profiling timestamps
        const PROFILING_ENABLE = 1 << 1;
        /// Queue lives on the device
        const ON_DEVICE = 1 << 2;
        /// Default on-device queue; requires `ON_DEVICE`
        const ON_DEVICE_DEFAULT = 1 << 3;
    }
}

/// Native graphics handles used to share objects with a GL context.
///
/// These come from the windowing layer. They are embedded in the context
/// properties as-is and never dereferenced or validated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteropHandles {
    /// Windows: `HGLRC` and `HDC`
    Wgl {
        /// Current GL context
        gl_context: isize,
        /// Device context of the drawable
        hdc: isize,
    },
    /// X11: `GLXContext` and `Display*`
    Glx {
        /// Current GL context
        gl_context: isize,
        /// X display connection
        display: isize,
    },
    /// EGL: `EGLContext` and `EGLDisplay`
    Egl {
        /// Current GL context
        gl_context: isize,
        /// EGL display
        display: isize,
    },
    /// macOS: `CGLShareGroupObj` of the current context
    CglShareGroup {
        /// Share group of the current CGL context
        share_group: isize,
    },
}

impl InteropHandles {
    /// Property pairs these handles contribute.
    pub fn pairs(&self) -> Vec<(isize, isize)> {
        match *self {
            Self::Wgl { gl_context, hdc } => vec![
                (keys::GL_CONTEXT_KHR, gl_context),
                (keys::WGL_HDC_KHR, hdc),
            ],
            Self::Glx {
                gl_context,
                display,
            } => vec![
                (keys::GL_CONTEXT_KHR, gl_context),
                (keys::GLX_DISPLAY_KHR, display),
            ],
            Self::Egl {
                gl_context,
                display,
            } => vec![
                (keys::GL_CONTEXT_KHR, gl_context),
                (keys::EGL_DISPLAY_KHR, display),
            ],
            Self::CglShareGroup { share_group } => {
                vec![(keys::CGL_SHAREGROUP_APPLE, share_group)]
            }
        }
    }
}

/// Ordered `(name, value)` list passed to context creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextProperties {
    pairs: Vec<(isize, isize)>,
}

impl ContextProperties {
    /// Creates an empty property list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list for a platform, with interop handles first when given.
    pub fn for_platform(raw_platform: isize, interop: Option<&InteropHandles>) -> Self {
        let mut properties = Self::new();
        if let Some(handles) = interop {
            properties = properties.with_interop(handles);
        }
        properties.with(keys::CONTEXT_PLATFORM, raw_platform)
    }

    /// Appends one property.
    pub fn with(mut self, name: isize, value: isize) -> Self {
        self.pairs.push((name, value));
        self
    }

    /// Appends the pairs of a set of interop handles.
    pub fn with_interop(mut self, handles: &InteropHandles) -> Self {
        self.pairs.extend(handles.pairs());
        self
    }

    /// Value of a property, if present.
    pub fn get(&self, name: isize) -> Option<isize> {
        self.pairs.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
    }

    /// The `(name, value)` pairs in order.
    pub fn pairs(&self) -> &[(isize, isize)] {
        &self.pairs
    }

    /// Whether any graphics sharing property is present.
    pub fn has_interop(&self) -> bool {
        self.pairs.iter().any(|&(n, _)| {
            matches!(
                n,
                keys::GL_CONTEXT_KHR | keys::CGL_SHAREGROUP_APPLE
            )
        })
    }

    /// Flattened, zero-terminated list in native layout.
    pub fn to_raw(&self) -> Vec<isize> {
        self.pairs
            .iter()
            .flat_map(|&(n, v)| [n, v])
            .chain(std::iter::once(0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_only() {
        let props = ContextProperties::for_platform(0x55, None);
        assert_eq!(props.to_raw(), vec![keys::CONTEXT_PLATFORM, 0x55, 0]);
        assert!(!props.has_interop());
    }

    #[test]
    fn test_wgl_pairs_precede_platform() {
        let handles = InteropHandles::Wgl {
            gl_context: 0x10,
            hdc: 0x20,
        };
        let props = ContextProperties::for_platform(0x55, Some(&handles));
        assert_eq!(
            props.to_raw(),
            vec![
                keys::GL_CONTEXT_KHR,
                0x10,
                keys::WGL_HDC_KHR,
                0x20,
                keys::CONTEXT_PLATFORM,
                0x55,
                0
            ]
        );
        assert!(props.has_interop());
        assert_eq!(props.get(keys::WGL_HDC_KHR), Some(0x20));
    }

    #[test]
    fn test_cgl_share_group() {
        let handles = InteropHandles::CglShareGroup { share_group: 0x99 };
        let props = ContextProperties::for_platform(1, Some(&handles));
        assert_eq!(props.pairs()[0], (keys::CGL_SHAREGROUP_APPLE, 0x99));
        assert_eq!(props.get(keys::CONTEXT_PLATFORM), Some(1));
        assert!(props.has_interop());
    }

    #[test]
    fn test_glx_and_egl_displays() {
        let glx = InteropHandles::Glx {
            gl_context: 1,
            display: 2,
        };
        assert_eq!(glx.pairs()[1], (keys::GLX_DISPLAY_KHR, 2));
        let egl = InteropHandles::Egl {
            gl_context: 1,
            display: 3,
        };
        assert_eq!(egl.pairs()[1], (keys::EGL_DISPLAY_KHR, 3));
    }

    #[test]
    fn test_queue_properties_bits() {
        assert_eq!(QueueProperties::PROFILING_ENABLE.bits(), 0x2);
        assert!(!QueueProperties::PROFILING_ENABLE.contains(QueueProperties::OUT_OF_ORDER_EXEC_MODE_ENABLE));
    }

    #[test]
    fn test_queue_flags_match_decode_table() {
        use crate::query::flags::QUEUE_PROPERTY_FLAGS;

        let named: Vec<(u64, String)> = QueueProperties::all()
            .iter_names()
            .map(|(name, flag)| (flag.bits(), format!("CL_QUEUE_{name}")))
            .collect();
        let table: Vec<(u64, String)> = QUEUE_PROPERTY_FLAGS
            .iter()
            .map(|&(bit, name)| (bit, name.to_string()))
            .collect();
        assert_eq!(named, table);
    }
}
