use crate::format::TextureFormat;

/// How a texture's `(width, height)` is derived at bake time.
#[derive(Copy, Clone, Debug)]
pub enum SizeClass {
    /// `(sx * swapchain.width, sy * swapchain.height)`.
    SwapchainRelative { sx: f32, sy: f32 },
    /// Literal `(w, h)`.
    Absolute { w: u32, h: u32 },
    /// The named resource's `(width, height)` scaled by `(sx, sy)`; depth,
    /// layers and mip levels are inherited from the named resource too.
    InputRelative { sx: f32, sy: f32 },
}

impl Default for SizeClass {
    fn default() -> Self {
        Self::SwapchainRelative { sx: 1.0, sy: 1.0 }
    }
}

/// Declaration of a texture's shape, as supplied to `add_color_output` /
/// `set_depth_stencil_output` / the texture registry.
#[derive(Clone, Debug, Default)]
pub struct AttachmentInfo {
    pub format: TextureFormat,
    pub size_class: SizeClass,
    /// Only meaningful for `SizeClass::Absolute`; ignored otherwise (the x
    /// component doubles as the scale factor `sx`/the literal width).
    pub size_x: f32,
    pub size_y: f32,
    /// Name of the resource `InputRelative` scales from. Required (and only
    /// meaningful) when `size_class` is `InputRelative`.
    pub size_relative_name: Option<String>,
    pub depth: u32,
    pub layers: u32,
    pub levels: u32,
}

impl AttachmentInfo {
    pub fn new() -> Self {
        Self {
            format: TextureFormat::Undefined,
            size_class: SizeClass::SwapchainRelative { sx: 1.0, sy: 1.0 },
            size_x: 1.0,
            size_y: 1.0,
            size_relative_name: None,
            depth: 1,
            layers: 1,
            levels: 1,
        }
    }

    pub fn absolute(w: u32, h: u32, format: TextureFormat) -> Self {
        Self {
            format,
            size_class: SizeClass::Absolute { w, h },
            size_x: w as f32,
            size_y: h as f32,
            ..Self::new()
        }
    }

    pub fn swapchain_relative(sx: f32, sy: f32, format: TextureFormat) -> Self {
        Self {
            format,
            size_class: SizeClass::SwapchainRelative { sx, sy },
            size_x: sx,
            size_y: sy,
            ..Self::new()
        }
    }

    pub fn input_relative(name: impl Into<String>, sx: f32, sy: f32, format: TextureFormat) -> Self {
        Self {
            format,
            size_class: SizeClass::InputRelative { sx, sy },
            size_x: sx,
            size_y: sy,
            size_relative_name: Some(name.into()),
            ..Self::new()
        }
    }
}
