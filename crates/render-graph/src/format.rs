/// Pixel format of a texture resource.
///
/// `Undefined` is the sentinel used by [`AttachmentInfo`](crate::attachment::AttachmentInfo)
/// to mean "resolve to the swapchain format" (see the dimension resolver).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[non_exhaustive]
pub enum TextureFormat {
    #[default]
    Undefined,
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Bgra8UnormSrgb,
    Rgba16Float,
    Rgba32Float,
    R16Float,
    R32Float,
    Depth32Float,
    Depth24PlusStencil8,
}

impl TextureFormat {
    #[inline]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub const fn is_depth_stencil(self) -> bool {
        matches!(self, Self::Depth32Float | Self::Depth24PlusStencil8)
    }
}
