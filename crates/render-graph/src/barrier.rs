use bitflags::bitflags;

use crate::index::PhysicalResourceIndex;

/// Image layout a physical resource is transitioned into by a barrier.
///
/// Layouts are mutually exclusive (a resource occupies exactly one at a
/// time), so this is a plain enum rather than a bitflag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Layout {
    #[default]
    Undefined,
    ShaderReadOnly,
    ColorAttachment,
    DepthStencilReadOnly,
    DepthStencilAttachment,
    General,
}

bitflags! {
    /// Access mask of a barrier, per §4.8's role table.
    pub struct AccessMask: u32 {
        const SHADER_READ = 1 << 0;
        const INPUT_ATTACHMENT_READ = 1 << 1;
        const COLOR_ATTACHMENT_READ = 1 << 2;
        const COLOR_ATTACHMENT_WRITE = 1 << 3;
        const DEPTH_STENCIL_READ = 1 << 4;
        const DEPTH_STENCIL_WRITE = 1 << 5;

        const NONE = 0;
    }
}

impl AccessMask {
    /// Widens a flush access mask into the matching invalidate access mask,
    /// used when seeding a frame-initial barrier (§4.9 step 2).
    pub fn flush_to_invalidate(self) -> Self {
        let mut out = self;
        if self.contains(Self::COLOR_ATTACHMENT_WRITE) {
            out |= Self::COLOR_ATTACHMENT_READ;
        }
        if self.contains(Self::DEPTH_STENCIL_WRITE) {
            out |= Self::DEPTH_STENCIL_READ;
        }
        out
    }
}

/// The role a physical resource plays within a single logical pass,
/// determining the layout and access mask of its barrier (§4.8).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    TextureInput,
    AttachmentInput,
    ColorInputPaired,
    ColorScaleInput,
    ColorOutput,
    DepthInputOnly,
    DepthOutputOnly,
    DepthInputAndOutput,
    DepthReadSampledSamePass,
}

impl Role {
    pub fn layout_and_access(self) -> (Layout, AccessMask) {
        match self {
            Self::TextureInput => (Layout::ShaderReadOnly, AccessMask::SHADER_READ),
            Self::AttachmentInput => {
                (Layout::ShaderReadOnly, AccessMask::INPUT_ATTACHMENT_READ)
            }
            Self::ColorInputPaired => (
                Layout::ColorAttachment,
                AccessMask::COLOR_ATTACHMENT_READ | AccessMask::COLOR_ATTACHMENT_WRITE,
            ),
            Self::ColorScaleInput => (Layout::ShaderReadOnly, AccessMask::SHADER_READ),
            Self::ColorOutput => (Layout::ColorAttachment, AccessMask::COLOR_ATTACHMENT_WRITE),
            Self::DepthInputOnly => (Layout::DepthStencilReadOnly, AccessMask::DEPTH_STENCIL_READ),
            Self::DepthOutputOnly => {
                (Layout::DepthStencilAttachment, AccessMask::DEPTH_STENCIL_WRITE)
            }
            Self::DepthInputAndOutput => (
                Layout::DepthStencilAttachment,
                AccessMask::DEPTH_STENCIL_READ | AccessMask::DEPTH_STENCIL_WRITE,
            ),
            Self::DepthReadSampledSamePass => (
                Layout::General,
                AccessMask::DEPTH_STENCIL_READ | AccessMask::DEPTH_STENCIL_WRITE,
            ),
        }
    }
}

/// A single synchronization barrier on one physical resource.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barrier {
    pub resource: PhysicalResourceIndex,
    pub layout: Layout,
    pub access: AccessMask,
}

impl Barrier {
    pub fn new(resource: PhysicalResourceIndex, layout: Layout, access: AccessMask) -> Self {
        Self {
            resource,
            layout,
            access,
        }
    }
}
