use crate::attachment::{AttachmentInfo, SizeClass};
use crate::error::GraphError;
use crate::format::TextureFormat;

/// The resolved, concrete shape of one physical resource.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResourceDimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub layers: u32,
    pub levels: u32,
    pub format: TextureFormat,
    pub transient: bool,
}

impl ResourceDimensions {
    /// Whether two dimensions are compatible for aliasing: same extents and
    /// format (transient flag is assigned later and does not participate).
    pub fn matches_shape(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.depth == other.depth
            && self.layers == other.layers
            && self.levels == other.levels
            && self.format == other.format
    }
}

/// Dimensions of the swapchain, supplied by the driver before `bake()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapchainDimensions {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Resolves an [`AttachmentInfo`] declaration into concrete dimensions.
///
/// `lookup` maps a resource name to its already-declared `AttachmentInfo`,
/// used to resolve `SizeClass::InputRelative`. `referenced_by` names the pass
/// or resource that triggered this resolution, for error messages.
pub fn resolve_dimensions(
    info: &AttachmentInfo,
    swapchain: SwapchainDimensions,
    lookup: &dyn Fn(&str) -> Option<AttachmentInfo>,
    referenced_by: &str,
) -> Result<ResourceDimensions, GraphError> {
    let (width, height, mut depth, mut layers, mut levels) = match &info.size_class {
        SizeClass::SwapchainRelative { sx, sy } => (
            (swapchain.width as f32 * sx).round() as u32,
            (swapchain.height as f32 * sy).round() as u32,
            info.depth,
            info.layers,
            info.levels,
        ),
        SizeClass::Absolute { w, h } => (*w, *h, info.depth, info.layers, info.levels),
        SizeClass::InputRelative { sx, sy } => {
            let name = info.size_relative_name.as_deref().ok_or_else(|| {
                GraphError::UnknownResource {
                    name: String::new(),
                    referenced_by: referenced_by.to_owned(),
                }
            })?;
            let referenced = lookup(name).ok_or_else(|| GraphError::UnknownResource {
                name: name.to_owned(),
                referenced_by: referenced_by.to_owned(),
            })?;
            let referenced_dims =
                resolve_dimensions(&referenced, swapchain, lookup, referenced_by)?;
            (
                (referenced_dims.width as f32 * sx).round() as u32,
                (referenced_dims.height as f32 * sy).round() as u32,
                referenced_dims.depth,
                referenced_dims.layers,
                referenced_dims.levels,
            )
        }
    };

    if depth == 0 {
        depth = 1;
    }
    if layers == 0 {
        layers = 1;
    }
    if levels == 0 {
        levels = 1;
    }

    let format = if info.format.is_undefined() {
        swapchain.format
    } else {
        info.format
    };

    Ok(ResourceDimensions {
        width,
        height,
        depth,
        layers,
        levels,
        format,
        transient: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swapchain() -> SwapchainDimensions {
        SwapchainDimensions {
            width: 1920,
            height: 1080,
            format: TextureFormat::Bgra8UnormSrgb,
        }
    }

    #[test]
    fn swapchain_relative_resolves() {
        let info = AttachmentInfo::swapchain_relative(1.0, 1.0, TextureFormat::Undefined);
        let dims = resolve_dimensions(&info, swapchain(), &|_| None, "test").unwrap();
        assert_eq!(dims.width, 1920);
        assert_eq!(dims.height, 1080);
        assert_eq!(dims.format, TextureFormat::Bgra8UnormSrgb);
    }

    #[test]
    fn input_relative_scales_and_chases_unknown() {
        let info = AttachmentInfo::input_relative("missing", 0.5, 0.5, TextureFormat::Undefined);
        let err = resolve_dimensions(&info, swapchain(), &|_| None, "bloom_down").unwrap_err();
        assert!(matches!(err, GraphError::UnknownResource { .. }));
    }

    #[test]
    fn input_relative_scales_known_resource() {
        let full = AttachmentInfo::absolute(800, 600, TextureFormat::Rgba16Float);
        let half = AttachmentInfo::input_relative("full_res", 0.5, 0.5, TextureFormat::Undefined);
        let dims =
            resolve_dimensions(&half, swapchain(), &|name| (name == "full_res").then(|| full.clone()), "test")
                .unwrap();
        assert_eq!(dims.width, 400);
        assert_eq!(dims.height, 300);
    }
}
