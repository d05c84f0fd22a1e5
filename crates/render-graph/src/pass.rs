use crate::index::{PhysicalPassIndex, TextureRef};

/// A uniquely numbered logical pass: an ordered set of texture attachments
/// it reads and writes, plus the physical-pass index it is fused into once
/// C5 has run.
#[derive(Clone, Debug)]
pub struct Pass {
    pub name: String,
    /// Sampled as an input-attachment on tile.
    pub attachment_inputs: Vec<TextureRef>,
    /// Paired positionally with `color_outputs`; `TextureRef::NONE` means no
    /// corresponding input for that slot.
    pub color_inputs: Vec<TextureRef>,
    pub color_outputs: Vec<TextureRef>,
    /// Shader-sampled, not tile-local.
    pub texture_inputs: Vec<TextureRef>,
    /// Parallel to `color_inputs`; populated by the validator when a color
    /// input's dimensions differ from its paired output.
    pub color_scale_inputs: Vec<TextureRef>,
    pub depth_stencil_input: TextureRef,
    pub depth_stencil_output: TextureRef,
    pub physical_pass_index: PhysicalPassIndex,
}

impl Pass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attachment_inputs: Vec::new(),
            color_inputs: Vec::new(),
            color_outputs: Vec::new(),
            texture_inputs: Vec::new(),
            color_scale_inputs: Vec::new(),
            depth_stencil_input: TextureRef::NONE,
            depth_stencil_output: TextureRef::NONE,
            physical_pass_index: PhysicalPassIndex::NONE,
        }
    }

    /// Every resource this pass reads, in the order the reachability
    /// traversal should enqueue their writers (§4.4).
    pub fn inputs(&self) -> impl Iterator<Item = TextureRef> + '_ {
        self.attachment_inputs
            .iter()
            .copied()
            .chain(self.color_inputs.iter().copied())
            .chain(self.color_scale_inputs.iter().copied())
            .chain(self.texture_inputs.iter().copied())
            .chain(std::iter::once(self.depth_stencil_input))
            .filter(|r| r.is_some())
    }
}
