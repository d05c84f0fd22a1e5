use crate::dimensions::ResourceDimensions;
use crate::error::GraphError;
use crate::index::TextureRef;
use crate::pass::Pass;

/// C3: enforces the structural constraints between declared inputs and
/// outputs, reclassifying scaled color inputs along the way (§4.2).
///
/// `dims` holds each texture's resolved dimensions, indexed by `TextureRef`.
pub fn validate_passes(
    passes: &mut [Pass],
    dims: &[ResourceDimensions],
) -> Result<(), GraphError> {
    for pass in passes.iter_mut() {
        if !pass.color_inputs.is_empty() && pass.color_inputs.len() != pass.color_outputs.len() {
            return Err(GraphError::ShapeMismatch {
                pass: pass.name.clone(),
                color_inputs: pass.color_inputs.len(),
                color_outputs: pass.color_outputs.len(),
            });
        }

        if pass.color_scale_inputs.is_empty() && !pass.color_inputs.is_empty() {
            pass.color_scale_inputs = vec![TextureRef::NONE; pass.color_inputs.len()];
        }

        for i in 0..pass.color_inputs.len() {
            let input = pass.color_inputs[i];
            if input.is_none() {
                continue;
            }
            let output = pass.color_outputs[i];
            if dims[input.index()].width != dims[output.index()].width
                || dims[input.index()].height != dims[output.index()].height
            {
                // Reclassify: the slot becomes a color-scale input and is
                // removed from the positional color-input list.
                pass.color_scale_inputs[i] = input;
                pass.color_inputs[i] = TextureRef::NONE;
            }
        }

        if pass.depth_stencil_input.is_some() && pass.depth_stencil_output.is_some() {
            let input_dims = &dims[pass.depth_stencil_input.index()];
            let output_dims = &dims[pass.depth_stencil_output.index()];
            if input_dims.width != output_dims.width || input_dims.height != output_dims.height {
                return Err(GraphError::DimensionMismatch {
                    pass: pass.name.clone(),
                    input_w: input_dims.width,
                    input_h: input_dims.height,
                    output_w: output_dims.width,
                    output_h: output_dims.height,
                });
            }
        }
    }
    Ok(())
}
