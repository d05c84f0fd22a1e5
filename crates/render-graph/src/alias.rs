use crate::dimensions::ResourceDimensions;
use crate::error::GraphError;
use crate::index::{PassRef, PhysicalResourceIndex, TextureRef};
use crate::pass::Pass;
use crate::resource::TextureResource;

/// C7: assigns physical indices to logical textures, reusing an index when
/// a color/depth input feeds a same-slot output (§4.7). Must run after C5
/// (physical-pass indices are not needed here, but the baked order is).
pub fn assign_physical_resources(
    order: &[PassRef],
    passes: &[Pass],
    textures: &mut [TextureResource],
    dims: &[ResourceDimensions],
) -> Result<Vec<ResourceDimensions>, GraphError> {
    let mut physical_dimensions: Vec<ResourceDimensions> = Vec::new();

    for &p in order {
        let pass = &passes[p.index()];

        for &r in &pass.attachment_inputs {
            ensure_assigned(textures, dims, &mut physical_dimensions, r);
        }
        for &r in &pass.texture_inputs {
            ensure_assigned(textures, dims, &mut physical_dimensions, r);
        }
        for &r in &pass.color_scale_inputs {
            if r.is_some() {
                ensure_assigned(textures, dims, &mut physical_dimensions, r);
            }
        }

        for i in 0..pass.color_outputs.len() {
            let output = pass.color_outputs[i];
            let input = pass.color_inputs.get(i).copied().unwrap_or(TextureRef::NONE);
            if input.is_some() {
                let input_phys = ensure_assigned(textures, dims, &mut physical_dimensions, input);
                alias_onto(textures, pass, output, input_phys)?;
            } else {
                ensure_assigned(textures, dims, &mut physical_dimensions, output);
            }
        }

        if pass.depth_stencil_input.is_some() && pass.depth_stencil_output.is_some() {
            let input_phys = ensure_assigned(
                textures,
                dims,
                &mut physical_dimensions,
                pass.depth_stencil_input,
            );
            alias_onto(textures, pass, pass.depth_stencil_output, input_phys)?;
        } else if pass.depth_stencil_output.is_some() {
            ensure_assigned(textures, dims, &mut physical_dimensions, pass.depth_stencil_output);
        } else if pass.depth_stencil_input.is_some() {
            ensure_assigned(textures, dims, &mut physical_dimensions, pass.depth_stencil_input);
        }
    }

    Ok(physical_dimensions)
}

fn ensure_assigned(
    textures: &mut [TextureResource],
    dims: &[ResourceDimensions],
    physical_dimensions: &mut Vec<ResourceDimensions>,
    r: TextureRef,
) -> PhysicalResourceIndex {
    let texture = &mut textures[r.index()];
    if texture.physical_index.is_none() {
        let index = PhysicalResourceIndex::new(physical_dimensions.len());
        physical_dimensions.push(dims[r.index()]);
        texture.physical_index = index;
    }
    texture.physical_index
}

fn alias_onto(
    textures: &mut [TextureResource],
    pass: &Pass,
    output: TextureRef,
    input_phys: PhysicalResourceIndex,
) -> Result<(), GraphError> {
    let out_texture = &mut textures[output.index()];
    if out_texture.physical_index.is_none() {
        out_texture.physical_index = input_phys;
    } else if out_texture.physical_index != input_phys {
        return Err(GraphError::AliasConflict {
            resource: out_texture.name.clone(),
            pass: pass.name.clone(),
            wanted: input_phys.index() as u32,
            existing: out_texture.physical_index.index() as u32,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TextureFormat;

    fn dims(w: u32, h: u32) -> ResourceDimensions {
        ResourceDimensions {
            width: w,
            height: h,
            depth: 1,
            layers: 1,
            levels: 1,
            format: TextureFormat::Rgba8Unorm,
            transient: false,
        }
    }

    #[test]
    fn paired_color_output_inherits_input_physical_index() {
        let mut history_prev = TextureResource::new("history_prev");
        let mut history_next = TextureResource::new("history_next");
        let mut pass = Pass::new("accumulate");
        pass.color_inputs = vec![TextureRef::new(0)];
        pass.color_outputs = vec![TextureRef::new(1)];

        history_prev.write_passes.push(PassRef::new(0));
        history_next.write_passes.push(PassRef::new(0));

        let passes = vec![pass];
        let mut textures = vec![history_prev, history_next];
        let dims_in = vec![dims(800, 600), dims(800, 600)];
        let order = vec![PassRef::new(0)];

        let physical = assign_physical_resources(&order, &passes, &mut textures, &dims_in).unwrap();
        assert_eq!(physical.len(), 1);
        assert_eq!(textures[0].physical_index, textures[1].physical_index);
    }

    #[test]
    fn unpaired_resources_get_distinct_indices() {
        let mut low_res = TextureResource::new("low_res");
        let mut full_res = TextureResource::new("full_res");
        let mut pass = Pass::new("p");
        pass.color_scale_inputs = vec![TextureRef::new(0)];
        pass.color_inputs = vec![TextureRef::NONE];
        pass.color_outputs = vec![TextureRef::new(1)];

        low_res.write_passes.push(PassRef::new(0));
        full_res.write_passes.push(PassRef::new(0));

        let passes = vec![pass];
        let mut textures = vec![low_res, full_res];
        let dims_in = vec![dims(400, 300), dims(800, 600)];
        let order = vec![PassRef::new(0)];

        let physical = assign_physical_resources(&order, &passes, &mut textures, &dims_in).unwrap();
        assert_eq!(physical.len(), 2);
        assert_ne!(textures[0].physical_index, textures[1].physical_index);
    }
}
