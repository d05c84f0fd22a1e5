use crate::index::{PassRef, PhysicalPassIndex};
use crate::pass::Pass;

/// C5: coalesces consecutive logical passes whose data dependencies are
/// expressible as on-tile attachments (§4.5). Returns the subpass lists of
/// each physical-pass run, in execution order, and stamps
/// `Pass::physical_pass_index` on every logical pass.
pub fn merge_physical_passes(passes: &mut [Pass], order: &[PassRef]) -> Vec<Vec<PassRef>> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < order.len() {
        let mut run = vec![order[i]];
        let mut k = i + 1;
        while k < order.len() && should_merge(passes, &run, order[k]) {
            run.push(order[k]);
            k += 1;
        }

        let physical_pass_index = PhysicalPassIndex::new(runs.len());
        for &p in &run {
            passes[p.index()].physical_pass_index = physical_pass_index;
        }
        runs.push(run);
        i = k;
    }
    runs
}

fn should_merge(passes: &[Pass], run: &[PassRef], next: PassRef) -> bool {
    let next_pass = &passes[next.index()];
    run.iter()
        .all(|&prev| should_merge_pair(&passes[prev.index()], next_pass))
}

fn should_merge_pair(prev: &Pass, next: &Pass) -> bool {
    // 1. Forbid: a sampled read of a prior tile attachment forces a store.
    for &input in &next.texture_inputs {
        if prev.color_outputs.contains(&input) || prev.depth_stencil_output == input {
            return false;
        }
    }
    // 2. Forbid: scaling a prior tile attachment requires a resolve.
    for &input in &next.color_scale_inputs {
        if input.is_some() && prev.color_outputs.contains(&input) {
            return false;
        }
    }
    // 3. Allow: color-on-tile read-modify-write.
    for &input in &next.color_inputs {
        if input.is_some() && prev.color_outputs.contains(&input) {
            return true;
        }
    }
    // 4. Allow: depth-on-tile.
    if next.depth_stencil_input.is_some() && next.depth_stencil_input == prev.depth_stencil_output {
        return true;
    }
    // 5. Allow: input-attachment on tile.
    for &input in &next.attachment_inputs {
        if prev.color_outputs.contains(&input) || prev.depth_stencil_output == input {
            return true;
        }
    }
    // 6. Otherwise allow: unrelated passes may still be fused.
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TextureRef;

    #[test]
    fn texture_input_of_prior_output_blocks_merge() {
        let mut gbuf = Pass::new("gbuf");
        gbuf.color_outputs = vec![TextureRef::new(0)];
        let mut sample = Pass::new("sample");
        sample.texture_inputs = vec![TextureRef::new(0)];

        let mut passes = vec![gbuf, sample];
        let order = vec![PassRef::new(0), PassRef::new(1)];
        let runs = merge_physical_passes(&mut passes, &order);
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn attachment_input_of_prior_output_merges() {
        let mut gbuf = Pass::new("gbuf");
        gbuf.color_outputs = vec![TextureRef::new(0), TextureRef::new(1)];
        let mut light = Pass::new("light");
        light.attachment_inputs = vec![TextureRef::new(0), TextureRef::new(1)];
        light.color_outputs = vec![TextureRef::new(2)];

        let mut passes = vec![gbuf, light];
        let order = vec![PassRef::new(0), PassRef::new(1)];
        let runs = merge_physical_passes(&mut passes, &order);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], vec![PassRef::new(0), PassRef::new(1)]);
    }
}
