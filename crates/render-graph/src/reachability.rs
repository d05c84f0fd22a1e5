use pulz_bitset::BitSet;

use crate::error::GraphError;
use crate::index::{PassRef, TextureRef};
use crate::pass::Pass;
use crate::resource::TextureResource;

/// C4: traverses writer-of-resource edges backwards from the backbuffer and
/// yields a topologically sorted, deduplicated pass list (§4.4).
pub fn bake_order(
    passes: &[Pass],
    textures: &[TextureResource],
    backbuffer: TextureRef,
) -> Result<Vec<PassRef>, GraphError> {
    let writers = &textures[backbuffer.index()].write_passes;
    if writers.is_empty() {
        return Err(GraphError::UnreachableBackbuffer {
            name: textures[backbuffer.index()].name.clone(),
        });
    }

    let mut discovered: Vec<PassRef> = Vec::new();
    let mut worklist: Vec<PassRef> = writers.clone();
    let mut round = 0usize;

    while !worklist.is_empty() {
        round += 1;
        if round > passes.len() {
            return Err(GraphError::CycleDetected { rounds: round });
        }

        let mut next_worklist = Vec::new();
        for &p in &worklist {
            discovered.push(p);
            let pass = &passes[p.index()];
            for input in pass.inputs() {
                for &writer in &textures[input.index()].write_passes {
                    next_worklist.push(writer);
                }
            }
        }
        worklist = next_worklist;
    }

    // Reverse, then stably dedup keeping the first occurrence seen from the
    // reversed side (§4.4): this keeps the leaf-most writer of a resource
    // that is re-discovered along multiple input edges, not the last one
    // pushed during the (backwards) BFS.
    discovered.reverse();
    let mut seen = BitSet::new();
    let mut order = Vec::with_capacity(discovered.len());
    for p in discovered {
        if seen.insert(p.index()) {
            order.push(p);
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_graph() -> (Vec<Pass>, Vec<TextureResource>) {
        // a -> pass0 -> b -> pass1 -> c (backbuffer)
        let mut a = TextureResource::new("a");
        let mut b = TextureResource::new("b");
        let mut c = TextureResource::new("c");
        let mut pass0 = Pass::new("pass0");
        let mut pass1 = Pass::new("pass1");

        pass0.color_outputs = vec![crate::index::TextureRef::new(1)];
        b.write_passes.push(crate::index::PassRef::new(0));

        pass1.texture_inputs = vec![crate::index::TextureRef::new(1)];
        pass1.color_outputs = vec![crate::index::TextureRef::new(2)];
        c.write_passes.push(crate::index::PassRef::new(1));

        let _ = &mut a;
        (vec![pass0, pass1], vec![a, b, c])
    }

    #[test]
    fn orders_writers_before_readers() {
        let (passes, textures) = linear_graph();
        let order = bake_order(&passes, &textures, crate::index::TextureRef::new(2)).unwrap();
        assert_eq!(
            order,
            vec![crate::index::PassRef::new(0), crate::index::PassRef::new(1)]
        );
    }

    #[test]
    fn missing_writer_is_unreachable() {
        let (passes, textures) = linear_graph();
        let err = bake_order(&passes, &textures, crate::index::TextureRef::new(0)).unwrap_err();
        assert!(matches!(err, GraphError::UnreachableBackbuffer { .. }));
    }

    #[test]
    fn cycle_is_detected() {
        // pass0 writes r1, reads r0; pass1 writes r0, reads r1 -> cycle.
        let mut r0 = TextureResource::new("r0");
        let mut r1 = TextureResource::new("r1");
        let mut pass0 = Pass::new("pass0");
        let mut pass1 = Pass::new("pass1");

        pass0.texture_inputs = vec![crate::index::TextureRef::new(0)];
        pass0.color_outputs = vec![crate::index::TextureRef::new(1)];
        r1.write_passes.push(crate::index::PassRef::new(0));

        pass1.texture_inputs = vec![crate::index::TextureRef::new(1)];
        pass1.color_outputs = vec![crate::index::TextureRef::new(0)];
        r0.write_passes.push(crate::index::PassRef::new(1));

        let passes = vec![pass0, pass1];
        let textures = vec![r0, r1];
        let err = bake_order(&passes, &textures, crate::index::TextureRef::new(1)).unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));
    }
}
