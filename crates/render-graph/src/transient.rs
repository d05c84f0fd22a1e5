use crate::pass::Pass;
use crate::resource::TextureResource;

/// C6: marks a physical texture transient iff all its readers and writers
/// live in a single physical pass (§4.6). Must run after C5 has stamped
/// `Pass::physical_pass_index`.
pub fn classify_transients(textures: &mut [TextureResource], passes: &[Pass]) {
    for texture in textures.iter_mut() {
        let mut physical_passes = texture
            .write_passes
            .iter()
            .chain(texture.read_passes.iter())
            .map(|&p| passes[p.index()].physical_pass_index);
        let first = physical_passes.next();
        texture.transient = match first {
            None => false,
            Some(first) => physical_passes.all(|p| p == first),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{PassRef, PhysicalPassIndex};

    #[test]
    fn single_physical_pass_is_transient() {
        let mut gbuf = Pass::new("gbuf");
        gbuf.physical_pass_index = PhysicalPassIndex::new(0);
        let mut light = Pass::new("light");
        light.physical_pass_index = PhysicalPassIndex::new(0);
        let passes = vec![gbuf, light];

        let mut albedo = TextureResource::new("albedo");
        albedo.write_passes.push(PassRef::new(0));
        albedo.read_passes.push(PassRef::new(1));
        let mut textures = vec![albedo];

        classify_transients(&mut textures, &passes);
        assert!(textures[0].transient);
    }

    #[test]
    fn spanning_physical_passes_is_persistent() {
        let mut a = Pass::new("a");
        a.physical_pass_index = PhysicalPassIndex::new(0);
        let mut b = Pass::new("b");
        b.physical_pass_index = PhysicalPassIndex::new(1);
        let passes = vec![a, b];

        let mut hdr = TextureResource::new("hdr");
        hdr.write_passes.push(PassRef::new(0));
        hdr.read_passes.push(PassRef::new(1));
        let mut textures = vec![hdr];

        classify_transients(&mut textures, &passes);
        assert!(!textures[0].transient);
    }
}
