use crate::attachment::AttachmentInfo;
use crate::index::{PassRef, PhysicalResourceIndex};

/// A uniquely numbered logical texture resource.
#[derive(Clone, Debug)]
pub struct TextureResource {
    pub name: String,
    pub info: AttachmentInfo,
    pub write_passes: Vec<PassRef>,
    pub read_passes: Vec<PassRef>,
    pub transient: bool,
    pub physical_index: PhysicalResourceIndex,
}

impl TextureResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: AttachmentInfo::new(),
            write_passes: Vec::new(),
            read_passes: Vec::new(),
            transient: false,
            physical_index: PhysicalResourceIndex::NONE,
        }
    }

    pub(crate) fn add_writer(&mut self, pass: PassRef) {
        if !self.write_passes.contains(&pass) {
            self.write_passes.push(pass);
        }
    }

    pub(crate) fn add_reader(&mut self, pass: PassRef) {
        if !self.read_passes.contains(&pass) {
            self.read_passes.push(pass);
        }
    }
}
