use std::fmt;

use crate::barrier::Barrier;
use crate::dimensions::ResourceDimensions;
use crate::index::PhysicalResourceIndex;
use crate::physical_barrier::PhysicalPass;

/// The compiled output of [`RenderGraph::bake`](crate::RenderGraph::bake).
///
/// Immutable once produced; a later `bake()` replaces it wholesale.
#[derive(Clone, Debug, Default)]
pub struct Plan {
    pub physical_dimensions: Vec<ResourceDimensions>,
    pub physical_passes: Vec<PhysicalPass>,
    pub initial_barriers: Vec<Barrier>,
    pub swapchain_physical_index: Option<PhysicalResourceIndex>,
    /// One name per physical resource (the first logical resource to claim
    /// that index), used only for `log()`/`Display`.
    pub(crate) resource_names: Vec<String>,
    /// One name per logical pass, indexed by `PassRef`, used only for
    /// `log()`/`Display`.
    pub(crate) pass_names: Vec<String>,
}

impl Plan {
    fn resource_name(&self, index: PhysicalResourceIndex) -> &str {
        self.resource_names
            .get(index.index())
            .map_or("<unnamed>", String::as_str)
    }

    fn pass_name(&self, pass: crate::index::PassRef) -> &str {
        self.pass_names
            .get(pass.index())
            .map_or("<unnamed>", String::as_str)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "render graph plan ({} physical resources):", self.physical_dimensions.len())?;
        for (i, dims) in self.physical_dimensions.iter().enumerate() {
            writeln!(
                f,
                "  [{}] {} {}x{} {:?} transient={}",
                i,
                self.resource_name(PhysicalResourceIndex::new(i)),
                dims.width,
                dims.height,
                dims.format,
                dims.transient
            )?;
        }
        for (i, pass) in self.physical_passes.iter().enumerate() {
            writeln!(f, "physical pass {i}:")?;
            for barrier in &pass.invalidate {
                writeln!(
                    f,
                    "  invalidate {} -> {:?} ({:?})",
                    self.resource_name(barrier.resource),
                    barrier.layout,
                    barrier.access
                )?;
            }
            let subpass_names: Vec<&str> =
                pass.subpasses.iter().map(|&p| self.pass_name(p)).collect();
            writeln!(f, "  subpasses: {}", subpass_names.join(", "))?;
            for barrier in &pass.flush {
                writeln!(
                    f,
                    "  flush {} -> {:?} ({:?})",
                    self.resource_name(barrier.resource),
                    barrier.layout,
                    barrier.access
                )?;
            }
        }
        Ok(())
    }
}
