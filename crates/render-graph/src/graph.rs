use fnv::FnvHashMap;
use tracing::{debug, info};

use crate::alias::assign_physical_resources;
use crate::attachment::AttachmentInfo;
use crate::dimensions::{resolve_dimensions, ResourceDimensions, SwapchainDimensions};
use crate::error::GraphError;
use crate::format::TextureFormat;
use crate::index::{PassRef, PhysicalResourceIndex, TextureRef};
use crate::merge::merge_physical_passes;
use crate::pass::Pass;
use crate::physical_barrier::{compile_physical_barriers, resolve_swapchain_binding};
use crate::plan::Plan;
use crate::reachability::bake_order;
use crate::resource::TextureResource;
use crate::subpass_barrier::build_subpass_barriers;
use crate::transient::classify_transients;
use crate::validate::validate_passes;

/// Declarative frame render-graph: register passes and the textures they
/// read/write, then [`bake`](Self::bake) an execution plan for them.
pub struct RenderGraph {
    textures: Vec<TextureResource>,
    texture_names: FnvHashMap<String, TextureRef>,
    passes: Vec<Pass>,
    pass_names: FnvHashMap<String, PassRef>,
    backbuffer_source: Option<TextureRef>,
    swapchain: SwapchainDimensions,
    plan: Option<Plan>,
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderGraph {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            texture_names: FnvHashMap::default(),
            passes: Vec::new(),
            pass_names: FnvHashMap::default(),
            backbuffer_source: None,
            swapchain: SwapchainDimensions {
                width: 0,
                height: 0,
                format: TextureFormat::Undefined,
            },
            plan: None,
        }
    }

    pub fn set_swapchain_dimensions(&mut self, width: u32, height: u32, format: TextureFormat) {
        self.swapchain = SwapchainDimensions {
            width,
            height,
            format,
        };
    }

    pub fn get_or_insert_texture(&mut self, name: &str) -> TextureRef {
        if let Some(&r) = self.texture_names.get(name) {
            return r;
        }
        let r = TextureRef::new(self.textures.len());
        self.textures.push(TextureResource::new(name));
        self.texture_names.insert(name.to_owned(), r);
        r
    }

    pub fn get_or_insert_pass(&mut self, name: &str) -> PassRef {
        if let Some(&r) = self.pass_names.get(name) {
            return r;
        }
        let r = PassRef::new(self.passes.len());
        self.passes.push(Pass::new(name));
        self.pass_names.insert(name.to_owned(), r);
        r
    }

    /// Idempotent by name: declaring the same pass twice returns a builder
    /// for the same pass.
    pub fn add_pass(&mut self, name: &str) -> PassBuilder<'_> {
        let pass = self.get_or_insert_pass(name);
        PassBuilder {
            graph: self,
            pass,
            pending_color_input: TextureRef::NONE,
        }
    }

    pub fn set_backbuffer_source(&mut self, name: &str) {
        self.backbuffer_source = Some(self.get_or_insert_texture(name));
    }

    /// Clears all per-frame state. The swapchain dimensions are driver state
    /// and survive `reset`.
    pub fn reset(&mut self) {
        self.textures.clear();
        self.texture_names.clear();
        self.passes.clear();
        self.pass_names.clear();
        self.backbuffer_source = None;
        self.plan = None;
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn log(&self) {
        let Some(plan) = &self.plan else {
            debug!("render graph has no baked plan");
            return;
        };
        for line in plan.to_string().lines() {
            info!("{line}");
        }
    }

    /// C1-C9: compiles the declared graph into an execution [`Plan`].
    pub fn bake(&mut self) -> Result<&Plan, GraphError> {
        let backbuffer = self
            .backbuffer_source
            .ok_or_else(|| GraphError::UnreachableBackbuffer {
                name: String::new(),
            })?;

        // C2: resolve every declared texture's dimensions up front; later
        // stages only ever read from this table.
        let dims = self.resolve_all_dimensions()?;

        // C3
        validate_passes(&mut self.passes, &dims)?;

        // C4
        let order = bake_order(&self.passes, &self.textures, backbuffer)?;

        // C5
        let runs = merge_physical_passes(&mut self.passes, &order);

        // C6
        classify_transients(&mut self.textures, &self.passes);

        // C7
        let mut physical_dimensions =
            assign_physical_resources(&order, &self.passes, &mut self.textures, &dims)?;

        // Swapchain binding (end of §4.9): compare the backbuffer's resolved
        // dimensions against the driver-provided swapchain.
        let backbuffer_dims = dims[backbuffer.index()];
        let bound_to_swapchain =
            resolve_swapchain_binding(&backbuffer_dims, self.swapchain.width, self.swapchain.height);
        let swapchain_physical_index = self.textures[backbuffer.index()].physical_index;
        if bound_to_swapchain {
            self.textures[backbuffer.index()].transient = true;
        } else {
            self.textures[backbuffer.index()].transient = false;
        }

        // Propagate each physical resource's final transient flag (set per
        // logical resource by C6, and possibly overridden by swapchain
        // binding above) onto the dense physical_dimensions table.
        let mut is_transient = vec![false; physical_dimensions.len()];
        for texture in &self.textures {
            if texture.physical_index.is_some() {
                is_transient[texture.physical_index.index()] |= texture.transient;
            }
        }
        if !bound_to_swapchain && swapchain_physical_index.is_some() {
            is_transient[swapchain_physical_index.index()] = false;
        }
        for (i, dims) in physical_dimensions.iter_mut().enumerate() {
            dims.transient = is_transient[i];
        }

        let mut is_swapchain = vec![false; physical_dimensions.len()];
        if bound_to_swapchain && swapchain_physical_index.is_some() {
            is_swapchain[swapchain_physical_index.index()] = true;
        }

        // C8
        let mut subpass_barriers = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            subpass_barriers.push(build_subpass_barriers(pass, &self.textures)?);
        }

        // C9
        let (physical_passes, initial_barriers) = compile_physical_barriers(
            &runs,
            &subpass_barriers,
            physical_dimensions.len(),
            &is_transient,
            &is_swapchain,
        );

        let mut resource_names = vec![String::new(); physical_dimensions.len()];
        for texture in &self.textures {
            if texture.physical_index.is_some() {
                let slot = &mut resource_names[texture.physical_index.index()];
                if slot.is_empty() {
                    *slot = texture.name.clone();
                }
            }
        }
        let pass_names = self.passes.iter().map(|p| p.name.clone()).collect();

        self.plan = Some(Plan {
            physical_dimensions,
            physical_passes,
            initial_barriers,
            swapchain_physical_index: bound_to_swapchain.then_some(swapchain_physical_index),
            resource_names,
            pass_names,
        });
        Ok(self.plan.as_ref().unwrap())
    }

    fn resolve_all_dimensions(&self) -> Result<Vec<ResourceDimensions>, GraphError> {
        let mut out = Vec::with_capacity(self.textures.len());
        for texture in &self.textures {
            let lookup = |name: &str| {
                self.texture_names
                    .get(name)
                    .map(|&r| self.textures[r.index()].info.clone())
            };
            out.push(resolve_dimensions(
                &texture.info,
                self.swapchain,
                &lookup,
                &texture.name,
            )?);
        }
        Ok(out)
    }
}

/// Fluent handle used to declare one pass's reads and writes.
///
/// Returned by [`RenderGraph::add_pass`]; all attachment declarations go
/// through this type rather than back-referencing the graph from the pass.
pub struct PassBuilder<'g> {
    graph: &'g mut RenderGraph,
    pass: PassRef,
    pending_color_input: TextureRef,
}

impl PassBuilder<'_> {
    pub fn pass(&self) -> PassRef {
        self.pass
    }

    pub fn add_texture_input(&mut self, name: &str) -> TextureRef {
        let r = self.graph.get_or_insert_texture(name);
        self.graph.textures[r.index()].add_reader(self.pass);
        self.graph.passes[self.pass.index()].texture_inputs.push(r);
        r
    }

    pub fn add_attachment_input(&mut self, name: &str) -> TextureRef {
        let r = self.graph.get_or_insert_texture(name);
        self.graph.textures[r.index()].add_reader(self.pass);
        self.graph.passes[self.pass.index()]
            .attachment_inputs
            .push(r);
        r
    }

    /// Declares that the next `add_color_output` is fed by `name` (a
    /// color-on-tile read-modify-write). Must be called immediately before
    /// the paired `add_color_output`.
    pub fn add_color_input(&mut self, name: &str) -> TextureRef {
        let r = self.graph.get_or_insert_texture(name);
        self.graph.textures[r.index()].add_reader(self.pass);
        self.pending_color_input = r;
        r
    }

    pub fn add_color_output(&mut self, name: &str, info: AttachmentInfo) -> TextureRef {
        let r = self.graph.get_or_insert_texture(name);
        self.graph.textures[r.index()].info = info;
        self.graph.textures[r.index()].add_writer(self.pass);
        let pass = &mut self.graph.passes[self.pass.index()];
        pass.color_outputs.push(r);
        pass.color_inputs.push(self.pending_color_input);
        self.pending_color_input = TextureRef::NONE;
        r
    }

    pub fn set_depth_stencil_input(&mut self, name: &str) -> TextureRef {
        let r = self.graph.get_or_insert_texture(name);
        self.graph.textures[r.index()].add_reader(self.pass);
        self.graph.passes[self.pass.index()].depth_stencil_input = r;
        r
    }

    pub fn set_depth_stencil_output(&mut self, name: &str, info: AttachmentInfo) -> TextureRef {
        let r = self.graph.get_or_insert_texture(name);
        self.graph.textures[r.index()].info = info;
        self.graph.textures[r.index()].add_writer(self.pass);
        self.graph.passes[self.pass.index()].depth_stencil_output = r;
        r
    }
}
