use thiserror::Error;

/// Errors produced by [`RenderGraph::bake`](crate::RenderGraph::bake).
///
/// All variants are terminal for the current bake: the caller must
/// [`reset`](crate::RenderGraph::reset) and re-declare the graph before
/// trying again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    #[error(
        "pass `{pass}` has {color_inputs} color input(s) but {color_outputs} color output(s)"
    )]
    ShapeMismatch {
        pass: String,
        color_inputs: usize,
        color_outputs: usize,
    },

    #[error(
        "pass `{pass}` has a depth-stencil input/output pair with mismatched dimensions \
         ({input_w}x{input_h} vs {output_w}x{output_h})"
    )]
    DimensionMismatch {
        pass: String,
        input_w: u32,
        input_h: u32,
        output_w: u32,
        output_h: u32,
    },

    #[error("resource `{name}` referenced by `{referenced_by}` was never declared")]
    UnknownResource { name: String, referenced_by: String },

    #[error("backbuffer resource `{name}` is never written by any pass")]
    UnreachableBackbuffer { name: String },

    #[error("cycle detected while resolving pass dependencies (did not settle within {rounds} rounds)")]
    CycleDetected { rounds: usize },

    #[error(
        "resource `{resource}` cannot alias physical index {wanted} on pass `{pass}`; \
         it is already bound to physical index {existing}"
    )]
    AliasConflict {
        resource: String,
        pass: String,
        wanted: u32,
        existing: u32,
    },

    #[error("pass `{pass}` requests incompatible layouts for resource `{resource}`: {first:?} then {second:?}")]
    LayoutMismatch {
        pass: String,
        resource: String,
        first: crate::barrier::Layout,
        second: crate::barrier::Layout,
    },
}
