use crate::barrier::{AccessMask, Barrier, Layout};
use crate::dimensions::ResourceDimensions;
use crate::index::{PassRef, PhysicalResourceIndex};
use crate::subpass_barrier::SubpassBarriers;

/// A fused run of logical passes whose intermediate attachments remain
/// on-chip, plus the barriers that must run immediately before/after it.
#[derive(Clone, Debug, Default)]
pub struct PhysicalPass {
    pub subpasses: Vec<PassRef>,
    pub invalidate: Vec<Barrier>,
    pub flush: Vec<Barrier>,
}

/// Global, cross-physical-pass state of one physical resource, carried by
/// the reconciliation loop (§4.9).
#[derive(Copy, Clone, Debug)]
struct ResourceState {
    current_layout: Layout,
    invalidated_access: AccessMask,
    last_invalidate_pass: Option<usize>,
    last_flush_pass: Option<usize>,
}

impl Default for ResourceState {
    fn default() -> Self {
        Self {
            current_layout: Layout::Undefined,
            invalidated_access: AccessMask::NONE,
            last_invalidate_pass: None,
            last_flush_pass: None,
        }
    }
}

/// Per-physical-pass scratch state, reset before each physical pass's
/// subpass walk.
#[derive(Copy, Clone, Debug, Default)]
struct ScratchState {
    initial_layout: Layout,
    final_layout: Layout,
    invalidated_access: AccessMask,
    flushed_access: AccessMask,
    touched: bool,
}

/// C9: folds per-subpass barriers into per-physical-pass barriers plus
/// frame-initial barriers, tracking a global resource-state machine.
///
/// `is_transient` and `is_swapchain` are indexed by physical resource index.
pub fn compile_physical_barriers(
    runs: &[Vec<PassRef>],
    subpass_barriers: &[SubpassBarriers],
    physical_count: usize,
    is_transient: &[bool],
    is_swapchain: &[bool],
) -> (Vec<PhysicalPass>, Vec<Barrier>) {
    let mut global = vec![ResourceState::default(); physical_count];
    let mut initial_barriers: Vec<Barrier> = Vec::new();
    let mut physical_passes = Vec::with_capacity(runs.len());

    for (physical_pass_index, run) in runs.iter().enumerate() {
        let mut scratch = vec![ScratchState::default(); physical_count];

        for &pass_ref in run {
            let barriers = &subpass_barriers[pass_ref.index()];

            // Frame-initial barriers and the per-physical-pass scratch are
            // built for every resource, transient or not: a transient
            // resource still needs its very first undefined->layout
            // transition, since it lives entirely inside this one physical
            // pass. Only the cross-physical-pass reconciliation below skips
            // transient/swapchain resources.
            for barrier in &barriers.invalidate {
                let r = barrier.resource.index();
                let slot = &mut scratch[r];
                if !slot.touched {
                    slot.initial_layout = barrier.layout;
                    slot.touched = true;
                }
                slot.invalidated_access |= barrier.access;
                slot.flushed_access = AccessMask::NONE;
            }

            for barrier in &barriers.flush {
                let r = barrier.resource.index();
                let slot = &mut scratch[r];
                slot.flushed_access |= barrier.access;
                slot.final_layout = barrier.layout;
                if !slot.touched {
                    slot.initial_layout = barrier.layout;
                    slot.touched = true;
                    initial_barriers.push(Barrier::new(
                        PhysicalResourceIndex::new(r),
                        barrier.layout,
                        barrier.access.flush_to_invalidate(),
                    ));
                }
            }
        }

        physical_passes.push(PhysicalPass {
            subpasses: run.clone(),
            invalidate: Vec::new(),
            flush: Vec::new(),
        });

        for (r, slot) in scratch.iter().enumerate() {
            if !slot.touched {
                continue;
            }
            // Transient and swapchain-bound resources never persist across
            // physical-pass boundaries, so they need no cross-pass
            // synchronization barrier here (the frame-initial barrier above
            // already covers their one and only use).
            if is_transient[r] || is_swapchain[r] {
                continue;
            }
            let state = &mut global[r];

            let needs_invalidate = slot.initial_layout != Layout::Undefined
                && (slot.initial_layout != state.current_layout
                    || !state
                        .invalidated_access
                        .contains(slot.invalidated_access));
            if needs_invalidate {
                // Merge into the most recent global invalidate if it already
                // transitioned this resource to the same layout, instead of
                // emitting a redundant barrier on this physical pass.
                let merged = state.current_layout == slot.initial_layout
                    && state
                        .last_invalidate_pass
                        .and_then(|prior_pass| {
                            physical_passes[prior_pass]
                                .invalidate
                                .iter_mut()
                                .find(|b| b.resource.index() == r)
                        })
                        .map(|existing| existing.access |= slot.invalidated_access)
                        .is_some();

                if !merged {
                    physical_passes[physical_pass_index]
                        .invalidate
                        .push(Barrier::new(
                            PhysicalResourceIndex::new(r),
                            slot.initial_layout,
                            slot.invalidated_access,
                        ));
                }
                state.current_layout = slot.initial_layout;
                state.invalidated_access = slot.invalidated_access;
                state.last_invalidate_pass = Some(physical_pass_index);
                state.last_flush_pass = None;
            }

            if !slot.flushed_access.is_empty() {
                physical_passes[physical_pass_index]
                    .flush
                    .push(Barrier::new(
                        PhysicalResourceIndex::new(r),
                        slot.final_layout,
                        slot.flushed_access,
                    ));
                state.invalidated_access = AccessMask::NONE;
                state.current_layout = slot.final_layout;
                state.last_flush_pass = Some(physical_pass_index);
                state.last_invalidate_pass = None;
            }
        }
    }

    (physical_passes, initial_barriers)
}

/// Resolves whether the backbuffer resource can be bound directly as the
/// swapchain target (§4.9's swapchain-binding step).
pub fn resolve_swapchain_binding(
    backbuffer_dims: &ResourceDimensions,
    swapchain_width: u32,
    swapchain_height: u32,
) -> bool {
    backbuffer_dims.width == swapchain_width && backbuffer_dims.height == swapchain_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barrier::Role;

    fn barrier(resource: usize, role: Role) -> Barrier {
        let (layout, access) = role.layout_and_access();
        Barrier::new(PhysicalResourceIndex::new(resource), layout, access)
    }

    #[test]
    fn color_output_only_pass_gets_frame_initial_barrier() {
        let run = vec![PassRef::new(0)];
        let mut barriers = SubpassBarriers::default();
        barriers.flush.push(barrier(0, Role::ColorOutput));
        let subpass_barriers = vec![barriers];

        let (passes, initial) = compile_physical_barriers(
            &[run],
            &subpass_barriers,
            1,
            &[false],
            &[false],
        );
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].flush.len(), 1);
        assert_eq!(initial.len(), 1);
        assert_eq!(initial[0].layout, Layout::ColorAttachment);
    }

    #[test]
    fn transient_resources_skip_cross_pass_reconciliation_only() {
        let run = vec![PassRef::new(0), PassRef::new(1)];
        let mut producer = SubpassBarriers::default();
        producer.flush.push(barrier(0, Role::ColorOutput));
        let mut consumer = SubpassBarriers::default();
        consumer.invalidate.push(barrier(0, Role::AttachmentInput));
        let subpass_barriers = vec![producer, consumer];

        let (passes, initial) = compile_physical_barriers(
            &[run],
            &subpass_barriers,
            1,
            &[true],
            &[false],
        );
        // No cross-physical-pass barrier bookkeeping for a transient resource...
        assert!(passes[0].invalidate.is_empty());
        assert!(passes[0].flush.is_empty());
        // ...but it still gets its one frame-initial transition, seeded by
        // the producing subpass's flush within the same physical pass.
        assert_eq!(initial.len(), 1);
    }

    #[test]
    fn persistent_resource_across_two_physical_passes_gets_invalidate_then_flush() {
        let run0 = vec![PassRef::new(0)];
        let run1 = vec![PassRef::new(1)];
        let mut b0 = SubpassBarriers::default();
        b0.flush.push(barrier(0, Role::ColorOutput));
        let mut b1 = SubpassBarriers::default();
        b1.invalidate.push(barrier(0, Role::TextureInput));
        let subpass_barriers = vec![b0, b1];

        let (passes, initial) =
            compile_physical_barriers(&[run0, run1], &subpass_barriers, 1, &[false], &[false]);
        assert_eq!(passes[0].flush.len(), 1);
        assert_eq!(passes[1].invalidate.len(), 1);
        assert_eq!(initial.len(), 1);
    }
}
