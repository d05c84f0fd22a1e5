#![warn(
    future_incompatible,
    rust_2018_idioms,
    unused,
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_qualifications,
    unused_crate_dependencies,
    clippy::cargo,
    clippy::multiple_crate_versions,
    clippy::empty_line_after_outer_attr,
    clippy::fallible_impl_from,
    clippy::redundant_pub_crate,
    clippy::use_self,
    clippy::suspicious_operation_groupings,
    clippy::useless_let_if_seq,
    clippy::wildcard_imports
)]
#![doc(html_logo_url = "https://raw.githubusercontent.com/HellButcher/pulz/master/docs/logo.png")]
#![doc(html_no_source)]
#![doc = include_str!("../README.md")]

mod alias;
mod attachment;
mod barrier;
mod dimensions;
mod error;
mod format;
mod graph;
mod index;
mod merge;
mod pass;
mod physical_barrier;
mod plan;
mod reachability;
mod resource;
mod subpass_barrier;
mod transient;
mod validate;

pub use attachment::{AttachmentInfo, SizeClass};
pub use barrier::{AccessMask, Barrier, Layout};
pub use dimensions::{ResourceDimensions, SwapchainDimensions};
pub use error::GraphError;
pub use format::TextureFormat;
pub use graph::{PassBuilder, RenderGraph};
pub use index::{PassRef, PhysicalPassIndex, PhysicalResourceIndex, TextureRef};
pub use physical_barrier::PhysicalPass;
pub use plan::Plan;
