//! Role-driven deployment descriptors for Celo nodes.
//!
//! Given a [`Subtype`](celo_primitives::Subtype) this crate derives the three
//! things the host framework needs to launch a node:
//!
//! - [`derive_parameters`] - the parameter manifest, with per-role mandatory flags
//! - [`plan_containers`] - the ordered container specifications
//! - [`resolve_templates`] - command, environment and keystore files
//!
//! [`NodeDescriptor`] bundles them over a single configuration snapshot and
//! writes derived values (the attestation database URL) back explicitly.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod containers;
mod descriptor;
mod error;
pub mod keystore;
pub mod parameters;
pub mod templates;

pub use containers::{
    CommandSource, ContainerSpec, Mount, MountKind, Port, Protocol, RestartPolicy,
    plan_containers,
};
pub use descriptor::NodeDescriptor;
pub use error::DescriptorError;
pub use parameters::{ParameterSpec, ParameterType, derive_defaults, derive_parameters};
pub use templates::{TemplateSet, resolve_templates};
