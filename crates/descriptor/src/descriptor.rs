//! The host-facing descriptor of a single node.

use crate::{
    containers::{ContainerSpec, plan_containers},
    error::DescriptorError,
    parameters::{ParameterSpec, derive_defaults, derive_parameters},
    templates::{TemplateSet, resolve_templates},
};
use celo_primitives::{ConfigMap, NodeContext, Subtype};

/// A node's context, role and parameters, answering the host framework's
/// parameter, container and template queries.
///
/// Derived values are written back into the owned [`ConfigMap`] before any
/// query that depends on them, so [`NodeDescriptor::config`] always reflects
/// what was rendered.
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    ctx: NodeContext,
    subtype: Subtype,
    config: ConfigMap,
}

impl NodeDescriptor {
    /// Create a descriptor.
    pub fn new(ctx: NodeContext, subtype: Subtype, config: ConfigMap) -> Self {
        Self { ctx, subtype, config }
    }

    /// The node context.
    pub fn context(&self) -> &NodeContext {
        &self.ctx
    }

    /// The selected subtype.
    pub fn subtype(&self) -> Subtype {
        self.subtype
    }

    /// The current parameters, including any derived values.
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Apply derived defaults to the owned configuration.
    pub fn apply_defaults(&mut self) {
        let patch = derive_defaults(&self.ctx, self.subtype, &self.config);
        if !patch.is_empty() {
            self.config.apply(patch);
        }
    }

    /// The parameter manifest.
    pub fn parameters(&mut self) -> Vec<ParameterSpec> {
        self.apply_defaults();
        derive_parameters(&self.ctx, self.subtype)
    }

    /// The container plan.
    pub fn containers(&self) -> Vec<ContainerSpec> {
        plan_containers(&self.ctx, self.subtype, &self.config)
    }

    /// The template set.
    pub fn templates(&mut self) -> Result<TemplateSet, DescriptorError> {
        self.apply_defaults();
        resolve_templates(&self.ctx, self.subtype, &self.config)
    }
}
