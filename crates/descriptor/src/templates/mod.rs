//! Template selection.
//!
//! Picks the files the host framework must materialize before containers
//! start. Only two substitutions happen here: the network id, which must be
//! fixed before the host's own rendering pass, and the attestation service's
//! database URL.

pub mod text;

use crate::{
    containers::{ATTESTATION_SERVICE_ENV_FILE, CMD_FILE, COLLECTOR_ENV_FILE, POSTGRES_ENV_FILE},
    error::DescriptorError,
    keystore::load_keystore,
    parameters::{Parameter, derive_defaults},
};
use celo_primitives::{ConfigMap, NodeContext, NodeRole, Subtype};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Relative path of the keystore password file.
pub const PASSWORD_FILE: &str = "configs/.password.secret";

/// Directory keystore files are materialized into.
pub const KEYSTORE_DIR: &str = "configs/keystore";

/// Relative file path → template text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateSet(BTreeMap<String, String>);

impl TemplateSet {
    /// Template text for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Returns true if a template exists for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no templates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(path, text)` in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.0.insert(path.into(), text.into());
    }
}

/// The command template body of `subtype`, with the network id fixed.
pub fn command_template(ctx: &NodeContext, subtype: Subtype) -> String {
    let body = match subtype {
        Subtype::Role(NodeRole::Proxy) => text::PROXY_CMD,
        Subtype::Role(NodeRole::Validator) => text::VALIDATOR_CMD,
        Subtype::Role(NodeRole::Fullnode) => text::FULLNODE_CMD,
        Subtype::Role(NodeRole::AttestationNode) => text::ATTESTATION_NODE_CMD,
        Subtype::Role(NodeRole::AttestationService) => text::ATTESTATION_SERVICE_CMD,
        Subtype::Inspect => text::HELP_CMD,
    };

    body.replace(text::NETWORK_ID_PLACEHOLDER, ctx.network_id())
}

/// Resolve the template set for `subtype`.
///
/// Roles that unlock a signer read the keystore from disk; failing to do so
/// is an error. The attestation service's database URL is derived when
/// missing, the same way [`derive_defaults`] does; apply that patch to the
/// configuration if later stages must observe it.
pub fn resolve_templates(
    ctx: &NodeContext,
    subtype: Subtype,
    config: &ConfigMap,
) -> Result<TemplateSet, DescriptorError> {
    let mut templates = TemplateSet::default();
    templates.insert(CMD_FILE, command_template(ctx, subtype));

    match subtype {
        Subtype::Role(role @ (NodeRole::Validator | NodeRole::AttestationNode)) => {
            templates.insert(COLLECTOR_ENV_FILE, text::COLLECTOR_ENV);

            let keystore = load_keystore(ctx, role, config)?;
            templates.insert(format!("{KEYSTORE_DIR}/{}", keystore.filename), keystore.json);
            templates.insert(PASSWORD_FILE, keystore.password);
        }
        Subtype::Role(NodeRole::AttestationService) => {
            let patch = derive_defaults(ctx, subtype, config);
            let key = Parameter::DbHost.name();
            let db_host = patch.get(key).unwrap_or_else(|| config.get(key));

            templates.insert(
                ATTESTATION_SERVICE_ENV_FILE,
                text::ATTESTATION_SERVICE_ENV.replace(text::DB_HOST_PLACEHOLDER, db_host),
            );
            templates.insert(POSTGRES_ENV_FILE, text::POSTGRES_ENV);
        }
        Subtype::Role(NodeRole::Proxy | NodeRole::Fullnode) | Subtype::Inspect => {
            templates.insert(COLLECTOR_ENV_FILE, text::COLLECTOR_ENV);
        }
    }

    debug!(%subtype, templates = templates.len(), "resolved templates");
    Ok(templates)
}
