//! Core primitive types for Celo node descriptors.
//!
//! This crate provides the types shared by every stage of descriptor
//! generation and health verification, kept separate to avoid circular
//! dependencies:
//!
//! - [`NodeRole`] / [`Subtype`] - which kind of node process is described
//! - [`Network`] / [`Images`] - network selection and container images
//! - [`NodeContext`] - immutable node identity passed into every component
//! - [`ConfigMap`] / [`ConfigPatch`] - the node's string parameters

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
mod context;
mod network;

pub use config::{ConfigMap, ConfigPatch};
pub use context::{DEFAULT_NAME_PREFIX, NodeContext};
pub use network::{Images, Network};

use std::str::FromStr;

/// Celo node role determining parameters, containers and templates.
///
/// Every component matches on this exhaustively; the "show everything" mode
/// is modelled separately by [`Subtype::Inspect`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NodeRole {
    /// Public-facing proxy shielding a validator.
    Proxy,

    /// Block-producing validator, only reachable through its proxy.
    Validator,

    /// Syncing full node serving RPC and light clients.
    Fullnode,

    /// Full node with an unlocked attestation signer.
    AttestationNode,

    /// Attestation service backed by postgres and twilio.
    AttestationService,
}

impl NodeRole {
    /// Returns true if this role signs with a keystore unlocked at startup.
    pub fn requires_keystore(&self) -> bool {
        matches!(self, NodeRole::Validator | NodeRole::AttestationNode)
    }

    /// Returns true if this role publishes a JSON-RPC endpoint worth probing.
    pub fn exposes_rpc(&self) -> bool {
        matches!(self, NodeRole::Fullnode | NodeRole::AttestationNode)
    }

    /// Returns true if this role runs alongside the state collector sidecar.
    pub fn runs_collector(&self) -> bool {
        matches!(self, NodeRole::Proxy | NodeRole::Validator | NodeRole::Fullnode)
    }
}

/// Error returned when a subtype string names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node subtype `{0}`, expected one of proxy, validator, fullnode, attestation-node, attestation-service")]
pub struct UnknownRole(pub String);

/// The role selection read from a node's `subtype` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtype {
    /// A concrete role.
    Role(NodeRole),

    /// No role selected: surface every option for manifest inspection.
    Inspect,
}

impl Subtype {
    /// Parses a subtype, treating an empty value as [`Subtype::Inspect`].
    ///
    /// Unrecognised non-empty values are rejected rather than silently
    /// degraded to a different topology.
    pub fn parse(value: &str) -> Result<Self, UnknownRole> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Subtype::Inspect);
        }
        NodeRole::from_str(value)
            .map(Subtype::Role)
            .map_err(|_| UnknownRole(value.to_string()))
    }

    /// Returns the selected role, if any.
    pub fn role(&self) -> Option<NodeRole> {
        match self {
            Subtype::Role(role) => Some(*role),
            Subtype::Inspect => None,
        }
    }
}

impl From<NodeRole> for Subtype {
    fn from(role: NodeRole) -> Self {
        Subtype::Role(role)
    }
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subtype::Role(role) => role.fmt(f),
            Subtype::Inspect => f.write_str("inspect"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_role_round_trips_through_display() {
        for role in NodeRole::iter() {
            assert_eq!(Subtype::parse(&role.to_string()), Ok(Subtype::Role(role)));
        }
        assert_eq!(NodeRole::AttestationService.to_string(), "attestation-service");
    }

    #[test]
    fn test_empty_subtype_is_inspect() {
        assert_eq!(Subtype::parse(""), Ok(Subtype::Inspect));
        assert_eq!(Subtype::parse("  "), Ok(Subtype::Inspect));
        assert_eq!(Subtype::Inspect.role(), None);
    }

    #[test]
    fn test_unknown_subtype_is_rejected() {
        let err = Subtype::parse("archive").unwrap_err();
        assert_eq!(err, UnknownRole("archive".to_string()));
    }

    #[test]
    fn test_role_capabilities() {
        assert!(NodeRole::Validator.requires_keystore());
        assert!(NodeRole::AttestationNode.requires_keystore());
        assert!(!NodeRole::Fullnode.requires_keystore());

        assert!(!NodeRole::Validator.exposes_rpc());
        assert!(NodeRole::Fullnode.exposes_rpc());

        assert!(NodeRole::Proxy.runs_collector());
        assert!(!NodeRole::AttestationService.runs_collector());
    }
}
