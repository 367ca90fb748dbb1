//! Error types for descriptor generation.

use std::path::PathBuf;

/// Error returned while resolving templates.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// A role that unlocks a signer was configured without a keystore path.
    #[error("`{parameter}` must be set for the {role} role")]
    MissingKeystoreParameter {
        /// The empty parameter.
        parameter: &'static str,
        /// The role that needs it.
        role: celo_primitives::NodeRole,
    },

    /// Reading the keystore or its password file failed.
    #[error("failed to read {}: {source}", path.display())]
    ReadKeystore {
        /// The file that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The keystore target directory could not be created.
    #[error("failed to create keystore directory {}: {source}", path.display())]
    CreateKeystoreDir {
        /// The directory that could not be created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
