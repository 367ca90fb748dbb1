//! Signer keystore material copied into the template set.

use crate::error::DescriptorError;
use celo_primitives::{ConfigMap, NodeContext, NodeRole};
use std::{fs, path::Path};
use tracing::debug;

/// Raw keystore JSON and password, passed through unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystore {
    /// File name of the keystore, kept so geth finds it under the same name.
    pub filename: String,
    /// Keystore JSON content.
    pub json: String,
    /// Content of the password file.
    pub password: String,
}

/// Read the keystore and password files named by `keystore-file` and
/// `keystore-pass`, and make sure the node's keystore directory exists.
///
/// Any failure is returned: a node that unlocks a signer must not start
/// without its key.
pub fn load_keystore(
    ctx: &NodeContext,
    role: NodeRole,
    config: &ConfigMap,
) -> Result<Keystore, DescriptorError> {
    let keystore_file = required(config, "keystore-file", role)?;
    let password_file = required(config, "keystore-pass", role)?;

    let json = read(keystore_file)?;
    let password = read(password_file)?;

    let target = ctx.keystore_dir();
    fs::create_dir_all(&target)
        .map_err(|source| DescriptorError::CreateKeystoreDir { path: target.clone(), source })?;

    let filename = Path::new(keystore_file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(%filename, dir = %target.display(), "loaded keystore");

    Ok(Keystore { filename, json, password })
}

fn required<'a>(
    config: &'a ConfigMap,
    parameter: &'static str,
    role: NodeRole,
) -> Result<&'a str, DescriptorError> {
    match config.get(parameter) {
        "" => Err(DescriptorError::MissingKeystoreParameter { parameter, role }),
        value => Ok(value),
    }
}

fn read(path: &str) -> Result<String, DescriptorError> {
    fs::read_to_string(path)
        .map_err(|source| DescriptorError::ReadKeystore { path: path.into(), source })
}
