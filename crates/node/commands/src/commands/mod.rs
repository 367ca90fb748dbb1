//! Subcommand implementations.

pub mod describe;
pub mod genesis;

use eyre::{Result, WrapErr};
use serde::Serialize;
use std::io::{self, Write};

/// Pretty-print `value` as JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).wrap_err("Failed to serialize output")?;
    writeln!(stdout)?;
    Ok(())
}
