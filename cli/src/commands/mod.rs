pub mod align;
pub mod compare;
pub mod index;

use anyhow::{Context, Result};
use std::fs;

/// Write a document to the given path, or to stdout when no path was given.
pub(crate) fn write_output(output: Option<&str>, json: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write output to {}", path))?,
        None => println!("{}", json),
    }
    Ok(())
}
