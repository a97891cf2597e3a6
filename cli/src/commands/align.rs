use crate::commands::write_output;
use anyhow::{Context, Result, bail};
use ladder_diff::{build_alignment_index, serialize_alignment_index};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

pub fn run(root: &str, output: Option<&str>) -> Result<ExitCode> {
    let root = Path::new(root);

    let mut documents: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file() && entry.file_name() == "likeaversion.json"
        })
        .map(|entry| entry.into_path())
        .collect();
    documents.sort();

    if documents.is_empty() {
        bail!(
            "No likeaversion.json documents found under {}; run `ladder-diff index` first",
            root.display()
        );
    }

    let index = build_alignment_index(&documents);
    for warning in &index.warnings {
        eprintln!("Warning: {}", warning);
    }

    let json = serialize_alignment_index(&index).context("Failed to serialize alignment index")?;
    write_output(output, &json)?;

    eprintln!(
        "alignment index built: {} families from {} documents",
        index.len(),
        documents.len()
    );
    Ok(ExitCode::SUCCESS)
}
