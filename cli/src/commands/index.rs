use anyhow::{Context, Result, bail};
use ladder_diff::{IndexConfig, index_revision, serialize_revision};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// File name of the per-revision index document written next to each
/// revision's `ladders/` directory.
const DOCUMENT_FILE_NAME: &str = "likeaversion.json";

pub fn run(root: &str, legacy: bool) -> Result<ExitCode> {
    let root = Path::new(root);
    if !root.is_dir() {
        bail!("Root directory not found: {}", root.display());
    }

    let config = if legacy {
        IndexConfig::legacy()
    } else {
        IndexConfig::default()
    };

    let revision_dirs = discover_revision_dirs(root);
    if revision_dirs.is_empty() {
        bail!(
            "No revision directories with a ladders/ subfolder found under {}",
            root.display()
        );
    }

    let mut indexed = 0;
    for rev_dir in &revision_dirs {
        let ladder_files = collect_ladder_dumps(&rev_dir.join("ladders"))?;
        if ladder_files.is_empty() {
            continue;
        }

        let location = dir_name(rev_dir.parent().unwrap_or(root));
        let revision = dir_name(rev_dir);

        let doc = match index_revision(&location, &revision, rev_dir, &ladder_files, &config) {
            Ok(doc) => doc,
            Err(e) => {
                // One unreadable revision must not abort the rest.
                eprintln!("Warning: skipping {}: {}", rev_dir.display(), e);
                continue;
            }
        };

        let json = serialize_revision(&doc).context("Failed to serialize index document")?;
        let out_path = rev_dir.join(DOCUMENT_FILE_NAME);
        fs::write(&out_path, json)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;

        println!("indexed {} ({} ladders)", doc.program_id(), doc.ladders.len());
        indexed += 1;
    }

    println!("{} revisions indexed", indexed);
    Ok(ExitCode::SUCCESS)
}

/// A revision directory is any directory under the root with a `ladders`
/// subfolder.
fn discover_revision_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.path().join("ladders").is_dir())
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();
    dirs
}

/// Only `LAD*.raw.txt` files are ladder dumps; other `.raw.txt` files in
/// the directory are ignored.
fn collect_ladder_dumps(ladders_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(ladders_dir)
        .with_context(|| format!("Failed to read {}", ladders_dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("LAD") && n.ends_with(".raw.txt"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
