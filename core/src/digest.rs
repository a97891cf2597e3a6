//! Short content digests and the per-revision document builder.
//!
//! Digests are truncated SHA-256 over the token sequence with a NUL
//! separator fed after every token, so `["AB", "C"]` and `["A", "BC"]`
//! hash differently. Eight hex characters is enough for the bounded index
//! sizes this crate targets; accidental collisions across a fleet of
//! thousands of rungs are negligible.

use crate::classify::classify_tokens;
use crate::config::IndexConfig;
use crate::error_codes;
use crate::rung::{Ladder, ProgramRevision, Rung};
use crate::splitter::split_rungs;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Length of the hex digest strings in every document.
pub const DIGEST_LEN: usize = 8;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DigestError {
    #[error(
        "[LADDIFF_DIGEST_001] failed to read ladder dump '{path}': {source}. Suggestion: check that the file exists and is readable."
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DigestError {
    pub fn code(&self) -> &'static str {
        match self {
            DigestError::Io { .. } => error_codes::DIGEST_IO,
        }
    }
}

/// Deterministic short digest of an ordered token sequence.
pub fn hash_tokens<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for token in tokens {
        hasher.update(token.as_ref().as_bytes());
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();

    let mut out = String::with_capacity(DIGEST_LEN);
    for byte in digest.iter().take(DIGEST_LEN / 2) {
        // Infallible for String.
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Tokenize and classify one rung's text, computing both channel digests.
pub fn build_rung(rung_text: &str, config: &IndexConfig) -> Rung {
    let tokens: Vec<String> = rung_text.split_whitespace().map(str::to_string).collect();
    let classified = classify_tokens(&tokens);

    let mut signature: Vec<String> = classified
        .parameters
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    if config.include_runtime_in_parameter_hash {
        signature.extend(
            classified
                .runtime
                .iter()
                .map(|(key, value)| format!("{}={}", key, value)),
        );
    }

    let structural_hash = hash_tokens(&classified.structural);
    let parameter_hash = hash_tokens(&signature);

    Rung {
        raw: rung_text.to_string(),
        tokens,
        structural_tokens: classified.structural,
        parameter_tokens: classified.parameters,
        runtime_tokens: classified.runtime,
        structural_hash,
        parameter_hash,
    }
}

/// Split a raw ladder dump and index every rung, assigning dense
/// zero-padded ids by physical order.
pub fn index_ladder_text(raw_text: &str, config: &IndexConfig) -> Ladder {
    let mut rungs = BTreeMap::new();

    for (idx, rung_text) in split_rungs(raw_text, config.end_rung_policy).iter().enumerate() {
        rungs.insert(format!("{:04}", idx), build_rung(rung_text, config));
    }

    let (ladder_structural_hash, ladder_parameter_hash) = if config.ladder_rollup_hashes {
        (
            Some(hash_tokens(rungs.values().map(|r| r.structural_hash.as_str()))),
            Some(hash_tokens(rungs.values().map(|r| r.parameter_hash.as_str()))),
        )
    } else {
        (None, None)
    };

    Ladder {
        rungs,
        ladder_structural_hash,
        ladder_parameter_hash,
    }
}

/// Ladder identifier derived from a dump file name: the `.raw.txt` suffix
/// (or, failing that, the final extension) is stripped.
pub fn ladder_id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if let Some(base) = name.strip_suffix(".raw.txt") {
        return base.to_string();
    }
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string()
}

/// Index one program revision from its ladder dump files.
///
/// The caller supplies the concrete file list; no directory discovery
/// happens here. An unreadable dump fails the whole revision.
pub fn index_revision(
    location: &str,
    revision: &str,
    revision_dir: &Path,
    ladder_files: &[PathBuf],
    config: &IndexConfig,
) -> Result<ProgramRevision, DigestError> {
    let mut ladders = BTreeMap::new();

    for file in ladder_files {
        let raw_text = std::fs::read_to_string(file).map_err(|source| DigestError::Io {
            path: file.display().to_string(),
            source,
        })?;
        ladders.insert(ladder_id_from_path(file), index_ladder_text(&raw_text, config));
    }

    Ok(ProgramRevision {
        location: location.to_string(),
        revision: revision.to_string(),
        path: Some(revision_dir.display().to_string()),
        ladders,
    })
}
