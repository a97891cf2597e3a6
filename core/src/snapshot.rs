//! Program snapshot sidecar parsing.
//!
//! An external tool writes an optional `program_snapshot.json` next to each
//! per-revision index document. Only the list *lengths* (plus the processor
//! string for display) are consumed here; they form the [`Footprint`] used
//! to bucket revisions into families. A missing or malformed sidecar is
//! never an error, it just degrades the revision to an unknown footprint.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

/// `(ladder_count, data_file_count)` signature of one program revision.
///
/// Ordering puts known footprints first (ascending by ladder count, then
/// data-file count) and unknown footprints last, which keeps serialized
/// family order stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Footprint {
    pub ladders: Option<usize>,
    pub data_files: Option<usize>,
}

impl Footprint {
    pub fn known(ladders: usize, data_files: usize) -> Self {
        Self {
            ladders: Some(ladders),
            data_files: Some(data_files),
        }
    }

    pub fn unknown() -> Self {
        Self {
            ladders: None,
            data_files: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.ladders.is_some() && self.data_files.is_some()
    }

    fn rank(&self) -> (u8, u64, u64) {
        (
            if self.is_known() { 0 } else { 1 },
            self.ladders.map_or(u64::MAX, |n| n as u64),
            self.data_files.map_or(u64::MAX, |n| n as u64),
        )
    }
}

impl Ord for Footprint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Footprint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stable string form used as the family key in the alignment index, e.g.
/// `(3, 5)` or `(None, None)`.
impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(f: &mut fmt::Formatter<'_>, value: Option<usize>) -> fmt::Result {
            match value {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "None"),
            }
        }
        write!(f, "(")?;
        part(f, self.ladders)?;
        write!(f, ", ")?;
        part(f, self.data_files)?;
        write!(f, ")")
    }
}

/// The subset of the sidecar retained per program in the alignment index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub ladders: usize,
    pub data_files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    pub snapshot_path: String,
}

impl SnapshotSummary {
    pub fn footprint(&self) -> Footprint {
        Footprint::known(self.ladders, self.data_files)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    program_files: Vec<serde_json::Value>,
    #[serde(default)]
    data_files: Vec<serde_json::Value>,
    #[serde(default)]
    identity: RawIdentity,
}

#[derive(Debug, Default, Deserialize)]
struct RawIdentity {
    #[serde(default)]
    processor: Option<String>,
}

/// Read a sidecar snapshot, returning `None` when it is missing or
/// malformed.
pub fn read_program_snapshot(path: &Path) -> Option<SnapshotSummary> {
    let text = std::fs::read_to_string(path).ok()?;
    let raw: RawSnapshot = serde_json::from_str(&text).ok()?;

    Some(SnapshotSummary {
        ladders: raw.program_files.len(),
        data_files: raw.data_files.len(),
        processor: raw.identity.processor,
        snapshot_path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_display_matches_family_key_format() {
        assert_eq!(Footprint::known(3, 5).to_string(), "(3, 5)");
        assert_eq!(Footprint::unknown().to_string(), "(None, None)");
    }

    #[test]
    fn unknown_footprints_sort_last() {
        let mut footprints = vec![
            Footprint::unknown(),
            Footprint::known(9, 1),
            Footprint::known(3, 5),
            Footprint::known(3, 2),
        ];
        footprints.sort();
        assert_eq!(
            footprints,
            vec![
                Footprint::known(3, 2),
                Footprint::known(3, 5),
                Footprint::known(9, 1),
                Footprint::unknown(),
            ]
        );
    }
}
