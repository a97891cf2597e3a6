//! The fleet-wide alignment index.
//!
//! Folds any number of per-revision documents into a deduplicating
//! hierarchy: footprint family, then ladder name, then rung-count revision,
//! then rung number, then structural-hash revision, then parameter-hash
//! bucket. Every level keeps the set of contributing program ids; each
//! parameter bucket keeps exactly one representative example, the first
//! observed (all contributors are hash-equal by construction).
//!
//! Building is a pure fold over the inputs: the index is constructed fresh
//! in memory and never partially mutated afterwards. A failure local to one
//! document degrades to a warning instead of aborting the run.

use crate::ordered_map::OrderedMap;
use crate::rung::{ProgramRevision, Rung};
use crate::snapshot::{Footprint, SnapshotSummary, read_program_snapshot};
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Sidecar file looked up next to each per-revision document.
pub(crate) const SNAPSHOT_FILE_NAME: &str = "program_snapshot.json";

/// Rung number used when a rung id fails to parse.
const UNPARSEABLE_RUNG_NO: i64 = -1;

/// Representative rung payload retained per parameter bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RungExample {
    pub raw: String,
    pub tokens: Vec<String>,
    pub structural_tokens: Vec<String>,
    pub parameter_tokens: Vec<(String, String)>,
    pub runtime_tokens: Vec<(String, String)>,
}

impl RungExample {
    fn from_rung(rung: &Rung) -> Self {
        Self {
            raw: rung.raw.clone(),
            tokens: rung.tokens.clone(),
            structural_tokens: rung.structural_tokens.clone(),
            parameter_tokens: rung.parameter_tokens.clone(),
            runtime_tokens: rung.runtime_tokens.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterBucket {
    pub programs: BTreeSet<String>,
    pub example: Option<RungExample>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StructuralRevision {
    pub programs: BTreeSet<String>,
    pub parameters: OrderedMap<String, ParameterBucket>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RungSlot {
    pub revisions: OrderedMap<String, StructuralRevision>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RungCountRevision {
    pub programs: BTreeSet<String>,
    pub rungs: OrderedMap<i64, RungSlot>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LadderFamily {
    pub revisions: OrderedMap<usize, RungCountRevision>,
}

/// One footprint family: every revision whose sidecar reported the same
/// `(ladder_count, data_file_count)` pair, plus the unknown-footprint
/// bucket for revisions without a usable sidecar.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyEntry {
    pub footprint: Footprint,
    pub programs: BTreeSet<String>,
    pub program_stats: BTreeMap<String, SnapshotSummary>,
    pub ladders: OrderedMap<String, LadderFamily>,
}

impl FamilyEntry {
    fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            programs: BTreeSet::new(),
            program_stats: BTreeMap::new(),
            ladders: OrderedMap::new(),
        }
    }
}

/// The built alignment index.
///
/// Serializes as a JSON map keyed by the stable footprint string (known
/// footprints first, ascending; unknown last); `complete`/`warnings` are
/// in-memory diagnostics for the caller, not part of the wire document.
#[derive(Debug, Clone)]
pub struct AlignmentIndex {
    families: Vec<(Footprint, FamilyEntry)>,
    pub complete: bool,
    pub warnings: Vec<String>,
}

impl AlignmentIndex {
    pub fn families(&self) -> impl Iterator<Item = (&Footprint, &FamilyEntry)> {
        self.families.iter().map(|(k, v)| (k, v))
    }

    pub fn family(&self, footprint: &Footprint) -> Option<&FamilyEntry> {
        self.families
            .iter()
            .find(|(k, _)| k == footprint)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl Serialize for AlignmentIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.families.len()))?;
        for (footprint, family) in &self.families {
            map.serialize_entry(&footprint.to_string(), family)?;
        }
        map.end()
    }
}

/// Explicit get-or-insert builder over the nested family structure.
#[derive(Debug, Default)]
pub struct AlignmentIndexBuilder {
    families: OrderedMap<Footprint, FamilyEntry>,
    warnings: Vec<String>,
}

impl AlignmentIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one per-revision document into the index. The snapshot summary
    /// is optional; without it the revision lands in the unknown-footprint
    /// family.
    pub fn add_document(&mut self, doc: &ProgramRevision, snapshot: Option<&SnapshotSummary>) {
        let footprint = snapshot.map_or_else(Footprint::unknown, SnapshotSummary::footprint);
        let program_id = doc.program_id();

        let family = self
            .families
            .get_or_insert_with(footprint, || FamilyEntry::new(footprint));
        family.programs.insert(program_id.clone());
        if let Some(snapshot) = snapshot {
            family
                .program_stats
                .insert(program_id.clone(), snapshot.clone());
        }

        for (ladder_name, ladder) in &doc.ladders {
            let ladder_entry = family
                .ladders
                .get_or_insert_with(ladder_name.clone(), LadderFamily::default);
            let count_revision = ladder_entry
                .revisions
                .get_or_insert_with(ladder.rung_count(), RungCountRevision::default);
            count_revision.programs.insert(program_id.clone());

            for (rung_id, rung) in &ladder.rungs {
                let rung_no = rung_id
                    .trim()
                    .parse::<i64>()
                    .unwrap_or(UNPARSEABLE_RUNG_NO);

                let slot = count_revision
                    .rungs
                    .get_or_insert_with(rung_no, RungSlot::default);
                let structural = slot
                    .revisions
                    .get_or_insert_with(rung.structural_hash.clone(), StructuralRevision::default);
                structural.programs.insert(program_id.clone());

                let bucket = structural
                    .parameters
                    .get_or_insert_with(rung.parameter_hash.clone(), ParameterBucket::default);
                bucket.programs.insert(program_id.clone());
                if bucket.example.is_none() {
                    bucket.example = Some(RungExample::from_rung(rung));
                }
            }
        }
    }

    /// Record a non-fatal, per-document failure; the finished index will
    /// carry it and report `complete == false`.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn finish(self) -> AlignmentIndex {
        let mut families = self.families.into_entries();
        families.sort_by_key(|(footprint, _)| *footprint);

        AlignmentIndex {
            families,
            complete: self.warnings.is_empty(),
            warnings: self.warnings,
        }
    }
}

/// Build an alignment index from a list of per-revision document paths.
///
/// Each document's sidecar snapshot is looked up in the same directory. A
/// document that cannot be read or parsed is skipped with a warning; the
/// rest of the fleet still indexes.
pub fn build_alignment_index(document_paths: &[PathBuf]) -> AlignmentIndex {
    let mut builder = AlignmentIndexBuilder::new();
    let mut snapshot_cache: FxHashMap<PathBuf, Option<SnapshotSummary>> = FxHashMap::default();

    for path in document_paths {
        let doc = match load_revision_document(path) {
            Ok(doc) => doc,
            Err(message) => {
                builder.add_warning(message);
                continue;
            }
        };

        let revision_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let snapshot = snapshot_cache
            .entry(revision_dir.clone())
            .or_insert_with(|| read_program_snapshot(&revision_dir.join(SNAPSHOT_FILE_NAME)));

        builder.add_document(&doc, snapshot.as_ref());
    }

    builder.finish()
}

fn load_revision_document(path: &Path) -> Result<ProgramRevision, String> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        format!(
            "skipping index document '{}': read failed: {}",
            path.display(),
            e
        )
    })?;
    serde_json::from_str(&text).map_err(|e| {
        format!(
            "skipping index document '{}': malformed JSON: {}",
            path.display(),
            e
        )
    })
}
