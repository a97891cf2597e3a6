//! Ladder Diff: a library for indexing and comparing PLC ladder logic dumps.
//!
//! This crate provides functionality for:
//! - Splitting raw ladder dumps into ordered rungs (`SOR`/`EOR` markers)
//! - Classifying rung tokens into structural/parameter/runtime channels
//! - Computing short content digests and per-revision index documents
//! - Folding many revisions into a deduplicating alignment index
//! - Comparing two revisions into a PASS/FAIL report
//!
//! # Quick Start
//!
//! ```
//! use ladder_diff::{IndexConfig, index_ladder_text};
//!
//! let ladder = index_ladder_text("SOR XIC I:1/0 OTE O:2/0 EOR SOR END EOR", &IndexConfig::default());
//! assert_eq!(ladder.rungs.len(), 1);
//! ```

mod classify;
mod compare;
mod config;
mod digest;
pub(crate) mod error_codes;
mod index;
mod ordered_map;
mod output;
mod rung;
mod snapshot;
mod splitter;

pub use classify::{
    ClassifiedTokens, GENERIC_KEY, PLACEHOLDER, TON_ACCUM_KEY, TON_MNEMONIC, TON_PRESET_KEY,
    TON_TIMER_KEY, classify_tokens,
};
pub use compare::{
    ChannelState, CompareError, ComparisonReport, ComparisonSummary, LadderComparison,
    LadderStatus, ReportEndpoint, ReportStatus, RungComparison, RungStatus, compare_documents,
    compare_revisions, load_document, normalize_ladder_name,
};
pub use config::{CompareOptions, EndRungPolicy, IndexConfig};
pub use digest::{
    DIGEST_LEN, DigestError, build_rung, hash_tokens, index_ladder_text, index_revision,
    ladder_id_from_path,
};
pub use index::{
    AlignmentIndex, AlignmentIndexBuilder, FamilyEntry, LadderFamily, ParameterBucket,
    RungCountRevision, RungExample, RungSlot, StructuralRevision, build_alignment_index,
};
pub use ordered_map::OrderedMap;
pub use output::{serialize_alignment_index, serialize_report, serialize_revision};
pub use rung::{Ladder, ProgramRevision, Rung};
pub use snapshot::{Footprint, SnapshotSummary, read_program_snapshot};
pub use splitter::{END_MARKER, END_SENTINEL, START_MARKER, split_rungs};
