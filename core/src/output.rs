//! JSON serialization for the three output documents.
//!
//! All documents are written pretty-printed (2-space indent), matching the
//! on-disk format downstream tooling already reads.

use crate::compare::ComparisonReport;
use crate::index::AlignmentIndex;
use crate::rung::ProgramRevision;

pub fn serialize_revision(doc: &ProgramRevision) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

pub fn serialize_alignment_index(index: &AlignmentIndex) -> serde_json::Result<String> {
    serde_json::to_string_pretty(index)
}

pub fn serialize_report(report: &ComparisonReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
