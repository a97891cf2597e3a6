//! Point-to-point comparison of two per-revision index documents.
//!
//! Produces a hierarchical PASS/FAIL report: every ladder present on either
//! side is classified, and a per-rung drilldown is attached when the ladder
//! differs (or unconditionally with
//! [`CompareOptions::include_all_rungs`][crate::CompareOptions]).
//! Structural difference always takes precedence over parameter difference.
//!
//! This is a pure transform: no disk I/O happens here beyond the explicit
//! document loads in [`compare_documents`].

use crate::config::CompareOptions;
use crate::error_codes;
use crate::rung::{Ladder, ProgramRevision, Rung};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompareError {
    #[error(
        "[LADDIFF_COMPARE_001] failed to read index document '{path}': {source}. Suggestion: check the path and run indexing first."
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "[LADDIFF_COMPARE_002] malformed index document '{path}': {source}. Suggestion: re-run indexing to regenerate the document."
    )]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CompareError {
    pub fn code(&self) -> &'static str {
        match self {
            CompareError::Io { .. } => error_codes::COMPARE_IO,
            CompareError::Malformed { .. } => error_codes::COMPARE_MALFORMED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LadderStatus {
    Identical,
    LogicDifference,
    ParameterDifference,
    MissingLeft,
    MissingRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RungStatus {
    Identical,
    Different,
    MissingLeft,
    MissingRight,
}

/// Per-channel verdict recorded alongside the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    Same,
    Different,
}

/// One side of the comparison, identifying the compared document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEndpoint {
    pub location: String,
    pub revision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub program_id: String,
    #[serde(rename = "likeaversion_index")]
    pub index_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub status: ReportStatus,
    /// Number of ladders whose status is not `identical`.
    pub ladder_differences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RungComparison {
    pub rung: String,
    pub status: RungStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<ChannelState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ChannelState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_structural_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_structural_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_parameter_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_parameter_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub left_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right_tokens: Vec<String>,
}

impl RungComparison {
    fn missing(rung_id: &str, status: RungStatus) -> Self {
        Self {
            rung: rung_id.to_string(),
            status,
            structural: None,
            parameters: None,
            left_structural_hash: None,
            right_structural_hash: None,
            left_parameter_hash: None,
            right_parameter_hash: None,
            left_tokens: Vec::new(),
            right_tokens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderComparison {
    pub ladder_id: String,
    /// The ladder key as it appears in the documents (pre-normalization).
    pub file: String,
    pub status: LadderStatus,
    pub structural: ChannelState,
    pub parameters: ChannelState,
    pub left_ladder_struct_hash: Option<String>,
    pub right_ladder_struct_hash: Option<String>,
    pub left_ladder_param_hash: Option<String>,
    pub right_ladder_param_hash: Option<String>,
    pub rungs: BTreeMap<String, RungComparison>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub left: ReportEndpoint,
    pub right: ReportEndpoint,
    pub summary: ComparisonSummary,
    pub ladders: BTreeMap<String, LadderComparison>,
}

/// Strip the legacy `.clean.txt` suffix from a ladder key.
pub fn normalize_ladder_name(name: &str) -> &str {
    name.strip_suffix(".clean.txt").unwrap_or(name)
}

/// Load one per-revision index document. Malformed or missing input is a
/// fatal error for the comparison.
pub fn load_document(path: &Path) -> Result<ProgramRevision, CompareError> {
    let text = std::fs::read_to_string(path).map_err(|source| CompareError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CompareError::Malformed {
        path: path.display().to_string(),
        source,
    })
}

/// Load and compare two index documents.
pub fn compare_documents(
    left_path: &Path,
    right_path: &Path,
    options: &CompareOptions,
) -> Result<ComparisonReport, CompareError> {
    let left = load_document(left_path)?;
    let right = load_document(right_path)?;
    Ok(compare_revisions(
        &left, &right, left_path, right_path, options,
    ))
}

/// Compare two loaded revisions into a structured report.
pub fn compare_revisions(
    left: &ProgramRevision,
    right: &ProgramRevision,
    left_index_path: &Path,
    right_index_path: &Path,
    options: &CompareOptions,
) -> ComparisonReport {
    let mut summary = ComparisonSummary {
        status: ReportStatus::Pass,
        ladder_differences: 0,
    };
    let mut ladders = BTreeMap::new();

    let all_ladders: BTreeSet<&String> =
        left.ladders.keys().chain(right.ladders.keys()).collect();

    for ladder_file in all_ladders {
        let entry = compare_ladder(
            ladder_file,
            left.ladders.get(ladder_file),
            right.ladders.get(ladder_file),
            options,
        );

        if entry.status != LadderStatus::Identical {
            summary.status = ReportStatus::Fail;
            summary.ladder_differences += 1;
        }

        ladders.insert(entry.ladder_id.clone(), entry);
    }

    ComparisonReport {
        left: endpoint(left, left_index_path),
        right: endpoint(right, right_index_path),
        summary,
        ladders,
    }
}

fn endpoint(doc: &ProgramRevision, index_path: &Path) -> ReportEndpoint {
    ReportEndpoint {
        location: doc.location.clone(),
        revision: doc.revision.clone(),
        path: doc.path.clone(),
        program_id: doc.program_id(),
        index_path: index_path.display().to_string(),
    }
}

fn compare_ladder(
    ladder_file: &str,
    left: Option<&Ladder>,
    right: Option<&Ladder>,
    options: &CompareOptions,
) -> LadderComparison {
    let mut entry = LadderComparison {
        ladder_id: normalize_ladder_name(ladder_file).to_string(),
        file: ladder_file.to_string(),
        status: LadderStatus::Identical,
        structural: ChannelState::Same,
        parameters: ChannelState::Same,
        left_ladder_struct_hash: None,
        right_ladder_struct_hash: None,
        left_ladder_param_hash: None,
        right_ladder_param_hash: None,
        rungs: BTreeMap::new(),
    };

    match (left, right) {
        (None, _) => entry.status = LadderStatus::MissingLeft,
        (_, None) => entry.status = LadderStatus::MissingRight,
        (Some(l), Some(r)) => {
            entry.left_ladder_struct_hash = l.ladder_structural_hash.clone();
            entry.right_ladder_struct_hash = r.ladder_structural_hash.clone();
            entry.left_ladder_param_hash = l.ladder_parameter_hash.clone();
            entry.right_ladder_param_hash = r.ladder_parameter_hash.clone();

            let rollups_present = l.ladder_structural_hash.is_some()
                && r.ladder_structural_hash.is_some();

            if rollups_present {
                if l.ladder_structural_hash != r.ladder_structural_hash {
                    entry.structural = ChannelState::Different;
                    entry.status = LadderStatus::LogicDifference;
                } else if l.ladder_parameter_hash != r.ladder_parameter_hash {
                    entry.parameters = ChannelState::Different;
                    entry.status = LadderStatus::ParameterDifference;
                }
            } else {
                // Documents without rollup hashes: derive the ladder status
                // from the per-rung hashes instead.
                let scan = scan_rungs(&l.rungs, &r.rungs);
                if scan.any_structural || scan.any_missing {
                    entry.structural = ChannelState::Different;
                    entry.status = LadderStatus::LogicDifference;
                } else if scan.any_parameter {
                    entry.parameters = ChannelState::Different;
                    entry.status = LadderStatus::ParameterDifference;
                }
            }
        }
    }

    if options.include_all_rungs || entry.status != LadderStatus::Identical {
        static EMPTY: BTreeMap<String, Rung> = BTreeMap::new();
        let left_rungs = left.map_or(&EMPTY, |l| &l.rungs);
        let right_rungs = right.map_or(&EMPTY, |r| &r.rungs);
        entry.rungs = compare_rungs(left_rungs, right_rungs, options.include_all_rungs);
    }

    entry
}

struct RungScan {
    any_structural: bool,
    any_parameter: bool,
    any_missing: bool,
}

fn scan_rungs(left: &BTreeMap<String, Rung>, right: &BTreeMap<String, Rung>) -> RungScan {
    let mut scan = RungScan {
        any_structural: false,
        any_parameter: false,
        any_missing: false,
    };

    let all_rungs: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    for rung_id in all_rungs {
        match (left.get(rung_id), right.get(rung_id)) {
            (Some(l), Some(r)) => {
                scan.any_structural |= l.structural_hash != r.structural_hash;
                scan.any_parameter |= l.parameter_hash != r.parameter_hash;
            }
            _ => scan.any_missing = true,
        }
    }

    scan
}

fn compare_rungs(
    left: &BTreeMap<String, Rung>,
    right: &BTreeMap<String, Rung>,
    include_all: bool,
) -> BTreeMap<String, RungComparison> {
    let mut out = BTreeMap::new();

    let all_rungs: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    for rung_id in all_rungs {
        let (l, r) = match (left.get(rung_id), right.get(rung_id)) {
            (None, _) => {
                out.insert(
                    rung_id.clone(),
                    RungComparison::missing(rung_id, RungStatus::MissingLeft),
                );
                continue;
            }
            (_, None) => {
                out.insert(
                    rung_id.clone(),
                    RungComparison::missing(rung_id, RungStatus::MissingRight),
                );
                continue;
            }
            (Some(l), Some(r)) => (l, r),
        };

        let structural = channel_state(&l.structural_hash, &r.structural_hash);
        let parameters = channel_state(&l.parameter_hash, &r.parameter_hash);
        let status = if structural == ChannelState::Different
            || parameters == ChannelState::Different
        {
            RungStatus::Different
        } else {
            RungStatus::Identical
        };

        if include_all || status != RungStatus::Identical {
            out.insert(
                rung_id.clone(),
                RungComparison {
                    rung: rung_id.clone(),
                    status,
                    structural: Some(structural),
                    parameters: Some(parameters),
                    left_structural_hash: Some(l.structural_hash.clone()),
                    right_structural_hash: Some(r.structural_hash.clone()),
                    left_parameter_hash: Some(l.parameter_hash.clone()),
                    right_parameter_hash: Some(r.parameter_hash.clone()),
                    left_tokens: l.tokens.clone(),
                    right_tokens: r.tokens.clone(),
                },
            );
        }
    }

    out
}

fn channel_state(left: &str, right: &str) -> ChannelState {
    if left == right {
        ChannelState::Same
    } else {
        ChannelState::Different
    }
}
