//! Configuration for indexing and comparison.
//!
//! `IndexConfig` centralizes the behavioral knobs of the digest builder so
//! that policy decisions live in one place instead of being hardcoded at
//! call sites.

use serde::{Deserialize, Serialize};

/// Policy for recognizing the structural `END` sentinel rung.
///
/// The two historical splitter implementations disagreed: one dropped only a
/// rung consisting of the single token `END`, the other dropped any rung
/// whose joined text equals `"END"` (which also drops empty rungs). The
/// single-token rule is the conservative default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndRungPolicy {
    /// Drop a rung only when it is exactly the single token `END`.
    SingleToken,
    /// Drop a rung when its space-joined text equals `END`, and drop empty
    /// rungs as well.
    JoinedText,
}

impl Default for EndRungPolicy {
    fn default() -> Self {
        EndRungPolicy::SingleToken
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// How the splitter recognizes the `END` sentinel rung.
    pub end_rung_policy: EndRungPolicy,
    /// When true, runtime `KEY=VALUE` pairs are appended to the parameter
    /// signature, so live-state changes surface as parameter differences.
    pub include_runtime_in_parameter_hash: bool,
    /// When true, ladder-level rollup hashes (digest of the ordered per-rung
    /// hashes) are computed alongside the per-rung hashes.
    pub ladder_rollup_hashes: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            end_rung_policy: EndRungPolicy::SingleToken,
            include_runtime_in_parameter_hash: false,
            ladder_rollup_hashes: true,
        }
    }
}

impl IndexConfig {
    /// Configuration matching the legacy splitter: joined-text `END`
    /// filtering and no ladder rollups.
    pub fn legacy() -> Self {
        Self {
            end_rung_policy: EndRungPolicy::JoinedText,
            ladder_rollup_hashes: false,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Include every rung in the drilldown, not just differing ones, and
    /// drill into ladders even when they are identical.
    pub include_all_rungs: bool,
}
