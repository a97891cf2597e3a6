//! Core intermediate representation for indexed ladder programs.
//!
//! This module defines the wire-compatible document types:
//! - [`Rung`]: one unit of ladder logic with its token channels and digests
//! - [`Ladder`]: an ordered collection of rungs keyed by zero-padded rung id
//! - [`ProgramRevision`]: one indexed program snapshot (a "likeaversion"
//!   document), the unit the alignment index and comparator consume

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single rung of ladder logic.
///
/// `parameter_tokens` and `runtime_tokens` serialize as arrays of
/// `[key, value]` pairs; their encounter order is part of rung identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rung {
    /// The rung text as joined tokens (single spaces).
    pub raw: String,
    /// Ordered token sequence between the start/end markers.
    pub tokens: Vec<String>,
    /// Same cardinality as `tokens`, with non-structural operands replaced
    /// by the placeholder token.
    pub structural_tokens: Vec<String>,
    /// Configured (design-time) operand values, in encounter order.
    pub parameter_tokens: Vec<(String, String)>,
    /// Live/state operand values, in encounter order.
    pub runtime_tokens: Vec<(String, String)>,
    /// Short digest of `structural_tokens`.
    pub structural_hash: String,
    /// Short digest of the parameter signature (`KEY=VALUE` strings).
    pub parameter_hash: String,
}

/// A named ladder: rungs keyed by zero-padded positional id (`"0000"`..).
///
/// # Invariants
///
/// Rung ids are dense and ordered `0000..N-1`; the `END` sentinel rung is
/// excluded from both the count and the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    pub rungs: BTreeMap<String, Rung>,
    /// Digest of the ordered per-rung structural hashes, when computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder_structural_hash: Option<String>,
    /// Digest of the ordered per-rung parameter hashes, when computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder_parameter_hash: Option<String>,
}

impl Ladder {
    pub fn rung_count(&self) -> usize {
        self.rungs.len()
    }
}

/// One indexed program revision: the per-revision index document.
///
/// Treated as immutable once written; re-running indexing overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRevision {
    pub location: String,
    pub revision: String,
    /// Source revision directory, recorded for report provenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub ladders: BTreeMap<String, Ladder>,
}

impl ProgramRevision {
    /// Fleet-wide program identifier: `location/revision`.
    pub fn program_id(&self) -> String {
        format!("{}/{}", self.location, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_id_joins_location_and_revision() {
        let doc = ProgramRevision {
            location: "plant-7".to_string(),
            revision: "rev-003".to_string(),
            path: None,
            ladders: BTreeMap::new(),
        };
        assert_eq!(doc.program_id(), "plant-7/rev-003");
    }

    #[test]
    fn parameter_tokens_serialize_as_pair_arrays() {
        let rung = Rung {
            raw: "TON T4:0 1.0 30 0".to_string(),
            tokens: vec![],
            structural_tokens: vec![],
            parameter_tokens: vec![("TON_TIMER".to_string(), "T4:0".to_string())],
            runtime_tokens: vec![],
            structural_hash: "00000000".to_string(),
            parameter_hash: "00000000".to_string(),
        };
        let json = serde_json::to_value(&rung).expect("serialize rung");
        assert_eq!(
            json["parameter_tokens"],
            serde_json::json!([["TON_TIMER", "T4:0"]])
        );
    }

    #[test]
    fn absent_rollup_hashes_are_omitted_and_tolerated() {
        let ladder = Ladder {
            rungs: BTreeMap::new(),
            ladder_structural_hash: None,
            ladder_parameter_hash: None,
        };
        let json = serde_json::to_string(&ladder).expect("serialize ladder");
        assert!(!json.contains("ladder_structural_hash"));

        let parsed: Ladder = serde_json::from_str(r#"{"rungs":{}}"#).expect("deserialize ladder");
        assert!(parsed.ladder_structural_hash.is_none());
    }
}
