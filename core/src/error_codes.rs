//! Stable machine-readable error codes.
//!
//! Every error variant exposed by this crate carries one of these codes in
//! its message and via a `code()` accessor, so downstream tooling can match
//! on failures without parsing prose.

pub(crate) const DIGEST_IO: &str = "LADDIFF_DIGEST_001";
pub(crate) const COMPARE_IO: &str = "LADDIFF_COMPARE_001";
pub(crate) const COMPARE_MALFORMED: &str = "LADDIFF_COMPARE_002";
