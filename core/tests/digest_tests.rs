use ladder_diff::{
    DIGEST_LEN, IndexConfig, build_rung, hash_tokens, index_ladder_text, ladder_id_from_path,
};
use std::path::Path;

#[test]
fn hashing_is_deterministic() {
    let tokens = ["XIC", "_", "OTE", "_"];
    assert_eq!(hash_tokens(tokens), hash_tokens(tokens));
}

#[test]
fn digest_is_short_lowercase_hex() {
    let digest = hash_tokens(["TON", "_", "1.0"]);
    assert_eq!(digest.len(), DIGEST_LEN);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn token_order_is_part_of_identity() {
    assert_ne!(hash_tokens(["A", "B"]), hash_tokens(["B", "A"]));
}

#[test]
fn token_boundaries_are_unambiguous() {
    assert_ne!(hash_tokens(["AB", "C"]), hash_tokens(["A", "BC"]));
    assert_ne!(hash_tokens(["AB"]), hash_tokens(["A", "B"]));
    assert_ne!(hash_tokens::<[&str; 0], &str>([]), hash_tokens([""]));
}

#[test]
fn rung_hashes_ignore_parameter_values_structurally() {
    let config = IndexConfig::default();
    let a = build_rung("XIC I:1/0 OTE O:2/0", &config);
    let b = build_rung("XIC I:1/5 OTE O:2/7", &config);

    // Same shape, different addresses: structural hash agrees, parameter
    // hash does not.
    assert_eq!(a.structural_hash, b.structural_hash);
    assert_ne!(a.parameter_hash, b.parameter_hash);
}

#[test]
fn structural_edit_changes_the_structural_hash() {
    let config = IndexConfig::default();
    let a = build_rung("XIC I:1/0 OTE O:2/0", &config);
    let b = build_rung("XIO I:1/0 OTE O:2/0", &config);
    assert_ne!(a.structural_hash, b.structural_hash);
}

#[test]
fn accumulator_is_runtime_not_parameter_by_default() {
    let config = IndexConfig::default();
    let a = build_rung("TON T4:0 1.0 30 0", &config);
    let b = build_rung("TON T4:0 1.0 30 25", &config);

    assert_eq!(a.structural_hash, b.structural_hash);
    assert_eq!(a.parameter_hash, b.parameter_hash);
    assert_ne!(a.runtime_tokens, b.runtime_tokens);
}

#[test]
fn runtime_channel_can_be_folded_into_the_parameter_hash() {
    let config = IndexConfig {
        include_runtime_in_parameter_hash: true,
        ..Default::default()
    };
    let a = build_rung("TON T4:0 1.0 30 0", &config);
    let b = build_rung("TON T4:0 1.0 30 25", &config);

    assert_eq!(a.structural_hash, b.structural_hash);
    assert_ne!(a.parameter_hash, b.parameter_hash);
}

#[test]
fn rung_ids_are_dense_and_zero_padded() {
    let ladder = index_ladder_text(
        "SOR A EOR SOR B EOR SOR C EOR SOR END EOR",
        &IndexConfig::default(),
    );
    let ids: Vec<&str> = ladder.rungs.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["0000", "0001", "0002"]);
}

#[test]
fn ladder_rollup_hashes_track_rung_content() {
    let config = IndexConfig::default();
    let a = index_ladder_text("SOR XIC I:1/0 OTE O:2/0 EOR", &config);
    let b = index_ladder_text("SOR XIC I:1/0 OTE O:2/0 EOR", &config);
    let c = index_ladder_text("SOR XIO I:1/0 OTE O:2/0 EOR", &config);

    assert!(a.ladder_structural_hash.is_some());
    assert_eq!(a.ladder_structural_hash, b.ladder_structural_hash);
    assert_eq!(a.ladder_parameter_hash, b.ladder_parameter_hash);
    assert_ne!(a.ladder_structural_hash, c.ladder_structural_hash);
}

#[test]
fn rollup_hashes_can_be_disabled() {
    let ladder = index_ladder_text("SOR A EOR", &IndexConfig::legacy());
    assert!(ladder.ladder_structural_hash.is_none());
    assert!(ladder.ladder_parameter_hash.is_none());
}

#[test]
fn ladder_id_strips_dump_suffixes() {
    assert_eq!(ladder_id_from_path(Path::new("/x/LAD003.raw.txt")), "LAD003");
    assert_eq!(ladder_id_from_path(Path::new("LAD004.txt")), "LAD004");
    assert_eq!(ladder_id_from_path(Path::new("MAIN")), "MAIN");
}

#[test]
fn raw_text_round_trips_through_tokens() {
    let ladder = index_ladder_text("SOR XIC   I:1/0 \n OTE O:2/0 EOR", &IndexConfig::default());
    let rung = ladder.rungs.get("0000").expect("rung 0000");
    assert_eq!(rung.raw, rung.tokens.join(" "));
}
