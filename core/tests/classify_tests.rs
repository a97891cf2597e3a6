use ladder_diff::{GENERIC_KEY, PLACEHOLDER, classify_tokens};

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn ton_pattern_splits_channels_by_semantics() {
    let classified = classify_tokens(&tokens("TON T4:0 1.0 30 0"));

    assert_eq!(
        classified.structural,
        vec!["TON", PLACEHOLDER, "1.0", PLACEHOLDER, PLACEHOLDER]
    );
    assert_eq!(
        classified.parameters,
        pairs(&[("TON_TIMER", "T4:0"), ("TON_PRESET", "30")])
    );
    assert_eq!(classified.runtime, pairs(&[("TON_ACCUM", "0")]));
}

#[test]
fn structural_stream_has_same_cardinality_as_input() {
    let input = tokens("XIC I:1/0 TON T4:0 1.0 30 0 OTE O:2/0");
    let classified = classify_tokens(&input);
    assert_eq!(classified.structural.len(), input.len());
}

#[test]
fn address_like_tokens_become_generic_parameters() {
    for addr in ["I:1/0", "N7:12", "B3/4", "#100"] {
        let classified = classify_tokens(&[addr]);
        assert_eq!(classified.structural, vec![PLACEHOLDER]);
        assert_eq!(classified.parameters, pairs(&[(GENERIC_KEY, addr)]));
        assert!(classified.runtime.is_empty());
    }
}

#[test]
fn plain_mnemonics_stay_structural() {
    let classified = classify_tokens(&tokens("XIC XIO OTE"));
    assert_eq!(classified.structural, vec!["XIC", "XIO", "OTE"]);
    assert!(classified.parameters.is_empty());
    assert!(classified.runtime.is_empty());
}

#[test]
fn truncated_ton_falls_through_to_address_heuristic() {
    // Only three operands follow TON: not enough for the pattern, so the
    // mnemonic stays structural and the operands classify individually.
    let classified = classify_tokens(&tokens("TON T4:0 1.0 30"));
    assert_eq!(classified.structural, vec!["TON", PLACEHOLDER, "1.0", "30"]);
    assert_eq!(classified.parameters, pairs(&[(GENERIC_KEY, "T4:0")]));
    assert!(classified.runtime.is_empty());
}

#[test]
fn ton_recognition_is_greedy_left_to_right() {
    // The second TON has enough trailing tokens and is recognized after the
    // first pattern consumes its five tokens.
    let classified = classify_tokens(&tokens("TON T4:0 1.0 30 0 TON T4:1 0.01 500 12"));
    assert_eq!(
        classified.parameters,
        pairs(&[
            ("TON_TIMER", "T4:0"),
            ("TON_PRESET", "30"),
            ("TON_TIMER", "T4:1"),
            ("TON_PRESET", "500"),
        ])
    );
    assert_eq!(
        classified.runtime,
        pairs(&[("TON_ACCUM", "0"), ("TON_ACCUM", "12")])
    );
}

#[test]
fn empty_rung_classifies_to_empty_channels() {
    let classified = classify_tokens::<String>(&[]);
    assert!(classified.structural.is_empty());
    assert!(classified.parameters.is_empty());
    assert!(classified.runtime.is_empty());
}
