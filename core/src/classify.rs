//! Token classification into structural, parameter, and runtime channels.
//!
//! Classification is a greedy left-to-right scan with two rules:
//!
//! 1. The timer-on-delay pattern `TON <timer> <timebase> <preset> <accum>`
//!    is the one instruction where domain semantics pick the channel: the
//!    mnemonic and timebase are structural, the timer address and preset are
//!    parameters, the accumulator is runtime state.
//! 2. Everything else falls through to an address heuristic: tokens
//!    containing `:` or `/`, or starting with `#`, are parameter operands;
//!    all other tokens are structural verbatim.
//!
//! New instruction patterns should use the same token-count-gated shape so
//! digests stay backward compatible for unaffected instructions.

/// Placeholder substituted into the structural stream for non-structural
/// operands.
pub const PLACEHOLDER: &str = "_";

/// Timer-on-delay instruction mnemonic.
pub const TON_MNEMONIC: &str = "TON";
pub const TON_TIMER_KEY: &str = "TON_TIMER";
pub const TON_PRESET_KEY: &str = "TON_PRESET";
pub const TON_ACCUM_KEY: &str = "TON_ACCUM";
/// Key for operands classified by the generic address heuristic.
pub const GENERIC_KEY: &str = "GENERIC";

/// The three parallel channels produced from one rung's token sequence.
///
/// `structural` has the same cardinality as the input; the key/value
/// channels keep encounter order, which is part of rung identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassifiedTokens {
    pub structural: Vec<String>,
    pub parameters: Vec<(String, String)>,
    pub runtime: Vec<(String, String)>,
}

/// Classify a rung's tokens. Never fails: unknown or truncated patterns
/// fall through to the address heuristic.
pub fn classify_tokens<S: AsRef<str>>(tokens: &[S]) -> ClassifiedTokens {
    let mut out = ClassifiedTokens::default();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_ref();

        // TON <timer> <timebase> <preset> <accum>
        if token == TON_MNEMONIC && i + 4 < tokens.len() {
            let timer = tokens[i + 1].as_ref();
            let timebase = tokens[i + 2].as_ref();
            let preset = tokens[i + 3].as_ref();
            let accum = tokens[i + 4].as_ref();

            out.structural.push(TON_MNEMONIC.to_string());

            out.parameters
                .push((TON_TIMER_KEY.to_string(), timer.to_string()));
            out.structural.push(PLACEHOLDER.to_string());

            out.structural.push(timebase.to_string());

            out.parameters
                .push((TON_PRESET_KEY.to_string(), preset.to_string()));
            out.structural.push(PLACEHOLDER.to_string());

            out.runtime
                .push((TON_ACCUM_KEY.to_string(), accum.to_string()));
            out.structural.push(PLACEHOLDER.to_string());

            i += 5;
            continue;
        }

        if is_address_token(token) {
            out.parameters
                .push((GENERIC_KEY.to_string(), token.to_string()));
            out.structural.push(PLACEHOLDER.to_string());
        } else {
            out.structural.push(token.to_string());
        }

        i += 1;
    }

    out
}

fn is_address_token(token: &str) -> bool {
    token.contains(':') || token.contains('/') || token.starts_with('#')
}
