//! Rung splitting for raw ladder dumps.
//!
//! A dump is a whitespace-delimited token stream where each rung is bracketed
//! by literal `SOR`/`EOR` markers. The splitter is a single linear pass with
//! no backtracking and never fails: a `SOR` inside an open rung restarts the
//! accumulator, an `EOR` with no open rung is a no-op, tokens outside an open
//! rung are dropped, and an unterminated trailing rung is discarded.

use crate::config::EndRungPolicy;

/// Token that opens a rung accumulator.
pub const START_MARKER: &str = "SOR";
/// Token that closes a rung accumulator.
pub const END_MARKER: &str = "EOR";
/// The structural sentinel rung emitted at the end of every ladder dump.
pub const END_SENTINEL: &str = "END";

/// Split raw ladder text into ordered rung strings (tokens joined with
/// single spaces). Output order is first-`EOR`-encounter order.
pub fn split_rungs(raw_text: &str, policy: EndRungPolicy) -> Vec<String> {
    let mut rungs = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for token in raw_text.split_whitespace() {
        match token {
            START_MARKER => {
                // Restart: an unterminated open rung is discarded.
                current = Some(Vec::new());
            }
            END_MARKER => {
                if let Some(tokens) = current.take() {
                    if !is_end_sentinel(&tokens, policy) {
                        rungs.push(tokens.join(" "));
                    }
                }
            }
            other => {
                if let Some(tokens) = current.as_mut() {
                    tokens.push(other);
                }
            }
        }
    }

    rungs
}

fn is_end_sentinel(tokens: &[&str], policy: EndRungPolicy) -> bool {
    match policy {
        EndRungPolicy::SingleToken => tokens.len() == 1 && tokens[0] == END_SENTINEL,
        EndRungPolicy::JoinedText => {
            tokens.is_empty() || tokens.join(" ") == END_SENTINEL
        }
    }
}
