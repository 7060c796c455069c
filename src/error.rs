use thiserror::Error;

/// Failure modes that are genuine caller mistakes rather than internal
/// invariant violations (those remain `assert!`/`panic!`, see DESIGN.md).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashlifeError {
    #[error("rounds(n) requires n >= 1, got {0}")]
    NonPositiveRounds(i64),
}
