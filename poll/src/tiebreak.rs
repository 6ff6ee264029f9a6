//! Tie-break policies.
//!
//! Each policy is a tagged variant backed by a pure function; callers pick
//! one at query time. Policies only make sense when at least two options
//! share the maximum count — callers check [`Tally::is_tied`] first.

use rand::{Rng, RngCore};

use crate::tally::Tally;

/// Which tie-break policy to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreakKind {
    /// Lexicographically smallest tied option wins. Deterministic.
    Alphabetical,
    /// Uniformly random tied option wins, drawn from the caller's rng.
    Random,
    /// No winner — voting should be reopened among the tied options.
    Extension,
}

/// The result of resolving a tie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TieBreakOutcome {
    /// A single winning option.
    Winner(String),
    /// Voting should continue among exactly these options.
    Extend { tied: Vec<String> },
}

/// Resolve a tie in `tally` with the chosen policy.
///
/// `rng` is consulted only by [`TieBreakKind::Random`]; pass a seeded rng
/// for reproducible results.
pub fn resolve(kind: TieBreakKind, tally: &Tally, rng: &mut dyn RngCore) -> TieBreakOutcome {
    match kind {
        TieBreakKind::Alphabetical => TieBreakOutcome::Winner(resolve_alphabetical(tally)),
        TieBreakKind::Random => TieBreakOutcome::Winner(resolve_random(tally, rng)),
        TieBreakKind::Extension => TieBreakOutcome::Extend {
            tied: tied_options(tally),
        },
    }
}

fn tied_options(tally: &Tally) -> Vec<String> {
    tally.leaders().into_iter().map(String::from).collect()
}

fn resolve_alphabetical(tally: &Tally) -> String {
    tally
        .leaders()
        .into_iter()
        .min()
        .map(String::from)
        .unwrap_or_default()
}

fn resolve_random(tally: &Tally, rng: &mut dyn RngCore) -> String {
    let tied = tally.leaders();
    tied[rng.random_range(0..tied.len())].to_string()
}
