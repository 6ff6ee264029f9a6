//! Presentation strategies — pure formatting over a tally.

use rand::RngCore;

use crate::tally::Tally;
use crate::tiebreak::{self, TieBreakKind, TieBreakOutcome};

/// Bar glyph for the ASCII chart.
const BAR_UNIT: char = '█';
/// Width of a full bar.
const BAR_WIDTH: u64 = 20;

/// Which output format to render a tally in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationKind {
    /// One `option: N voto(s)` line per option.
    Text,
    /// Proportional ASCII bar chart.
    AsciiBars,
    /// The tally as a JSON object.
    Json,
}

/// Render a tally. Deterministic and side-effect free.
pub fn present(kind: PresentationKind, tally: &Tally) -> String {
    match kind {
        PresentationKind::Text => present_text(tally),
        PresentationKind::AsciiBars => present_ascii(tally),
        PresentationKind::Json => present_json(tally),
    }
}

fn present_text(tally: &Tally) -> String {
    tally
        .iter()
        .map(|(option, count)| format!("{option}: {count} voto(s)"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn present_ascii(tally: &Tally) -> String {
    // Avoid dividing by zero when nothing has been voted yet.
    let max = tally.max_count().max(1);
    tally
        .iter()
        .map(|(option, count)| {
            let len = (count * BAR_WIDTH / max) as usize;
            let bar: String = std::iter::repeat(BAR_UNIT).take(len).collect();
            format!("{option}: {bar} ({count})")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn present_json(tally: &Tally) -> String {
    let mut map = serde_json::Map::new();
    for (option, count) in tally.iter() {
        map.insert(option.to_string(), serde_json::Value::from(count));
    }
    serde_json::Value::Object(map).to_string()
}

/// Render final results: when the lead is shared, announce the tie and its
/// resolution first, then the formatted tally.
pub fn present_final(
    tally: &Tally,
    tie_break: TieBreakKind,
    presentation: PresentationKind,
    rng: &mut dyn RngCore,
) -> String {
    let body = present(presentation, tally);
    if !tally.is_tied() {
        return body;
    }
    let tied: Vec<&str> = tally.leaders();
    let announcement = match tiebreak::resolve(tie_break, tally, rng) {
        TieBreakOutcome::Winner(winner) => {
            format!("Tie between [{}]. Winner by tie-break: {winner}", tied.join(", "))
        }
        TieBreakOutcome::Extend { tied } => {
            format!(
                "Tie between [{}]. Voting extended among the tied options",
                tied.join(", ")
            )
        }
    };
    format!("{announcement}\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::{Poll, Vote};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vox_types::{PollKind, Timestamp, TokenId, Username, VoteId};

    fn tally_for(counts: &[(&str, u64)]) -> Tally {
        let now = Timestamp::from_unix_seconds(1_700_000_000);
        let options: Vec<String> = counts.iter().map(|(o, _)| o.to_string()).collect();
        let mut poll = Poll::new("?", &options, 60, PollKind::Multi, now).unwrap();
        for (option, n) in counts {
            for _ in 0..*n {
                poll.record_vote(Vote {
                    id: VoteId::random(),
                    poll_id: poll.id,
                    voter: Username::new("v"),
                    option: option.to_string(),
                    cast_at: now,
                    token_id: TokenId::random(),
                })
                .unwrap();
            }
        }
        Tally::of(&poll)
    }

    #[test]
    fn text_lists_options_in_poll_order() {
        let tally = tally_for(&[("B", 2), ("A", 1)]);
        assert_eq!(
            present(PresentationKind::Text, &tally),
            "B: 2 voto(s)\nA: 1 voto(s)"
        );
    }

    #[test]
    fn ascii_bars_scale_to_the_leader() {
        let tally = tally_for(&[("A", 4), ("B", 2), ("C", 0)]);
        let rendered = present(PresentationKind::AsciiBars, &tally);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], format!("A: {} (4)", "█".repeat(20)));
        assert_eq!(lines[1], format!("B: {} (2)", "█".repeat(10)));
        assert_eq!(lines[2], "C:  (0)");
    }

    #[test]
    fn ascii_bars_with_no_votes_render_empty_bars() {
        let tally = tally_for(&[("A", 0), ("B", 0)]);
        let rendered = present(PresentationKind::AsciiBars, &tally);
        assert_eq!(rendered, "A:  (0)\nB:  (0)");
    }

    #[test]
    fn json_preserves_option_order() {
        let tally = tally_for(&[("B", 2), ("A", 1)]);
        assert_eq!(present(PresentationKind::Json, &tally), r#"{"B":2,"A":1}"#);
    }

    #[test]
    fn final_results_without_tie_are_just_the_body() {
        let mut rng = StdRng::seed_from_u64(0);
        let tally = tally_for(&[("A", 3), ("B", 1)]);
        assert_eq!(
            present_final(&tally, TieBreakKind::Alphabetical, PresentationKind::Text, &mut rng),
            "A: 3 voto(s)\nB: 1 voto(s)"
        );
    }

    #[test]
    fn final_results_announce_tie_and_winner() {
        let mut rng = StdRng::seed_from_u64(0);
        let tally = tally_for(&[("A", 2), ("B", 2)]);
        let rendered = present_final(
            &tally,
            TieBreakKind::Alphabetical,
            PresentationKind::Text,
            &mut rng,
        );
        assert_eq!(
            rendered,
            "Tie between [A, B]. Winner by tie-break: A\nA: 2 voto(s)\nB: 2 voto(s)"
        );
    }

    #[test]
    fn final_results_can_defer_via_extension() {
        let mut rng = StdRng::seed_from_u64(0);
        let tally = tally_for(&[("A", 1), ("B", 1)]);
        let rendered = present_final(
            &tally,
            TieBreakKind::Extension,
            PresentationKind::Text,
            &mut rng,
        );
        assert!(rendered.starts_with("Tie between [A, B]. Voting extended"));
    }
}
