#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use uuid::Uuid;

    use crate::config::game::{round_timeout_ms, ROUNDS_PER_MATCH};
    use crate::game::content::{ContentProvider, DemoCatalog};
    use crate::game::state::{Advance, GuessOutcome, MatchState, Phase};
    use crate::game::types::Round;
    use crate::server::matchmaking::queue::WaitingQueue;

    fn fixture_rounds(n: usize) -> Vec<Round> {
        (0..n)
            .map(|i| Round {
                snippet_url: format!("https://cdn.example.com/snippets/{i}.mp3"),
                options: [
                    "Track A".to_string(),
                    "Track B".to_string(),
                    "Track C".to_string(),
                    "Track D".to_string(),
                ],
                correct_answer: "Track A".to_string(),
            })
            .collect()
    }

    fn new_match() -> (MatchState, Uuid, Uuid) {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut state = MatchState::new([p1, p2], fixture_rounds(ROUNDS_PER_MATCH));
        assert!(state.begin());
        (state, p1, p2)
    }

    #[test]
    fn full_match_plays_all_rounds_in_order() {
        let (mut state, p1, p2) = new_match();
        let mut played = Vec::new();
        loop {
            assert_eq!(state.phase(), Phase::RoundActive);
            let round = state.current_round();
            played.push(round);
            assert_eq!(
                state.record_guess(p1, round, "Track A".into(), 1_000),
                GuessOutcome::Recorded
            );
            assert_eq!(
                state.record_guess(p2, round, "Track B".into(), 2_000),
                GuessOutcome::AllAnswered
            );
            let resolution = state
                .resolve_round(round, round_timeout_ms())
                .expect("active round resolves");
            assert_eq!(resolution.round, round);
            assert_eq!(resolution.correct_answer, "Track A");
            match state.advance().expect("resolved round advances") {
                Advance::NextRound(next) => assert_eq!(next, round + 1),
                Advance::Finished(outcome) => {
                    let keys: HashSet<Uuid> = outcome.final_scores.keys().copied().collect();
                    assert_eq!(keys, HashSet::from([p1, p2]));
                    assert_eq!(outcome.winner, Some(p1));
                    break;
                }
            }
        }
        assert_eq!(played, (0..ROUNDS_PER_MATCH).collect::<Vec<_>>());
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn duplicate_guess_keeps_the_first() {
        let (mut state, p1, p2) = new_match();
        assert_eq!(
            state.record_guess(p1, 0, "Track B".into(), 500),
            GuessOutcome::Recorded
        );
        // The retry is not counted, even though it would have been correct.
        assert_eq!(
            state.record_guess(p1, 0, "Track A".into(), 600),
            GuessOutcome::Duplicate
        );
        assert_eq!(
            state.record_guess(p2, 0, "Track C".into(), 700),
            GuessOutcome::AllAnswered
        );
        let resolution = state.resolve_round(0, round_timeout_ms()).unwrap();
        assert_eq!(resolution.scores[&p1], 0);
        assert_eq!(resolution.scores[&p2], 0);
    }

    #[test]
    fn round_resolves_exactly_once() {
        let (mut state, p1, _p2) = new_match();
        assert_eq!(
            state.record_guess(p1, 0, "Track A".into(), 100),
            GuessOutcome::Recorded
        );
        assert!(state.resolve_round(0, round_timeout_ms()).is_some());
        // Timeout firing right after the both-answered path already resolved.
        assert!(state.resolve_round(0, round_timeout_ms()).is_none());
        state.advance();
        // Stale handle for round 0 after the match moved on.
        assert!(state.resolve_round(0, round_timeout_ms()).is_none());
    }

    #[test]
    fn guesses_outside_the_active_round_are_rejected() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut state = MatchState::new([p1, p2], fixture_rounds(ROUNDS_PER_MATCH));
        // Match not started yet.
        assert_eq!(
            state.record_guess(p1, 0, "Track A".into(), 100),
            GuessOutcome::Rejected
        );
        assert!(state.begin());
        // Wrong round index.
        assert_eq!(
            state.record_guess(p1, 1, "Track A".into(), 100),
            GuessOutcome::Rejected
        );
        // Unknown participant.
        assert_eq!(
            state.record_guess(Uuid::new_v4(), 0, "Track A".into(), 100),
            GuessOutcome::Rejected
        );
    }

    #[test]
    fn timeout_with_no_guesses_leaves_scores_unchanged() {
        let (mut state, p1, p2) = new_match();
        state.record_guess(p1, 0, "Track A".into(), 1_000);
        state.record_guess(p2, 0, "Track A".into(), 1_000);
        let before = state.resolve_round(0, round_timeout_ms()).unwrap().scores;
        state.advance();
        // Round 1 times out with nobody answering.
        let resolution = state.resolve_round(1, round_timeout_ms()).unwrap();
        assert_eq!(resolution.correct_answer, "Track A");
        assert_eq!(resolution.scores, before);
    }

    #[test]
    fn scores_never_decrease_across_rounds() {
        let (mut state, p1, p2) = new_match();
        let mut last = [0u32; 2];
        for round in 0..ROUNDS_PER_MATCH {
            state.record_guess(p1, round, "Track A".into(), round as u64 * 1_500);
            state.record_guess(p2, round, "Track D".into(), 3_000);
            let scores = state.resolve_round(round, round_timeout_ms()).unwrap().scores;
            assert!(scores[&p1] >= last[0]);
            assert!(scores[&p2] >= last[1]);
            last = [scores[&p1], scores[&p2]];
            state.advance();
        }
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn equal_final_scores_are_a_draw() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut state = MatchState::new([p1, p2], fixture_rounds(2));
        assert!(state.begin());
        let mut outcome = None;
        for round in 0..2 {
            state.record_guess(p1, round, "Track A".into(), 2_000);
            state.record_guess(p2, round, "Track A".into(), 2_000);
            state.resolve_round(round, round_timeout_ms()).unwrap();
            match state.advance().unwrap() {
                Advance::NextRound(_) => {}
                Advance::Finished(result) => outcome = Some(result),
            }
        }
        let outcome = outcome.expect("two rounds finish the match");
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.final_scores[&p1], outcome.final_scores[&p2]);
    }

    #[test]
    fn abort_mid_round_is_terminal_and_reported_once() {
        let (mut state, p1, _p2) = new_match();
        state.record_guess(p1, 0, "Track A".into(), 100);
        assert!(state.abort());
        // Only the first abort reports a transition, so the survivor is
        // notified exactly once.
        assert!(!state.abort());
        assert_eq!(state.phase(), Phase::Aborted);
        // Nothing resolves after an abort.
        assert!(state.resolve_round(0, round_timeout_ms()).is_none());
    }

    #[test]
    fn queue_pairs_feed_match_creation() {
        let mut queue = WaitingQueue::new();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        assert_eq!(queue.enqueue(p1), Ok(None));
        let (first, second) = queue
            .enqueue(p2)
            .unwrap()
            .expect("two waiting participants pair up");
        assert_eq!((first, second), (p1, p2));
        assert!(queue.is_empty());

        let mut state = MatchState::new([first, second], fixture_rounds(ROUNDS_PER_MATCH));
        assert!(state.begin());
        assert_eq!(state.current_round(), 0);
        let keys: HashSet<Uuid> = state.scores().keys().copied().collect();
        assert_eq!(keys, HashSet::from([p1, p2]));
    }

    #[test]
    fn demo_catalog_supplies_complete_rounds() {
        let rounds = DemoCatalog.rounds_for_match();
        assert_eq!(rounds.len(), ROUNDS_PER_MATCH);
        for round in &rounds {
            assert!(round.options.contains(&round.correct_answer));
            let distinct: HashSet<&String> = round.options.iter().collect();
            assert_eq!(distinct.len(), 4);
            assert!(!round.snippet_url.is_empty());
        }
    }
}
