use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

use crate::game::scoring;
use crate::game::types::{Guess, MatchOutcome, Round};

/// Core state for one duel.
///
/// Pure state machine mutated only inside its owning actor. Guard checks live
/// here so the actor layer stays a thin messaging shell: every transition
/// method reports whether it happened, and an invalid call is rejected rather
/// than panicking.

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Forming,
    RoundActive,
    RoundResolved,
    Finished,
    Aborted,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Finished | Phase::Aborted)
    }
}

/// What became of a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// First guess from this participant; still waiting on the opponent.
    Recorded,
    /// Both participants have answered; the round can resolve early.
    AllAnswered,
    /// Second guess for the same round; the first one stands, this is not scored.
    Duplicate,
    /// Outside the active round, wrong round index, or unknown participant.
    Rejected,
}

/// Snapshot produced by resolving one round.
#[derive(Debug, Clone)]
pub struct RoundResolution {
    pub round: usize,
    pub correct_answer: String,
    pub scores: HashMap<Uuid, u32>,
}

/// Where the match goes after a resolved round.
#[derive(Debug, Clone)]
pub enum Advance {
    NextRound(usize),
    Finished(MatchOutcome),
}

pub struct MatchState {
    participants: [Uuid; 2],
    rounds: Vec<Round>,
    current_round: usize,
    scores: HashMap<Uuid, u32>,
    /// Guesses received for the active round, at most one per participant.
    guesses: HashMap<Uuid, Guess>,
    phase: Phase,
    round_started_at: Option<Instant>,
}

impl MatchState {
    pub fn new(participants: [Uuid; 2], rounds: Vec<Round>) -> Self {
        debug_assert_ne!(participants[0], participants[1]);
        debug_assert!(!rounds.is_empty());
        let scores = participants.iter().map(|id| (*id, 0)).collect();
        Self {
            participants,
            rounds,
            current_round: 0,
            scores,
            guesses: HashMap::new(),
            phase: Phase::Forming,
            round_started_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn scores(&self) -> &HashMap<Uuid, u32> {
        &self.scores
    }

    /// The round currently being played, if any.
    pub fn current_round_info(&self) -> Option<&Round> {
        (self.phase == Phase::RoundActive).then(|| &self.rounds[self.current_round])
    }

    /// `Forming -> RoundActive` for round 0.
    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Forming {
            return false;
        }
        self.phase = Phase::RoundActive;
        self.round_started_at = Some(Instant::now());
        true
    }

    /// Count a guess for the active round. Only the first guess per
    /// participant per round is kept.
    pub fn record_guess(
        &mut self,
        participant: Uuid,
        round: usize,
        answer: String,
        elapsed_ms: u64,
    ) -> GuessOutcome {
        if self.phase != Phase::RoundActive || round != self.current_round {
            return GuessOutcome::Rejected;
        }
        if !self.participants.contains(&participant) {
            return GuessOutcome::Rejected;
        }
        if self.guesses.contains_key(&participant) {
            return GuessOutcome::Duplicate;
        }
        self.guesses.insert(participant, Guess { answer, elapsed_ms });
        if self.guesses.len() == self.participants.len() {
            GuessOutcome::AllAnswered
        } else {
            GuessOutcome::Recorded
        }
    }

    /// `RoundActive -> RoundResolved` for the given round. Scores every
    /// participant, counting an absent guess as incorrect. Returns `None`
    /// unless `round` is the round currently active, so a stale timer or a
    /// second resolution path is a no-op and each round resolves exactly once.
    pub fn resolve_round(&mut self, round: usize, timeout_ms: u64) -> Option<RoundResolution> {
        if self.phase != Phase::RoundActive || round != self.current_round {
            return None;
        }
        self.phase = Phase::RoundResolved;
        let correct_answer = self.rounds[self.current_round].correct_answer.clone();
        for id in self.participants {
            let points = match self.guesses.get(&id) {
                Some(guess) => {
                    scoring::score(guess.answer == correct_answer, guess.elapsed_ms, timeout_ms)
                }
                None => 0,
            };
            if let Some(total) = self.scores.get_mut(&id) {
                *total += points;
            }
        }
        Some(RoundResolution {
            round: self.current_round,
            correct_answer,
            scores: self.scores.clone(),
        })
    }

    /// `RoundResolved -> RoundActive(next)` or `Finished` after the last round.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != Phase::RoundResolved {
            return None;
        }
        if self.current_round + 1 == self.rounds.len() {
            self.phase = Phase::Finished;
            self.round_started_at = None;
            return Some(Advance::Finished(self.outcome()));
        }
        self.current_round += 1;
        self.guesses.clear();
        self.phase = Phase::RoundActive;
        self.round_started_at = Some(Instant::now());
        Some(Advance::NextRound(self.current_round))
    }

    /// Any non-terminal phase `-> Aborted`. Reports whether the transition
    /// happened, so the caller notifies the survivor at most once.
    pub fn abort(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = Phase::Aborted;
        self.round_started_at = None;
        true
    }

    /// Wall-clock age of the active round, for logging.
    pub fn round_elapsed_ms(&self) -> u64 {
        self.round_started_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    fn outcome(&self) -> MatchOutcome {
        let [a, b] = self.participants;
        let score_a = self.scores.get(&a).copied().unwrap_or(0);
        let score_b = self.scores.get(&b).copied().unwrap_or(0);
        // Equal totals are an explicit draw, not a default win.
        let winner = if score_a > score_b {
            Some(a)
        } else if score_b > score_a {
            Some(b)
        } else {
            None
        };
        MatchOutcome {
            final_scores: self.scores.clone(),
            winner,
        }
    }
}
