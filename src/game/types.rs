use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One question cycle: an audio snippet and four title options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub snippet_url: String,
    pub options: [String; 4],
    pub correct_answer: String,
}

/// A participant's answer for the active round, with its latency.
#[derive(Debug, Clone)]
pub struct Guess {
    pub answer: String,
    pub elapsed_ms: u64,
}

/// Final result of a match. `winner` is `None` on a draw.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub final_scores: HashMap<Uuid, u32>,
    pub winner: Option<Uuid>,
}
