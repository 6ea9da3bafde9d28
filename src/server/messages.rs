/// WebSocket wire protocol.
///
/// Tagged JSON messages exchanged with clients. Inbound frames are
/// deserialized and validated at the session boundary before any of them
/// reaches matchmaking or duel logic.

use actix::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::matchmaking::types::PlayerInfo;

/// Client -> server messages.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    FindOpponent,
    CancelSearch,
    SubmitGuess {
        match_id: Uuid,
        round: usize,
        answer: String,
        elapsed_ms: u64,
    },
    Ping,
}

/// Server -> client messages.
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    MatchFound {
        match_id: Uuid,
        opponent: PlayerInfo,
    },
    StartRound {
        round: usize,
        snippet_url: String,
        options: [String; 4],
        timeout_ms: u64,
    },
    RoundResult {
        round: usize,
        correct_answer: String,
        scores: HashMap<Uuid, u32>,
    },
    GameOver {
        final_scores: HashMap<Uuid, u32>,
        /// Absent on a draw.
        winner: Option<Uuid>,
    },
    OpponentLeft,
    Error {
        code: String,
        message: String,
    },
}

impl ServerWsMessage {
    pub fn match_found(match_id: Uuid, opponent: PlayerInfo) -> Self {
        Self::MatchFound { match_id, opponent }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}
