use actix::prelude::*;
use uuid::Uuid;

use super::server::DuelSession;

/// A participant's guess, forwarded by its connection session.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RecordGuess {
    pub participant: Uuid,
    pub round: usize,
    pub answer: String,
    pub elapsed_ms: u64,
}

/// A participant's connection dropped; abort and notify the survivor.
#[derive(Message)]
#[rtype(result = "()")]
pub struct AbortDuel {
    pub leaver: Uuid,
}

/// Tells a connection session which duel it now belongs to.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct DuelJoined {
    pub match_id: Uuid,
    pub addr: Addr<DuelSession>,
}

/// Tells a connection session its duel reached a terminal state.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct DuelClosed {
    pub match_id: Uuid,
}
