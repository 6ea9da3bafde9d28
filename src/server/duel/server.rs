/// Duel actor.
///
/// Owns one match from first round to terminal state. The actor mailbox is
/// the match's mutual-exclusion domain: guesses, the round timer, and aborts
/// all mutate state here and nowhere else.

use actix::prelude::*;
use log::{debug, info};
use uuid::Uuid;

use crate::game::state::{GuessOutcome, MatchState};
use crate::game::types::{MatchOutcome, Round};
use crate::server::duel::messages::{AbortDuel, DuelClosed, RecordGuess};
use crate::server::duel::round_resolution;
use crate::server::matchmaking::server::{DuelEnded, MatchmakingServer};
use crate::server::matchmaking::types::PlayerInfo;
use crate::server::messages::ServerWsMessage;
use crate::server::session::PlayerSession;

/// One participant as seen by the duel: identity plus outbound channel.
pub struct DuelPlayer {
    pub info: PlayerInfo,
    pub addr: Addr<PlayerSession>,
}

pub struct DuelSession {
    pub match_id: Uuid,
    pub players: [DuelPlayer; 2],
    pub state: MatchState,
    /// Pending round timer; at most one per match at any instant.
    pub round_timer: Option<SpawnHandle>,
    matchmaking: Addr<MatchmakingServer>,
}

impl DuelSession {
    pub fn new(
        match_id: Uuid,
        players: [DuelPlayer; 2],
        rounds: Vec<Round>,
        matchmaking: Addr<MatchmakingServer>,
    ) -> Self {
        let ids = [players[0].info.id, players[1].info.id];
        Self {
            match_id,
            players,
            state: MatchState::new(ids, rounds),
            round_timer: None,
            matchmaking,
        }
    }

    /// Send a message to both participants.
    pub fn broadcast(&self, msg: ServerWsMessage) {
        for player in &self.players {
            player.addr.do_send(msg.clone());
        }
    }

    /// Cancel the pending round timer, if any.
    pub fn cancel_round_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.round_timer.take() {
            ctx.cancel_future(handle);
        }
    }

    /// Tear down: release the match from the registry and stop the actor.
    pub fn close(&mut self, ctx: &mut Context<Self>) {
        for player in &self.players {
            player.addr.do_send(DuelClosed {
                match_id: self.match_id,
            });
        }
        self.matchmaking.do_send(DuelEnded {
            match_id: self.match_id,
        });
        ctx.stop();
    }

    /// Report the final result to both participants and tear down.
    pub fn finish(&mut self, ctx: &mut Context<Self>, outcome: MatchOutcome) {
        info!(
            "[Duel] Match {} finished, winner={:?}",
            self.match_id, outcome.winner
        );
        self.broadcast(ServerWsMessage::GameOver {
            final_scores: outcome.final_scores,
            winner: outcome.winner,
        });
        self.close(ctx);
    }
}

impl Actor for DuelSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        if self.state.begin() {
            round_resolution::start_round(self, ctx);
        }
    }
}

impl Handler<RecordGuess> for DuelSession {
    type Result = ();

    fn handle(&mut self, msg: RecordGuess, ctx: &mut Self::Context) -> Self::Result {
        let round = msg.round;
        match self
            .state
            .record_guess(msg.participant, msg.round, msg.answer, msg.elapsed_ms)
        {
            GuessOutcome::Recorded => {
                debug!(
                    "[Duel] Match {}: guess from {} for round {}",
                    self.match_id, msg.participant, round
                );
            }
            GuessOutcome::AllAnswered => {
                // Both answered: resolve now instead of waiting out the clock.
                self.cancel_round_timer(ctx);
                round_resolution::resolve_round(self, ctx, round);
            }
            GuessOutcome::Duplicate => {
                debug!(
                    "[Duel] Match {}: duplicate guess from {} for round {} ignored",
                    self.match_id, msg.participant, round
                );
            }
            GuessOutcome::Rejected => {
                debug!(
                    "[Duel] Match {}: out-of-turn guess from {} for round {} ignored",
                    self.match_id, msg.participant, round
                );
            }
        }
    }
}

impl Handler<AbortDuel> for DuelSession {
    type Result = ();

    fn handle(&mut self, msg: AbortDuel, ctx: &mut Self::Context) -> Self::Result {
        if !self.state.abort() {
            // Already terminal; a late disconnect changes nothing.
            return;
        }
        self.cancel_round_timer(ctx);
        info!(
            "[Duel] Match {} aborted: participant {} left",
            self.match_id, msg.leaver
        );
        for player in &self.players {
            if player.info.id != msg.leaver {
                player.addr.do_send(ServerWsMessage::OpponentLeft);
            }
        }
        self.close(ctx);
    }
}
