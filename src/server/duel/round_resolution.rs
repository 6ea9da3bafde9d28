/// Round start and resolution for a duel.
///
/// Encapsulates timer management and the exactly-once resolution guard.

use actix::prelude::*;
use log::debug;
use std::time::Duration;

use crate::config::game::{round_timeout_ms, ROUND_TIMEOUT_SECONDS};
use crate::game::state::Advance;
use crate::server::duel::server::DuelSession;
use crate::server::messages::ServerWsMessage;

/// Announce the active round to both participants and arm its timer.
pub fn start_round(this: &mut DuelSession, ctx: &mut Context<DuelSession>) {
    let round = this.state.current_round();
    let Some(info) = this.state.current_round_info() else {
        return;
    };
    this.broadcast(ServerWsMessage::StartRound {
        round,
        snippet_url: info.snippet_url.clone(),
        options: info.options.clone(),
        timeout_ms: round_timeout_ms(),
    });

    // One timer per round; a new handle is stored only after the previous
    // round's timer fired or was cancelled.
    let handle = ctx.run_later(Duration::from_secs(ROUND_TIMEOUT_SECONDS), move |act, ctx| {
        act.round_timer = None;
        resolve_round(act, ctx, round);
    });
    this.round_timer = Some(handle);
}

/// Resolve the given round: score all guesses, report the result, then start
/// the next round or finish the match. The state machine rejects the call
/// unless `round` is the round currently active, so the timeout path and the
/// both-answered path can never both produce a result.
pub fn resolve_round(this: &mut DuelSession, ctx: &mut Context<DuelSession>, round: usize) {
    let Some(resolution) = this.state.resolve_round(round, round_timeout_ms()) else {
        debug!(
            "[Duel] Match {}: round {} already resolved",
            this.match_id, round
        );
        return;
    };
    debug!(
        "[Duel] Match {}: round {} resolved after {} ms",
        this.match_id,
        resolution.round,
        this.state.round_elapsed_ms()
    );
    this.broadcast(ServerWsMessage::RoundResult {
        round: resolution.round,
        correct_answer: resolution.correct_answer,
        scores: resolution.scores,
    });

    match this.state.advance() {
        Some(Advance::NextRound(_)) => start_round(this, ctx),
        Some(Advance::Finished(outcome)) => this.finish(ctx, outcome),
        None => {}
    }
}
