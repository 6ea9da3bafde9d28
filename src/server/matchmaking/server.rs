/// Matchmaking server actor.
///
/// Owns the connection registry, the FIFO waiting queue, and the set of
/// active duels. Handles participant connect/disconnect, search and cancel,
/// pairs participants two at a time, and spawns one duel actor per pair.
/// Duels report back here when they reach a terminal state so each match is
/// torn down from the registry exactly once.

use actix::prelude::*;
use log::{debug, info, warn};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::game::ROUNDS_PER_MATCH;
use crate::game::content::ContentProvider;
use crate::server::duel::messages::{AbortDuel, DuelJoined};
use crate::server::duel::server::{DuelPlayer, DuelSession};
use crate::server::matchmaking::queue::{EnqueueError, WaitingQueue};
use crate::server::matchmaking::types::PlayerInfo;
use crate::server::messages::ServerWsMessage;
use crate::server::session::PlayerSession;

type SessionAddr = Addr<PlayerSession>;

/// A live duel as seen from the registry.
#[derive(Clone)]
struct ActiveDuel {
    match_id: Uuid,
    addr: Addr<DuelSession>,
}

/// A connected participant: identity, outbound channel, current duel if any.
struct ConnectedPlayer {
    info: PlayerInfo,
    addr: SessionAddr,
    duel: Option<ActiveDuel>,
}

/// Main matchmaking server actor.
pub struct MatchmakingServer {
    /// Connection registry: every live connection, matched or not.
    players: HashMap<Uuid, ConnectedPlayer>,
    /// Participants waiting for an opponent, oldest first.
    queue: WaitingQueue,
    /// Active matches, keyed by match id, for exactly-once teardown.
    duels: HashMap<Uuid, [Uuid; 2]>,
    /// Supplies each new match with its rounds.
    content: Box<dyn ContentProvider>,
}

impl MatchmakingServer {
    /// Create a new matchmaking server backed by the given content provider.
    pub fn new(content: Box<dyn ContentProvider>) -> Self {
        Self {
            players: HashMap::new(),
            queue: WaitingQueue::new(),
            duels: HashMap::new(),
            content,
        }
    }

    /// Spawn a duel for a freshly dequeued pair.
    fn create_duel(&mut self, first: Uuid, second: Uuid, ctx: &mut Context<Self>) {
        let (Some(a), Some(b)) = (self.players.get(&first), self.players.get(&second)) else {
            // Disconnects cancel queue membership in this same actor, so a
            // dequeued participant is always still registered.
            warn!(
                "[Matchmaking] Dropped pairing {}/{}: participant no longer registered",
                first, second
            );
            return;
        };

        let rounds = self.content.rounds_for_match();
        if rounds.len() != ROUNDS_PER_MATCH {
            warn!(
                "[Matchmaking] Content provider returned {} rounds, expected {}; pairing dropped",
                rounds.len(),
                ROUNDS_PER_MATCH
            );
            return;
        }

        let match_id = Uuid::new_v4();

        // Each participant learns about the other, not about itself.
        a.addr.do_send(ServerWsMessage::match_found(match_id, b.info.clone()));
        b.addr.do_send(ServerWsMessage::match_found(match_id, a.info.clone()));

        let duel = DuelSession::new(
            match_id,
            [
                DuelPlayer { info: a.info.clone(), addr: a.addr.clone() },
                DuelPlayer { info: b.info.clone(), addr: b.addr.clone() },
            ],
            rounds,
            ctx.address(),
        )
        .start();

        for id in [first, second] {
            if let Some(player) = self.players.get_mut(&id) {
                player.duel = Some(ActiveDuel { match_id, addr: duel.clone() });
                player.addr.do_send(DuelJoined { match_id, addr: duel.clone() });
            }
        }
        self.duels.insert(match_id, [first, second]);

        info!("[Matchmaking] Match {} created: {} vs {}", match_id, first, second);
    }
}

/// Message: a new connection registered with the server.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub connection_id: Uuid,
    pub username: String,
    pub addr: SessionAddr,
}

/// Message: a connection dropped. Idempotent.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub connection_id: Uuid,
}

/// Message: a participant wants an opponent.
#[derive(Message)]
#[rtype(result = "()")]
pub struct FindOpponent {
    pub connection_id: Uuid,
}

/// Message: a waiting participant stops searching.
#[derive(Message)]
#[rtype(result = "()")]
pub struct CancelSearch {
    pub connection_id: Uuid,
}

/// Message: a duel reached a terminal state; release it from the registry.
#[derive(Message)]
#[rtype(result = "()")]
pub struct DuelEnded {
    pub match_id: Uuid,
}

impl Actor for MatchmakingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        debug!(
            "[Matchmaking] Participant {} ({}) connected",
            msg.connection_id, msg.username
        );
        self.players.insert(
            msg.connection_id,
            ConnectedPlayer {
                info: PlayerInfo {
                    id: msg.connection_id,
                    username: msg.username,
                },
                addr: msg.addr,
                duel: None,
            },
        );
    }
}

impl Handler<FindOpponent> for MatchmakingServer {
    type Result = ();

    /// Handles a participant entering the waiting queue.
    fn handle(&mut self, msg: FindOpponent, ctx: &mut Self::Context) -> Self::Result {
        let Some(player) = self.players.get(&msg.connection_id) else {
            debug!(
                "[Matchmaking] FindOpponent from unknown connection {}",
                msg.connection_id
            );
            return;
        };
        if player.duel.is_some() {
            player.addr.do_send(ServerWsMessage::error(
                "ALREADY_IN_MATCH",
                "Finish your current match before searching again.",
            ));
            return;
        }
        let addr = player.addr.clone();
        match self.queue.enqueue(msg.connection_id) {
            Ok(Some((first, second))) => self.create_duel(first, second, ctx),
            Ok(None) => {
                debug!(
                    "[Matchmaking] Participant {} waiting for an opponent",
                    msg.connection_id
                );
            }
            Err(EnqueueError::AlreadyQueued) => {
                addr.do_send(ServerWsMessage::error(
                    "ALREADY_SEARCHING",
                    "Already waiting for an opponent.",
                ));
            }
        }
    }
}

impl Handler<CancelSearch> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: CancelSearch, _ctx: &mut Self::Context) -> Self::Result {
        if self.queue.cancel(&msg.connection_id) {
            debug!(
                "[Matchmaking] Participant {} stopped searching",
                msg.connection_id
            );
        }
    }
}

impl Handler<Disconnect> for MatchmakingServer {
    type Result = ();

    /// Handles a dropped connection: leave the queue, abort the active duel.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.queue.cancel(&msg.connection_id);
        let Some(player) = self.players.remove(&msg.connection_id) else {
            // Duplicate disconnect notification; nothing left to do.
            return;
        };
        if let Some(active) = player.duel {
            active.addr.do_send(AbortDuel {
                leaver: msg.connection_id,
            });
        }
        info!("[Matchmaking] Participant {} disconnected", msg.connection_id);
    }
}

impl Handler<DuelEnded> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: DuelEnded, _ctx: &mut Self::Context) -> Self::Result {
        let Some(participants) = self.duels.remove(&msg.match_id) else {
            debug!("[Matchmaking] Duel {} already released", msg.match_id);
            return;
        };
        for id in participants {
            if let Some(player) = self.players.get_mut(&id) {
                if player.duel.as_ref().is_some_and(|d| d.match_id == msg.match_id) {
                    player.duel = None;
                }
            }
        }
        debug!("[Matchmaking] Duel {} released", msg.match_id);
    }
}
