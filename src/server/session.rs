/// WebSocket session handler for one client connection.
///
/// This actor is the dispatcher: it parses and validates inbound frames,
/// routes them to the matchmaking server or the connection's current duel,
/// and serializes outbound messages to the client. The socket dropping is
/// the disconnect signal.

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, warn};
use std::borrow::Cow;
use uuid::Uuid;

use crate::config::game::ROUNDS_PER_MATCH;
use crate::server::duel::messages::{DuelClosed, DuelJoined, RecordGuess};
use crate::server::duel::server::DuelSession;
use crate::server::matchmaking::server::{
    CancelSearch, Connect, Disconnect, FindOpponent, MatchmakingServer,
};
use crate::server::messages::{ClientWsMessage, ServerWsMessage};

/// One participant's connection, from accept to disconnect.
pub struct PlayerSession {
    pub connection_id: Uuid,
    pub username: String,
    pub matchmaking: Addr<MatchmakingServer>,
    /// Set while this connection is in a duel.
    duel: Option<(Uuid, Addr<DuelSession>)>,
}

impl PlayerSession {
    pub fn new(connection_id: Uuid, username: String, matchmaking: Addr<MatchmakingServer>) -> Self {
        Self {
            connection_id,
            username,
            matchmaking,
            duel: None,
        }
    }

    fn send(&self, ctx: &mut ws::WebsocketContext<Self>, msg: &ServerWsMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: close the connection.
                warn!("[Session] Failed to serialize server message: {}", e);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }

    /// Boundary validation for guesses: the match id must name this
    /// connection's active duel and the round index must be in range.
    fn submit_guess(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        match_id: Uuid,
        round: usize,
        answer: String,
        elapsed_ms: u64,
    ) {
        let Some((current_id, duel_addr)) = &self.duel else {
            self.send(
                ctx,
                &ServerWsMessage::error("UNKNOWN_MATCH", "No active match for this connection."),
            );
            return;
        };
        if *current_id != match_id {
            self.send(
                ctx,
                &ServerWsMessage::error(
                    "UNKNOWN_MATCH",
                    "Guess does not belong to your active match.",
                ),
            );
            return;
        }
        if round >= ROUNDS_PER_MATCH {
            self.send(
                ctx,
                &ServerWsMessage::error("INVALID_ROUND", "Round index out of range."),
            );
            return;
        }
        duel_addr.do_send(RecordGuess {
            participant: self.connection_id,
            round,
            answer,
            elapsed_ms,
        });
    }
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the connection.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.matchmaking.do_send(Connect {
            connection_id: self.connection_id,
            username: self.username.clone(),
            addr: ctx.address(),
        });
    }

    /// Called when the session stops. The registry treats this as the
    /// disconnect notification; duplicates are no-ops there.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.matchmaking.do_send(Disconnect {
            connection_id: self.connection_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientWsMessage>(&text) {
                Ok(ClientWsMessage::FindOpponent) => {
                    self.matchmaking.do_send(FindOpponent {
                        connection_id: self.connection_id,
                    });
                }
                Ok(ClientWsMessage::CancelSearch) => {
                    self.matchmaking.do_send(CancelSearch {
                        connection_id: self.connection_id,
                    });
                }
                Ok(ClientWsMessage::SubmitGuess {
                    match_id,
                    round,
                    answer,
                    elapsed_ms,
                }) => {
                    self.submit_guess(ctx, match_id, round, answer, elapsed_ms);
                }
                Ok(ClientWsMessage::Ping) => {
                    // Heartbeat; nothing to route.
                }
                Err(_) => {
                    self.send(
                        ctx,
                        &ServerWsMessage::error("INVALID_MESSAGE", "Unrecognized client message."),
                    );
                }
            },
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for PlayerSession {
    type Result = ();

    /// Relays a server message to the client.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) -> Self::Result {
        self.send(ctx, &msg);
    }
}

impl Handler<DuelJoined> for PlayerSession {
    type Result = ();

    fn handle(&mut self, msg: DuelJoined, _ctx: &mut Self::Context) -> Self::Result {
        self.duel = Some((msg.match_id, msg.addr));
    }
}

impl Handler<DuelClosed> for PlayerSession {
    type Result = ();

    fn handle(&mut self, msg: DuelClosed, _ctx: &mut Self::Context) -> Self::Result {
        if self.duel.as_ref().is_some_and(|(id, _)| *id == msg.match_id) {
            self.duel = None;
        }
    }
}

/// WebSocket endpoint for clients.
///
/// Accepts an optional `username` query parameter; a default is derived from
/// the generated connection id when absent.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let mut username = String::new();

    // Parse query parameters for the display name.
    for kv in req.query_string().split('&') {
        let mut split = kv.split('=');
        if let (Some("username"), Some(name)) = (split.next(), split.next()) {
            username = urlencoding::decode(name)
                .unwrap_or_else(|_| Cow::Borrowed(""))
                .into_owned();
        }
    }

    let connection_id = Uuid::new_v4();
    if username.is_empty() {
        username = format!("Player_{}", &connection_id.simple().to_string()[..6]);
    }
    debug!("[Session] Connection {} accepted as '{}'", connection_id, username);

    ws::start(
        PlayerSession::new(connection_id, username, data.matchmaking_addr.clone()),
        &req,
        stream,
    )
}
