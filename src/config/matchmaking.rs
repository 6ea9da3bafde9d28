/// Matchmaking configuration constants.

/// Number of participants paired into a match. Pairing is strict FIFO,
/// oldest two first.
pub const PLAYERS_PER_MATCH: usize = 2;
