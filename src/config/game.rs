/// Game configuration constants.
///
/// This module defines the main duel parameters: rounds per match, the round
/// time limit, and the scoring weights.

/// Number of rounds played in every match.
pub const ROUNDS_PER_MATCH: usize = 5;

/// Time limit of a round, in seconds.
pub const ROUND_TIMEOUT_SECONDS: u64 = 10;

/// Base points awarded for a correct answer.
pub const MAX_POINTS_PER_ROUND: u32 = 100;

/// Bonus points per full second left on the clock when answering correctly.
pub const SPEED_BONUS_MULTIPLIER: u32 = 10;

/// Round time limit in milliseconds, the unit guess latencies are measured in.
pub const fn round_timeout_ms() -> u64 {
    ROUND_TIMEOUT_SECONDS * 1000
}
