/// Duel module: the per-match state machine actor, round timers, and result
/// reporting.

pub mod messages;
pub mod round_resolution;
pub mod server;

pub use server::DuelSession;
