/// Matchmaking module: connection registry, FIFO waiting queue, and pairing.

pub mod queue;
pub mod server;
pub mod types;
