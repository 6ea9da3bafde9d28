use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public identity of a connected participant.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub username: String,
}
