use super::ids::PlayerId;
use serde::{Deserialize, Serialize};

/// A player. Owns zero or more sessions; carries no derived numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
}

/// Fields supplied when registering a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub email: String,
}

impl Player {
    pub fn new(id: PlayerId, fields: NewPlayer) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
        }
    }

    /// Whether `email` refers to this player, ignoring ASCII case and
    /// surrounding whitespace.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}
