//! Player data structure.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams, points and lookups).
pub type PlayerId = Uuid;

/// Label shown in place of a player that has since been deleted.
pub const UNKNOWN_PLAYER: &str = "?";

/// A player on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Millisecond precision, matching the stored form.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with the given name. The caller is responsible for validating the name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Name of the player with this id, if they are still on the roster.
pub fn lookup_name(players: &[Player], id: PlayerId) -> Option<&str> {
    players.iter().find(|p| p.id == id).map(|p| p.name.as_str())
}
