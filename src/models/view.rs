//! View: which screen (and which entity) the user is looking at.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use crate::models::tracker::Tracker;
use serde::{Deserialize, Serialize};

/// Current screen. Kept per browser session rather than as global state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "id", rename_all = "snake_case")]
pub enum View {
    #[default]
    Players,
    Matches,
    Export,
    NewMatch,
    PlayerProfile(PlayerId),
    Match(MatchId),
    /// Entering set scores for a match.
    EndMatch(MatchId),
}

impl View {
    /// Drop back to the parent list when the viewed entity no longer exists,
    /// and out of the end-match screen once the match is finished.
    pub fn resolve(self, tracker: &Tracker) -> View {
        match self {
            View::PlayerProfile(id) if tracker.player(id).is_none() => View::Players,
            View::Match(id) if tracker.match_by_id(id).is_none() => View::Matches,
            View::EndMatch(id) => match tracker.match_by_id(id) {
                None => View::Matches,
                Some(m) if m.finished => View::Match(id),
                Some(_) => self,
            },
            other => other,
        }
    }
}
