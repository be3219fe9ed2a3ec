//! PadelMatch: a 2v2 match with its point log and final set scores.

use crate::models::player::PlayerId;
use crate::models::point::Point;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A doubles team: exactly two player ids.
pub type Team = [PlayerId; 2];

/// Games won by (team 1, team 2) in one set.
pub type SetScore = (u8, u8);

/// Highest number of games either team can have in a set.
pub const MAX_GAMES_PER_SET: u8 = 7;

/// Most sets a match can have.
pub const MAX_SETS: usize = 3;

/// A single match between two teams of two.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadelMatch {
    pub id: MatchId,
    pub date: NaiveDate,
    pub location: String,
    pub teams: [Team; 2],
    /// Recorded points; the point number is the index + 1.
    #[serde(default)]
    pub points: Vec<Point>,
    /// Empty until the match is finished.
    #[serde(default)]
    pub sets: Vec<SetScore>,
    #[serde(default)]
    pub finished: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl PadelMatch {
    pub fn new(date: NaiveDate, location: impl Into<String>, teams: [Team; 2]) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            location: location.into(),
            teams,
            points: Vec::new(),
            sets: Vec::new(),
            finished: false,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// The four player ids, team 1 first.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.teams.iter().flatten().copied()
    }

    pub fn includes(&self, player_id: PlayerId) -> bool {
        self.player_ids().any(|id| id == player_id)
    }

    /// Index (0 or 1) of the team the player is on.
    pub fn team_of(&self, player_id: PlayerId) -> Option<usize> {
        self.teams.iter().position(|t| t.contains(&player_id))
    }

    /// Team members' names joined with ` & `, using `name` to resolve each id.
    pub fn team_names<F>(&self, team: usize, name: F) -> String
    where
        F: Fn(PlayerId) -> String,
    {
        self.teams[team]
            .iter()
            .map(|&id| name(id))
            .collect::<Vec<_>>()
            .join(" & ")
    }

    /// Set scores as `6-3, 4-6`; empty when the match has no sets.
    pub fn score_line(&self) -> String {
        self.sets
            .iter()
            .map(|(a, b)| format!("{a}-{b}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
