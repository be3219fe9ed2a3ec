//! Tracker: the roster and match list, with validation at every mutation.

use crate::logic::stats::{self, PlayerProfile, PointStats};
use crate::models::game::{MatchId, PadelMatch, SetScore, Team, MAX_GAMES_PER_SET, MAX_SETS};
use crate::models::player::{lookup_name, Player, PlayerId, UNKNOWN_PLAYER};
use crate::models::point::{Point, PointDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors that can occur while editing players and matches.
///
/// Every failing operation leaves the tracker unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TrackerError {
    /// Player name is empty or whitespace.
    EmptyName,
    /// No date chosen for a new match.
    MissingDate,
    /// No location entered for a new match.
    MissingLocation,
    /// A match needs exactly 4 players.
    WrongPlayerCount { selected: usize },
    /// The same player was picked twice.
    DuplicatePlayer(PlayerId),
    /// Each team needs exactly 2 players.
    UnevenTeams,
    PlayerNotFound(PlayerId),
    MatchNotFound(MatchId),
    /// Player, result, and stroke must all be selected.
    IncompletePoint,
    /// Stroke is not in the catalogue.
    UnknownStroke(String),
    /// Point credited to someone not playing in the match.
    PlayerNotInMatch(PlayerId),
    /// No point to edit yet.
    NoPoints,
    /// Finished matches accept no more points and cannot be finished again.
    MatchFinished,
    /// A match has 1 to 3 sets.
    InvalidSetCount(usize),
    /// Every set needs both scores.
    IncompleteSetScores,
    /// Games per set must be between 0 and 7.
    ScoreOutOfRange(u8),
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::EmptyName => write!(f, "Please enter a player name."),
            TrackerError::MissingDate => write!(f, "Please set a date."),
            TrackerError::MissingLocation => write!(f, "Please enter a location."),
            TrackerError::WrongPlayerCount { selected } => {
                write!(f, "Select exactly 4 players (selected {}).", selected)
            }
            TrackerError::DuplicatePlayer(_) => write!(f, "A player can only be selected once."),
            TrackerError::UnevenTeams => write!(f, "Assign 2 players to each team."),
            TrackerError::PlayerNotFound(_) => write!(f, "Player not found"),
            TrackerError::MatchNotFound(_) => write!(f, "Match not found"),
            TrackerError::IncompletePoint => write!(f, "Select a player, a result and a stroke."),
            TrackerError::UnknownStroke(name) => write!(f, "Unknown stroke \"{}\"", name),
            TrackerError::PlayerNotInMatch(_) => write!(f, "That player is not in this match."),
            TrackerError::NoPoints => write!(f, "No points recorded yet."),
            TrackerError::MatchFinished => write!(f, "This match is already finished."),
            TrackerError::InvalidSetCount(n) => write!(f, "A match has 1 to {} sets (got {}).", MAX_SETS, n),
            TrackerError::IncompleteSetScores => write!(f, "Fill in all set scores."),
            TrackerError::ScoreOutOfRange(v) => {
                write!(f, "Set scores must be 0-{} (got {}).", MAX_GAMES_PER_SET, v)
            }
        }
    }
}

impl std::error::Error for TrackerError {}

/// Input for creating a match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub teams: [Vec<PlayerId>; 2],
}

/// A set as entered: either score may still be blank.
pub type SetEntry = [Option<u8>; 2];

/// Edit-site filter for a set score cell.
///
/// `Some(None)` clears the cell, `Some(Some(v))` accepts `v` in `0..=7`,
/// `None` rejects the input so the cell keeps its previous value.
pub fn parse_set_score(input: &str) -> Option<Option<u8>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(None);
    }
    match input.parse::<u8>() {
        Ok(v) if v <= MAX_GAMES_PER_SET => Some(Some(v)),
        _ => None,
    }
}

/// Whole application state: the two persisted collections.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tracker {
    pub players: Vec<Player>,
    /// Newly created matches go first.
    pub matches: Vec<PadelMatch>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(players: Vec<Player>, matches: Vec<PadelMatch>) -> Self {
        Self { players, matches }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&PadelMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    fn match_mut(&mut self, id: MatchId) -> Result<&mut PadelMatch, TrackerError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TrackerError::MatchNotFound(id))
    }

    /// Display name, or [`UNKNOWN_PLAYER`] for a deleted player.
    pub fn player_name(&self, id: PlayerId) -> &str {
        lookup_name(&self.players, id).unwrap_or(UNKNOWN_PLAYER)
    }

    /// Add a player. The name is trimmed and must not be empty.
    pub fn add_player(&mut self, name: &str) -> Result<&Player, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        self.players.push(Player::new(name));
        log::debug!("Added player {:?}", name);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Remove a player. Matches keep referencing the id.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, TrackerError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TrackerError::PlayerNotFound(id))?;
        Ok(self.players.remove(idx))
    }

    /// Create a match from 4 distinct existing players split 2/2.
    pub fn create_match(&mut self, setup: MatchSetup) -> Result<&PadelMatch, TrackerError> {
        let date = setup.date.ok_or(TrackerError::MissingDate)?;
        let location = setup.location.trim();
        if location.is_empty() {
            return Err(TrackerError::MissingLocation);
        }

        let selected: Vec<PlayerId> = setup.teams.iter().flatten().copied().collect();
        if selected.len() != 4 {
            return Err(TrackerError::WrongPlayerCount {
                selected: selected.len(),
            });
        }
        let mut seen = HashSet::new();
        for &id in &selected {
            if !seen.insert(id) {
                return Err(TrackerError::DuplicatePlayer(id));
            }
        }
        let teams: [Team; 2] = match (&setup.teams[0][..], &setup.teams[1][..]) {
            (&[a, b], &[c, d]) => [[a, b], [c, d]],
            _ => return Err(TrackerError::UnevenTeams),
        };
        if let Some(&missing) = selected.iter().find(|&&id| self.player(id).is_none()) {
            return Err(TrackerError::PlayerNotFound(missing));
        }

        let m = PadelMatch::new(date, location, teams);
        log::debug!("Created match {} at {:?} on {}", m.id, m.location, m.date);
        self.matches.insert(0, m);
        Ok(&self.matches[0])
    }

    /// Remove a match with its points and sets.
    pub fn delete_match(&mut self, id: MatchId) -> Result<PadelMatch, TrackerError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(TrackerError::MatchNotFound(id))?;
        Ok(self.matches.remove(idx))
    }

    /// Append a point to an unfinished match.
    pub fn record_point(&mut self, match_id: MatchId, draft: PointDraft) -> Result<&Point, TrackerError> {
        let m = self.match_mut(match_id)?;
        let point = validate_point(m, draft)?;
        m.points.push(point);
        Ok(&m.points[m.points.len() - 1])
    }

    /// Replace the most recent point of an unfinished match.
    pub fn edit_last_point(&mut self, match_id: MatchId, draft: PointDraft) -> Result<&Point, TrackerError> {
        let m = self.match_mut(match_id)?;
        let point = validate_point(m, draft)?;
        let last = m.points.last_mut().ok_or(TrackerError::NoPoints)?;
        *last = point;
        Ok(&*last)
    }

    /// Store the final set scores and mark the match finished.
    pub fn finish_match(&mut self, match_id: MatchId, sets: &[SetEntry]) -> Result<&PadelMatch, TrackerError> {
        let m = self.match_mut(match_id)?;
        if m.finished {
            return Err(TrackerError::MatchFinished);
        }
        if sets.is_empty() || sets.len() > MAX_SETS {
            return Err(TrackerError::InvalidSetCount(sets.len()));
        }
        let mut scores: Vec<SetScore> = Vec::with_capacity(sets.len());
        for entry in sets {
            let (a, b) = match entry {
                [Some(a), Some(b)] => (*a, *b),
                _ => return Err(TrackerError::IncompleteSetScores),
            };
            if let Some(&over) = [a, b].iter().find(|&&v| v > MAX_GAMES_PER_SET) {
                return Err(TrackerError::ScoreOutOfRange(over));
            }
            scores.push((a, b));
        }
        m.sets = scores;
        m.finished = true;
        log::debug!("Finished match {} ({})", m.id, m.score_line());
        Ok(&*m)
    }

    /// All matches, newest date first.
    pub fn matches_newest_first(&self) -> Vec<&PadelMatch> {
        stats::newest_first(&self.matches)
    }

    /// Matches the player took part in, newest date first.
    pub fn matches_for_player(&self, player_id: PlayerId) -> Vec<&PadelMatch> {
        stats::matches_for_player(&self.matches, player_id)
    }

    pub fn player_profile(&self, player_id: PlayerId) -> Result<PlayerProfile, TrackerError> {
        let player = self
            .player(player_id)
            .ok_or(TrackerError::PlayerNotFound(player_id))?;
        Ok(stats::player_profile(player, &self.players, &self.matches))
    }

    /// One player's stats within a single match.
    pub fn match_player_stats(&self, match_id: MatchId, player_id: PlayerId) -> Result<PointStats, TrackerError> {
        let m = self
            .match_by_id(match_id)
            .ok_or(TrackerError::MatchNotFound(match_id))?;
        if !m.includes(player_id) {
            return Err(TrackerError::PlayerNotInMatch(player_id));
        }
        Ok(stats::calc_stats(&m.points, player_id))
    }
}

fn validate_point(m: &PadelMatch, draft: PointDraft) -> Result<Point, TrackerError> {
    if m.finished {
        return Err(TrackerError::MatchFinished);
    }
    let (player_id, result, stroke) = match (draft.player_id, draft.result, draft.stroke) {
        (Some(p), Some(r), Some(s)) => (p, r, s),
        _ => return Err(TrackerError::IncompletePoint),
    };
    if stroke.group().is_none() {
        return Err(TrackerError::UnknownStroke(stroke.name().to_string()));
    }
    if !m.includes(player_id) {
        return Err(TrackerError::PlayerNotInMatch(player_id));
    }
    Ok(Point {
        player_id,
        result,
        stroke,
    })
}
