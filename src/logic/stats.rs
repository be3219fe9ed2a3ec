//! Point statistics: per-result totals, most frequent stroke, per-match averages, player profiles.

use crate::models::{lookup_name, PadelMatch, Player, PlayerId, Point, PointResult, Stroke, UNKNOWN_PLAYER};
use serde::Serialize;

/// Shown where a result kind has no strokes to rank.
pub const NO_STROKE: &str = "—";

/// Point counts per result kind.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTotals {
    pub winner: u32,
    pub unforced_error: u32,
    pub forced_error: u32,
}

impl ResultTotals {
    fn slot(&mut self, result: PointResult) -> &mut u32 {
        match result {
            PointResult::Winner => &mut self.winner,
            PointResult::UnforcedError => &mut self.unforced_error,
            PointResult::ForcedError => &mut self.forced_error,
        }
    }

    /// Count every point's result, regardless of player.
    pub fn count<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut totals = Self::default();
        for p in points {
            *totals.slot(p.result) += 1;
        }
        totals
    }

    pub fn total(&self) -> u32 {
        self.winner + self.unforced_error + self.forced_error
    }
}

/// Most frequent stroke per result kind (`None` when the player has no such points).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStrokes {
    pub winner: Option<Stroke>,
    pub unforced_error: Option<Stroke>,
    pub forced_error: Option<Stroke>,
}

impl TopStrokes {
    pub fn get(&self, result: PointResult) -> Option<&Stroke> {
        match result {
            PointResult::Winner => self.winner.as_ref(),
            PointResult::UnforcedError => self.unforced_error.as_ref(),
            PointResult::ForcedError => self.forced_error.as_ref(),
        }
    }

    /// Stroke name, or [`NO_STROKE`].
    pub fn label(&self, result: PointResult) -> &str {
        self.get(result).map(Stroke::name).unwrap_or(NO_STROKE)
    }
}

/// Per-match averages of each result kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultAverages {
    pub winner: f64,
    pub unforced_error: f64,
    pub forced_error: f64,
}

/// One player's aggregate over a set of points.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStats {
    pub totals: ResultTotals,
    pub top_strokes: TopStrokes,
}

impl PointStats {
    pub fn averages(&self, match_count: usize) -> ResultAverages {
        ResultAverages {
            winner: per_match_average(self.totals.winner, match_count),
            unforced_error: per_match_average(self.totals.unforced_error, match_count),
            forced_error: per_match_average(self.totals.forced_error, match_count),
        }
    }
}

/// Aggregate the points credited to `player_id`.
///
/// The caller picks the scope: all points from a player's matches for a profile,
/// or a single match's points for a per-match breakdown. Points belonging to other
/// players are ignored. Ties for the top stroke go to the stroke seen first.
pub fn calc_stats<'a>(points: impl IntoIterator<Item = &'a Point>, player_id: PlayerId) -> PointStats {
    let mut totals = ResultTotals::default();
    // Per result kind: (stroke, count) in first-seen order.
    let mut strokes: [Vec<(&Stroke, u32)>; 3] = Default::default();

    for p in points.into_iter().filter(|p| p.player_id == player_id) {
        *totals.slot(p.result) += 1;
        let counts = &mut strokes[result_index(p.result)];
        match counts.iter_mut().find(|(s, _)| *s == &p.stroke) {
            Some((_, n)) => *n += 1,
            None => counts.push((&p.stroke, 1)),
        }
    }

    let top = |result: PointResult| -> Option<Stroke> {
        let mut best: Option<(&Stroke, u32)> = None;
        for &(stroke, n) in &strokes[result_index(result)] {
            if best.map_or(true, |(_, b)| n > b) {
                best = Some((stroke, n));
            }
        }
        best.map(|(s, _)| s.clone())
    };

    PointStats {
        totals,
        top_strokes: TopStrokes {
            winner: top(PointResult::Winner),
            unforced_error: top(PointResult::UnforcedError),
            forced_error: top(PointResult::ForcedError),
        },
    }
}

fn result_index(result: PointResult) -> usize {
    match result {
        PointResult::Winner => 0,
        PointResult::UnforcedError => 1,
        PointResult::ForcedError => 2,
    }
}

/// `total / match_count`, with the match count floored at 1 so a player with no matches averages 0.0.
pub fn per_match_average(total: u32, match_count: usize) -> f64 {
    f64::from(total) / match_count.max(1) as f64
}

/// Sort newest date first. The sort is stable, so matches on the same date keep their order.
pub fn newest_first<'a>(matches: impl IntoIterator<Item = &'a PadelMatch>) -> Vec<&'a PadelMatch> {
    let mut sorted: Vec<&PadelMatch> = matches.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Matches the player took part in, newest date first.
pub fn matches_for_player(matches: &[PadelMatch], player_id: PlayerId) -> Vec<&PadelMatch> {
    newest_first(matches.iter().filter(|m| m.includes(player_id)))
}

/// One line of a player's match history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryEntry {
    pub match_id: crate::models::MatchId,
    pub date: chrono::NaiveDate,
    pub location: String,
    pub team_1: String,
    pub team_2: String,
    pub score: String,
    pub finished: bool,
    /// The player's own counts in this match.
    pub totals: ResultTotals,
}

/// Everything shown on a player's profile.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub player: Player,
    pub match_count: usize,
    pub stats: PointStats,
    pub averages: ResultAverages,
    pub history: Vec<MatchHistoryEntry>,
}

/// Build the profile of `player` from every match they appear in.
pub fn player_profile(player: &Player, players: &[Player], matches: &[PadelMatch]) -> PlayerProfile {
    let mine = matches_for_player(matches, player.id);
    let stats = calc_stats(mine.iter().flat_map(|m| m.points.iter()), player.id);
    let name = |id| lookup_name(players, id).unwrap_or(UNKNOWN_PLAYER).to_string();

    let history = mine
        .iter()
        .map(|m| MatchHistoryEntry {
            match_id: m.id,
            date: m.date,
            location: m.location.clone(),
            team_1: m.team_names(0, name),
            team_2: m.team_names(1, name),
            score: m.score_line(),
            finished: m.finished,
            totals: calc_stats(&m.points, player.id).totals,
        })
        .collect();

    PlayerProfile {
        player: player.clone(),
        match_count: mine.len(),
        averages: stats.averages(mine.len()),
        stats,
        history,
    }
}
