//! CSV reports: player statistics, match summary, and point-by-point detail.

use crate::logic::stats::{calc_stats, newest_first, ResultTotals, NO_STROKE};
use crate::models::{lookup_name, PadelMatch, Player, PlayerId, PointResult};
use std::fmt;

/// Errors while serializing a report.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Csv(e) => write!(f, "CSV write error: {}", e),
            ExportError::Io(e) => write!(f, "CSV flush error: {}", e),
            ExportError::Utf8(e) => write!(f, "CSV output is not UTF-8: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

impl From<std::string::FromUtf8Error> for ExportError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ExportError::Utf8(e)
    }
}

/// A rectangular report: header row plus data rows of the same width.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn with_header(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Serialize as CSV: every cell quoted, quotes doubled, `\n` between rows, no trailing newline.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let mut bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        Ok(String::from_utf8(bytes)?)
    }
}

/// The three downloadable reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportKind {
    PlayerStats,
    MatchSummary,
    PointDetail,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::PlayerStats,
        ReportKind::MatchSummary,
        ReportKind::PointDetail,
    ];

    /// Parse the short name used in export URLs (`players`, `matches`, `points`).
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "players" => Some(ReportKind::PlayerStats),
            "matches" => Some(ReportKind::MatchSummary),
            "points" => Some(ReportKind::PointDetail),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::PlayerStats => "padel_player_stats.csv",
            ReportKind::MatchSummary => "padel_match_stats.csv",
            ReportKind::PointDetail => "padel_points_detail.csv",
        }
    }

    pub fn build(self, players: &[Player], matches: &[PadelMatch]) -> Table {
        match self {
            ReportKind::PlayerStats => player_stats_table(players, matches),
            ReportKind::MatchSummary => match_summary_table(players, matches),
            ReportKind::PointDetail => point_detail_table(players, matches),
        }
    }
}

/// Export name lookup: a deleted player shows as their raw id.
fn export_name(players: &[Player], id: PlayerId) -> String {
    lookup_name(players, id)
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string())
}

/// One row per player: match count, per-match averages, and top stroke per result.
/// Matches are walked in collection order, so stroke ties go to the most recently created match.
pub fn player_stats_table(players: &[Player], matches: &[PadelMatch]) -> Table {
    let mut table = Table::with_header(&[
        "Player",
        "Matches",
        "Avg Winners",
        "Avg UE",
        "Avg FE",
        "Top W Stroke",
        "Top UE Stroke",
        "Top FE Stroke",
    ]);
    for p in players {
        let mine: Vec<&PadelMatch> = matches.iter().filter(|m| m.includes(p.id)).collect();
        let stats = calc_stats(mine.iter().flat_map(|m| m.points.iter()), p.id);
        let avg = stats.averages(mine.len());
        let mut row = vec![
            p.name.clone(),
            mine.len().to_string(),
            format!("{:.2}", avg.winner),
            format!("{:.2}", avg.unforced_error),
            format!("{:.2}", avg.forced_error),
        ];
        row.extend(
            PointResult::ALL
                .iter()
                .map(|&r| stats.top_strokes.label(r).to_string()),
        );
        table.rows.push(row);
    }
    table
}

/// One row per match, newest first, with match-wide result counts.
pub fn match_summary_table(players: &[Player], matches: &[PadelMatch]) -> Table {
    let mut table = Table::with_header(&[
        "Date",
        "Location",
        "Team 1",
        "Team 2",
        "Score",
        "Total Points",
        "W",
        "UE",
        "FE",
    ]);
    let name = |id| export_name(players, id);
    for m in newest_first(matches) {
        let score = m.score_line();
        let totals = ResultTotals::count(&m.points);
        table.rows.push(vec![
            m.date.to_string(),
            m.location.clone(),
            m.team_names(0, name),
            m.team_names(1, name),
            if score.is_empty() { NO_STROKE.to_string() } else { score },
            m.points.len().to_string(),
            totals.winner.to_string(),
            totals.unforced_error.to_string(),
            totals.forced_error.to_string(),
        ]);
    }
    table
}

/// One row per recorded point, matches newest first, points in recorded order.
pub fn point_detail_table(players: &[Player], matches: &[PadelMatch]) -> Table {
    let mut table = Table::with_header(&[
        "Match Date",
        "Location",
        "Team 1",
        "Team 2",
        "Point #",
        "Player",
        "Result",
        "Stroke Group",
        "Stroke",
    ]);
    let name = |id| export_name(players, id);
    for m in newest_first(matches) {
        let team_1 = m.team_names(0, name);
        let team_2 = m.team_names(1, name);
        for (i, pt) in m.points.iter().enumerate() {
            table.rows.push(vec![
                m.date.to_string(),
                m.location.clone(),
                team_1.clone(),
                team_2.clone(),
                (i + 1).to_string(),
                name(pt.player_id),
                pt.result.label().to_string(),
                pt.stroke
                    .group()
                    .map(|g| g.label())
                    .unwrap_or(NO_STROKE)
                    .to_string(),
                pt.stroke.name().to_string(),
            ]);
        }
    }
    table
}
