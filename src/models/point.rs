//! Point, PointResult, and the grouped stroke catalogue.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a rally, credited to (or charged against) one player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PointResult {
    Winner,
    #[serde(rename = "Unforced Error")]
    UnforcedError,
    #[serde(rename = "Forced Error")]
    ForcedError,
}

impl PointResult {
    /// All result kinds, in display order.
    pub const ALL: [PointResult; 3] = [
        PointResult::Winner,
        PointResult::UnforcedError,
        PointResult::ForcedError,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PointResult::Winner => "Winner",
            PointResult::UnforcedError => "Unforced Error",
            PointResult::ForcedError => "Forced Error",
        }
    }

    /// Abbreviation used in point logs and summary columns.
    pub fn short(self) -> &'static str {
        match self {
            PointResult::Winner => "W",
            PointResult::UnforcedError => "UE",
            PointResult::ForcedError => "FE",
        }
    }
}

impl fmt::Display for PointResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Family a stroke belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum StrokeGroup {
    Forehand,
    Backhand,
    Overhead,
}

impl StrokeGroup {
    pub const ALL: [StrokeGroup; 3] = [
        StrokeGroup::Forehand,
        StrokeGroup::Backhand,
        StrokeGroup::Overhead,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StrokeGroup::Forehand => "Forehand",
            StrokeGroup::Backhand => "Backhand",
            StrokeGroup::Overhead => "Overhead",
        }
    }

    /// Strokes in this group, in picker order.
    pub fn strokes(self) -> &'static [Stroke] {
        match self {
            StrokeGroup::Forehand => &[
                Stroke::Serve,
                Stroke::Forehand,
                Stroke::FhReturn,
                Stroke::FhLob,
                Stroke::FhVolley,
            ],
            StrokeGroup::Backhand => &[
                Stroke::Backhand,
                Stroke::BhReturn,
                Stroke::BhLob,
                Stroke::BhVolley,
            ],
            StrokeGroup::Overhead => &[Stroke::Smash, Stroke::Bandeja, Stroke::Vibora, Stroke::Rulo],
        }
    }
}

impl fmt::Display for StrokeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The stroke a point was played with.
///
/// Persisted as its display name. Names outside the catalogue (e.g. from older
/// saved data) are kept verbatim in `Other` so they survive a load/save cycle;
/// they have no group.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stroke {
    Serve,
    Forehand,
    FhReturn,
    FhLob,
    FhVolley,
    Backhand,
    BhReturn,
    BhLob,
    BhVolley,
    Smash,
    Bandeja,
    Vibora,
    Rulo,
    Other(String),
}

impl Stroke {
    /// Look up a catalogue stroke by its display name.
    pub fn parse(name: &str) -> Option<Stroke> {
        let stroke = match name {
            "Serve" => Stroke::Serve,
            "Forehand" => Stroke::Forehand,
            "FH Return" => Stroke::FhReturn,
            "FH Lob" => Stroke::FhLob,
            "FH Volley" => Stroke::FhVolley,
            "Backhand" => Stroke::Backhand,
            "BH Return" => Stroke::BhReturn,
            "BH Lob" => Stroke::BhLob,
            "BH Volley" => Stroke::BhVolley,
            "Smash" => Stroke::Smash,
            "Bandeja" => Stroke::Bandeja,
            "Víbora" => Stroke::Vibora,
            "Rulo" => Stroke::Rulo,
            _ => return None,
        };
        Some(stroke)
    }

    pub fn name(&self) -> &str {
        match self {
            Stroke::Serve => "Serve",
            Stroke::Forehand => "Forehand",
            Stroke::FhReturn => "FH Return",
            Stroke::FhLob => "FH Lob",
            Stroke::FhVolley => "FH Volley",
            Stroke::Backhand => "Backhand",
            Stroke::BhReturn => "BH Return",
            Stroke::BhLob => "BH Lob",
            Stroke::BhVolley => "BH Volley",
            Stroke::Smash => "Smash",
            Stroke::Bandeja => "Bandeja",
            Stroke::Vibora => "Víbora",
            Stroke::Rulo => "Rulo",
            Stroke::Other(name) => name,
        }
    }

    /// Group this stroke belongs to; `None` for names outside the catalogue.
    pub fn group(&self) -> Option<StrokeGroup> {
        match self {
            Stroke::Serve | Stroke::Forehand | Stroke::FhReturn | Stroke::FhLob | Stroke::FhVolley => {
                Some(StrokeGroup::Forehand)
            }
            Stroke::Backhand | Stroke::BhReturn | Stroke::BhLob | Stroke::BhVolley => {
                Some(StrokeGroup::Backhand)
            }
            Stroke::Smash | Stroke::Bandeja | Stroke::Vibora | Stroke::Rulo => Some(StrokeGroup::Overhead),
            Stroke::Other(_) => None,
        }
    }
}

impl From<String> for Stroke {
    fn from(name: String) -> Self {
        Stroke::parse(&name).unwrap_or(Stroke::Other(name))
    }
}

impl From<Stroke> for String {
    fn from(stroke: Stroke) -> Self {
        match stroke {
            Stroke::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded point. Only ever stored inside its match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub player_id: PlayerId,
    pub result: PointResult,
    pub stroke: Stroke,
}

/// Point being entered: each selection may still be missing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDraft {
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub result: Option<PointResult>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
}

impl PointDraft {
    pub fn new(player_id: PlayerId, result: PointResult, stroke: Stroke) -> Self {
        Self {
            player_id: Some(player_id),
            result: Some(result),
            stroke: Some(stroke),
        }
    }
}

impl From<Point> for PointDraft {
    fn from(p: Point) -> Self {
        Self::new(p.player_id, p.result, p.stroke)
    }
}
