//! Data structures for the padel tracker: players, matches, points, and the tracker itself.

mod game;
mod player;
mod point;
mod tracker;
mod view;

pub use game::{MatchId, PadelMatch, SetScore, Team, MAX_GAMES_PER_SET, MAX_SETS};
pub use player::{lookup_name, Player, PlayerId, UNKNOWN_PLAYER};
pub use point::{Point, PointDraft, PointResult, Stroke, StrokeGroup};
pub use tracker::{parse_set_score, MatchSetup, SetEntry, Tracker, TrackerError};
pub use view::View;
