#![allow(dead_code)]

use chrono::NaiveDate;
use padel_tracker::{MatchId, MatchSetup, PlayerId, PointDraft, PointResult, Stroke, Tracker};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Tracker with Ana, Luis, Marta and Jon on the roster; returns their ids in that order.
pub fn tracker_with_four() -> (Tracker, [PlayerId; 4]) {
    let mut t = Tracker::new();
    let ids = ["Ana", "Luis", "Marta", "Jon"].map(|name| t.add_player(name).unwrap().id);
    (t, ids)
}

pub fn setup(on: NaiveDate, teams: [Vec<PlayerId>; 2]) -> MatchSetup {
    MatchSetup {
        date: Some(on),
        location: "Club Pádel Madrid".to_string(),
        teams,
    }
}

/// Ana & Luis vs Marta & Jon.
pub fn create_standard_match(t: &mut Tracker, ids: [PlayerId; 4], on: NaiveDate) -> MatchId {
    let [a, b, c, d] = ids;
    t.create_match(setup(on, [vec![a, b], vec![c, d]])).unwrap().id
}

pub fn draft(player: PlayerId, result: PointResult, stroke: Stroke) -> PointDraft {
    PointDraft::new(player, result, stroke)
}
