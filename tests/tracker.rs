//! Integration tests for the tracker: player and match setup, point entry, match completion.

mod common;

use common::{create_standard_match, date, draft, setup, tracker_with_four};
use padel_tracker::{
    parse_set_score, MatchSetup, PointDraft, PointResult, Stroke, Tracker, TrackerError, View,
};
use uuid::Uuid;

#[test]
fn add_player_trims_and_rejects_blank_names() {
    let mut t = Tracker::new();
    assert_eq!(t.add_player("   "), Err(TrackerError::EmptyName));
    assert_eq!(t.add_player(""), Err(TrackerError::EmptyName));
    assert!(t.players.is_empty());

    let p = t.add_player("  Ana  ").unwrap();
    assert_eq!(p.name, "Ana");
    assert_eq!(t.players.len(), 1);
}

#[test]
fn create_match_rejects_bad_setups_without_changing_state() {
    let (mut t, [a, b, c, d]) = tracker_with_four();
    let on = date(2024, 5, 1);
    let cases: Vec<(MatchSetup, TrackerError)> = vec![
        (
            MatchSetup {
                date: None,
                ..setup(on, [vec![a, b], vec![c, d]])
            },
            TrackerError::MissingDate,
        ),
        (
            MatchSetup {
                location: "  ".to_string(),
                ..setup(on, [vec![a, b], vec![c, d]])
            },
            TrackerError::MissingLocation,
        ),
        (
            setup(on, [vec![a, b], vec![c]]),
            TrackerError::WrongPlayerCount { selected: 3 },
        ),
        (
            setup(on, [vec![a, b], vec![c, a]]),
            TrackerError::DuplicatePlayer(a),
        ),
        (setup(on, [vec![a, b, c], vec![d]]), TrackerError::UnevenTeams),
    ];
    for (s, expected) in cases {
        assert_eq!(t.create_match(s), Err(expected));
    }

    let stranger = Uuid::new_v4();
    assert_eq!(
        t.create_match(setup(on, [vec![a, b], vec![c, stranger]])),
        Err(TrackerError::PlayerNotFound(stranger))
    );
    assert!(t.matches.is_empty());
}

#[test]
fn new_matches_start_empty_and_go_first() {
    let (mut t, ids) = tracker_with_four();
    let first = create_standard_match(&mut t, ids, date(2024, 5, 1));
    let second = create_standard_match(&mut t, ids, date(2024, 4, 1));

    assert_eq!(t.matches[0].id, second);
    assert_eq!(t.matches[1].id, first);
    let m = t.match_by_id(first).unwrap();
    assert!(m.points.is_empty() && m.sets.is_empty() && !m.finished);
    assert_eq!(m.location, "Club Pádel Madrid");
    assert_eq!(m.teams, [[ids[0], ids[1]], [ids[2], ids[3]]]);

    // Listing is by match date, not creation order.
    let listed: Vec<_> = t.matches_newest_first().iter().map(|m| m.id).collect();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn scenario_record_points_and_query_totals() {
    let (mut t, ids) = tracker_with_four();
    let ana = ids[0];
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));

    t.record_point(id, draft(ana, PointResult::Winner, Stroke::Bandeja)).unwrap();
    t.record_point(id, draft(ana, PointResult::Winner, Stroke::Smash)).unwrap();
    t.record_point(id, draft(ana, PointResult::UnforcedError, Stroke::BhVolley))
        .unwrap();

    let stats = t.match_player_stats(id, ana).unwrap();
    assert_eq!(stats.totals.winner, 2);
    assert_eq!(stats.totals.unforced_error, 1);
    assert_eq!(stats.totals.forced_error, 0);
    assert_eq!(stats.top_strokes.winner, Some(Stroke::Bandeja));
    assert_eq!(stats.top_strokes.forced_error, None);
}

#[test]
fn scenario_finish_match_with_three_sets() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));

    let m = t
        .finish_match(id, &[[Some(6), Some(3)], [Some(4), Some(6)], [Some(7), Some(5)]])
        .unwrap();
    assert!(m.finished);
    assert_eq!(m.sets, vec![(6, 3), (4, 6), (7, 5)]);
    assert_eq!(m.score_line(), "6-3, 4-6, 7-5");
}

#[test]
fn scenario_deleted_player_stays_referenced() {
    let (mut t, ids) = tracker_with_four();
    let ana = ids[0];
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));
    t.record_point(id, draft(ana, PointResult::Winner, Stroke::Rulo)).unwrap();

    let removed = t.delete_player(ana).unwrap();
    assert_eq!(removed.name, "Ana");
    let m = t.match_by_id(id).unwrap();
    assert!(m.includes(ana));
    assert_eq!(m.points[0].player_id, ana);
    assert_eq!(t.player_name(ana), "?");
    assert_eq!(t.delete_player(ana), Err(TrackerError::PlayerNotFound(ana)));
}

#[test]
fn record_point_requires_complete_selection_from_the_match() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));

    let missing_stroke = PointDraft {
        stroke: None,
        ..draft(ids[0], PointResult::Winner, Stroke::Smash)
    };
    assert_eq!(t.record_point(id, missing_stroke), Err(TrackerError::IncompletePoint));
    assert_eq!(
        t.record_point(id, PointDraft::default()),
        Err(TrackerError::IncompletePoint)
    );

    let outsider = t.add_player("Eva").unwrap().id;
    assert_eq!(
        t.record_point(id, draft(outsider, PointResult::Winner, Stroke::Smash)),
        Err(TrackerError::PlayerNotInMatch(outsider))
    );
    assert_eq!(
        t.record_point(id, draft(ids[0], PointResult::Winner, Stroke::Other("Chiquita".into()))),
        Err(TrackerError::UnknownStroke("Chiquita".to_string()))
    );
    let unknown_match = Uuid::new_v4();
    assert_eq!(
        t.record_point(unknown_match, draft(ids[0], PointResult::Winner, Stroke::Smash)),
        Err(TrackerError::MatchNotFound(unknown_match))
    );
    assert!(t.match_by_id(id).unwrap().points.is_empty());
}

#[test]
fn edit_last_point_replaces_only_the_last() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));
    assert_eq!(
        t.edit_last_point(id, draft(ids[0], PointResult::Winner, Stroke::Smash)),
        Err(TrackerError::NoPoints)
    );

    t.record_point(id, draft(ids[0], PointResult::Winner, Stroke::Smash)).unwrap();
    t.record_point(id, draft(ids[1], PointResult::ForcedError, Stroke::Serve)).unwrap();
    t.edit_last_point(id, draft(ids[2], PointResult::UnforcedError, Stroke::FhLob))
        .unwrap();

    let points = &t.match_by_id(id).unwrap().points;
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].player_id, ids[0]);
    assert_eq!(points[1].player_id, ids[2]);
    assert_eq!(points[1].result, PointResult::UnforcedError);
    assert_eq!(points[1].stroke, Stroke::FhLob);
}

#[test]
fn finished_matches_reject_point_entry() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));
    t.record_point(id, draft(ids[0], PointResult::Winner, Stroke::Smash)).unwrap();
    t.finish_match(id, &[[Some(6), Some(0)]]).unwrap();

    let d = draft(ids[0], PointResult::Winner, Stroke::Smash);
    assert_eq!(t.record_point(id, d.clone()), Err(TrackerError::MatchFinished));
    assert_eq!(t.edit_last_point(id, d), Err(TrackerError::MatchFinished));
    assert_eq!(
        t.finish_match(id, &[[Some(6), Some(1)]]),
        Err(TrackerError::MatchFinished)
    );
    let m = t.match_by_id(id).unwrap();
    assert_eq!(m.points.len(), 1);
    assert_eq!(m.sets, vec![(6, 0)]);
}

#[test]
fn finish_match_validates_set_entries() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));

    assert_eq!(t.finish_match(id, &[]), Err(TrackerError::InvalidSetCount(0)));
    assert_eq!(
        t.finish_match(id, &[[Some(6), Some(0)]; 4]),
        Err(TrackerError::InvalidSetCount(4))
    );
    assert_eq!(
        t.finish_match(id, &[[Some(6), Some(4)], [Some(3), None]]),
        Err(TrackerError::IncompleteSetScores)
    );
    assert_eq!(
        t.finish_match(id, &[[Some(8), Some(6)]]),
        Err(TrackerError::ScoreOutOfRange(8))
    );
    let m = t.match_by_id(id).unwrap();
    assert!(!m.finished);
    assert!(m.sets.is_empty());
}

#[test]
fn set_score_input_filter() {
    assert_eq!(parse_set_score(""), Some(None));
    assert_eq!(parse_set_score("0"), Some(Some(0)));
    assert_eq!(parse_set_score(" 7 "), Some(Some(7)));
    assert_eq!(parse_set_score("8"), None);
    assert_eq!(parse_set_score("-1"), None);
    assert_eq!(parse_set_score("six"), None);
}

#[test]
fn match_player_stats_requires_a_participant() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));
    let outsider = t.add_player("Eva").unwrap().id;
    assert_eq!(
        t.match_player_stats(id, outsider),
        Err(TrackerError::PlayerNotInMatch(outsider))
    );
}

#[test]
fn view_falls_back_when_entity_is_gone() {
    let (mut t, ids) = tracker_with_four();
    let id = create_standard_match(&mut t, ids, date(2024, 5, 1));

    assert_eq!(View::PlayerProfile(ids[0]).resolve(&t), View::PlayerProfile(ids[0]));
    assert_eq!(View::EndMatch(id).resolve(&t), View::EndMatch(id));

    t.finish_match(id, &[[Some(6), Some(2)]]).unwrap();
    assert_eq!(View::EndMatch(id).resolve(&t), View::Match(id));

    t.delete_player(ids[0]).unwrap();
    t.delete_match(id).unwrap();
    assert_eq!(View::PlayerProfile(ids[0]).resolve(&t), View::Players);
    assert_eq!(View::Match(id).resolve(&t), View::Matches);
    assert_eq!(View::EndMatch(id).resolve(&t), View::Matches);
    assert_eq!(View::Export.resolve(&t), View::Export);
}
