//! Integration tests for point statistics and player profiles.

mod common;

use common::{create_standard_match, date, draft, tracker_with_four};
use padel_tracker::{calc_stats, per_match_average, Point, PointResult, Stroke};
use uuid::Uuid;

fn point(player_id: Uuid, result: PointResult, stroke: Stroke) -> Point {
    Point {
        player_id,
        result,
        stroke,
    }
}

#[test]
fn totals_partition_the_players_points() {
    let me = Uuid::new_v4();
    let other = Uuid::new_v4();
    let points = vec![
        point(me, PointResult::Winner, Stroke::Smash),
        point(other, PointResult::Winner, Stroke::Smash),
        point(me, PointResult::ForcedError, Stroke::Serve),
        point(me, PointResult::UnforcedError, Stroke::BhLob),
        point(other, PointResult::UnforcedError, Stroke::BhLob),
        point(me, PointResult::UnforcedError, Stroke::FhVolley),
    ];

    let stats = calc_stats(&points, me);
    assert_eq!(stats.totals.winner, 1);
    assert_eq!(stats.totals.unforced_error, 2);
    assert_eq!(stats.totals.forced_error, 1);
    let mine = points.iter().filter(|p| p.player_id == me).count() as u32;
    assert_eq!(stats.totals.total(), mine);
}

#[test]
fn no_points_gives_zero_totals_and_no_strokes() {
    let none: Vec<Point> = Vec::new();
    let stats = calc_stats(&none, Uuid::new_v4());
    assert_eq!(stats.totals.total(), 0);
    for r in PointResult::ALL {
        assert_eq!(stats.top_strokes.get(r), None);
        assert_eq!(stats.top_strokes.label(r), "—");
    }
}

#[test]
fn top_stroke_ties_go_to_first_seen_not_alphabetical() {
    let me = Uuid::new_v4();
    let points = vec![
        point(me, PointResult::Winner, Stroke::Vibora),
        point(me, PointResult::Winner, Stroke::Bandeja),
        point(me, PointResult::Winner, Stroke::Bandeja),
        point(me, PointResult::Winner, Stroke::Vibora),
        point(me, PointResult::ForcedError, Stroke::Serve),
    ];
    let stats = calc_stats(&points, me);
    assert_eq!(stats.top_strokes.winner, Some(Stroke::Vibora));
    assert_eq!(stats.top_strokes.label(PointResult::Winner), "Víbora");
    // Same input, same answer.
    assert_eq!(calc_stats(&points, me), stats);
}

#[test]
fn top_stroke_picks_highest_count() {
    let me = Uuid::new_v4();
    let points = vec![
        point(me, PointResult::UnforcedError, Stroke::Forehand),
        point(me, PointResult::UnforcedError, Stroke::Backhand),
        point(me, PointResult::UnforcedError, Stroke::Backhand),
    ];
    let stats = calc_stats(&points, me);
    assert_eq!(stats.top_strokes.unforced_error, Some(Stroke::Backhand));
    assert_eq!(stats.top_strokes.winner, None);
}

#[test]
fn average_divisor_is_floored_at_one() {
    assert_eq!(per_match_average(0, 0), 0.0);
    assert_eq!(per_match_average(3, 0), 3.0);
    assert_eq!(per_match_average(3, 2), 1.5);
}

#[test]
fn profile_of_player_without_matches_averages_zero() {
    let (t, ids) = tracker_with_four();
    let profile = t.player_profile(ids[0]).unwrap();
    assert_eq!(profile.match_count, 0);
    assert_eq!(profile.averages.winner, 0.0);
    assert_eq!(profile.averages.unforced_error, 0.0);
    assert_eq!(profile.averages.forced_error, 0.0);
    assert!(profile.history.is_empty());
}

#[test]
fn profile_aggregates_across_matches_newest_first() {
    let (mut t, ids) = tracker_with_four();
    let ana = ids[0];
    let older = create_standard_match(&mut t, ids, date(2024, 3, 10));
    let newer = create_standard_match(&mut t, ids, date(2024, 6, 2));

    t.record_point(older, draft(ana, PointResult::Winner, Stroke::Smash)).unwrap();
    t.record_point(older, draft(ids[2], PointResult::Winner, Stroke::Rulo)).unwrap();
    t.record_point(newer, draft(ana, PointResult::Winner, Stroke::Smash)).unwrap();
    t.record_point(newer, draft(ana, PointResult::Winner, Stroke::Smash)).unwrap();
    t.record_point(newer, draft(ana, PointResult::ForcedError, Stroke::BhReturn))
        .unwrap();
    t.finish_match(older, &[[Some(6), Some(4)], [Some(6), Some(2)]]).unwrap();

    let profile = t.player_profile(ana).unwrap();
    assert_eq!(profile.player.name, "Ana");
    assert_eq!(profile.match_count, 2);
    assert_eq!(profile.stats.totals.winner, 3);
    assert_eq!(profile.stats.totals.forced_error, 1);
    assert_eq!(profile.averages.winner, 1.5);
    assert_eq!(profile.averages.forced_error, 0.5);
    assert_eq!(profile.stats.top_strokes.winner, Some(Stroke::Smash));

    let history_ids: Vec<_> = profile.history.iter().map(|h| h.match_id).collect();
    assert_eq!(history_ids, vec![newer, older]);
    assert_eq!(profile.history[0].totals.winner, 2);
    assert_eq!(profile.history[1].totals.winner, 1);
    assert_eq!(profile.history[1].score, "6-4, 6-2");
    assert_eq!(profile.history[1].team_1, "Ana & Luis");
    assert_eq!(profile.history[1].team_2, "Marta & Jon");
}
