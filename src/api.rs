//! JSON API over the padel tracker plus CSV downloads.
//! Mounted by the `web` binary through [`configure`] and [`session_middleware`].

use crate::{
    MatchId, MatchSetup, PadelMatch, PlayerId, PointDraft, ReportKind, Saver, SetEntry, StrokeGroup, Tracker,
    TrackerError, View,
};
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path, ServiceConfig},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// In-memory tracker plus the handle that persists it.
pub struct AppData {
    pub tracker: RwLock<Tracker>,
    pub saver: Saver,
}

impl AppData {
    pub fn new(tracker: Tracker, saver: Saver) -> Data<AppData> {
        Data::new(AppData {
            tracker: RwLock::new(tracker),
            saver,
        })
    }
}

type AppState = Data<AppData>;

const VIEW_SESSION_KEY: &str = "view";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct FinishMatchBody {
    sets: Vec<SetEntry>,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and player id (e.g. /api/matches/{id}/players/{player_id})
#[derive(Deserialize)]
struct MatchPlayerPath {
    id: MatchId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct ExportPath {
    kind: String,
}

/// Match as listed: the stored match plus resolved team names and score line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchSummary<'a> {
    #[serde(flatten)]
    m: &'a PadelMatch,
    team_1: String,
    team_2: String,
    score: String,
    point_count: usize,
}

impl<'a> MatchSummary<'a> {
    fn new(tracker: &Tracker, m: &'a PadelMatch) -> Self {
        let name = |id| tracker.player_name(id).to_string();
        Self {
            m,
            team_1: m.team_names(0, name),
            team_2: m.team_names(1, name),
            score: m.score_line(),
            point_count: m.points.len(),
        }
    }
}

/// One line of the point log.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PointLogEntry<'a> {
    number: usize,
    player_id: PlayerId,
    player: &'a str,
    team: Option<usize>,
    result: &'static str,
    short: &'static str,
    stroke: &'a str,
    stroke_group: Option<StrokeGroup>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchDetail<'a> {
    #[serde(flatten)]
    summary: MatchSummary<'a>,
    /// Newest point first, as shown in the log.
    log: Vec<PointLogEntry<'a>>,
    /// Only the last point can be edited, and only before the match is finished.
    can_edit_last: bool,
    /// Selections to prefill the edit form with.
    last_point: Option<PointDraft>,
}

impl<'a> MatchDetail<'a> {
    fn new(tracker: &'a Tracker, m: &'a PadelMatch) -> Self {
        let log = m
            .points
            .iter()
            .enumerate()
            .rev()
            .map(|(i, p)| PointLogEntry {
                number: i + 1,
                player_id: p.player_id,
                player: tracker.player_name(p.player_id),
                team: m.team_of(p.player_id),
                result: p.result.label(),
                short: p.result.short(),
                stroke: p.stroke.name(),
                stroke_group: p.stroke.group(),
            })
            .collect();
        let can_edit_last = !m.finished && !m.points.is_empty();
        let last_point = if can_edit_last {
            m.points.last().cloned().map(PointDraft::from)
        } else {
            None
        };
        Self {
            summary: MatchSummary::new(tracker, m),
            log,
            can_edit_last,
            last_point,
        }
    }
}

#[derive(Serialize)]
struct StrokeGroupEntry {
    group: StrokeGroup,
    strokes: Vec<&'static str>,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn tracker_error(e: &TrackerError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TrackerError::PlayerNotFound(_) | TrackerError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tracker",
    })
}

/// Stroke picker contents, grouped.
#[get("/api/strokes")]
async fn api_strokes() -> HttpResponse {
    let groups: Vec<StrokeGroupEntry> = StrokeGroup::ALL
        .iter()
        .map(|&group| StrokeGroupEntry {
            group,
            strokes: group.strokes().iter().map(|s| s.name()).collect(),
        })
        .collect();
    HttpResponse::Ok().json(groups)
}

/// Roster in creation order.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(&g.players)
}

/// Add a player by name.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let player = match g.add_player(&body.name) {
        Ok(p) => p.clone(),
        Err(e) => return tracker_error(&e),
    };
    state.saver.save_players(&g.players);
    HttpResponse::Ok().json(player)
}

/// Delete a player. Their matches and points stay as they are.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_player(path.id) {
        Ok(removed) => {
            log::info!("Deleted player {:?}", removed.name);
            state.saver.save_players(&g.players);
            HttpResponse::Ok().json(&g.players)
        }
        Err(e) => tracker_error(&e),
    }
}

/// Aggregate stats, per-match averages and match history for one player.
#[get("/api/players/{id}/profile")]
async fn api_player_profile(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.player_profile(path.id) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => tracker_error(&e),
    }
}

/// All matches, newest date first.
#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let list: Vec<MatchSummary> = g
        .matches_newest_first()
        .into_iter()
        .map(|m| MatchSummary::new(&g, m))
        .collect();
    HttpResponse::Ok().json(list)
}

/// Create a match: date, location, and two teams of two.
#[post("/api/matches")]
async fn api_create_match(state: AppState, body: Json<MatchSetup>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = match g.create_match(body.into_inner()) {
        Ok(m) => m.id,
        Err(e) => return tracker_error(&e),
    };
    saved_match_detail(&state, &g, id)
}

/// Match with its point log.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.match_by_id(path.id) {
        Some(m) => HttpResponse::Ok().json(MatchDetail::new(&g, m)),
        None => tracker_error(&TrackerError::MatchNotFound(path.id)),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_match(path.id) {
        Ok(removed) => {
            log::info!("Deleted match {} ({} points)", removed.id, removed.points.len());
            state.saver.save_matches(&g.matches);
            HttpResponse::NoContent().finish()
        }
        Err(e) => tracker_error(&e),
    }
}

/// Shared tail of the match-changing handlers: persist matches and return the match detail.
fn saved_match_detail(state: &AppData, g: &Tracker, id: MatchId) -> HttpResponse {
    state.saver.save_matches(&g.matches);
    match g.match_by_id(id) {
        Some(m) => HttpResponse::Ok().json(MatchDetail::new(g, m)),
        None => tracker_error(&TrackerError::MatchNotFound(id)),
    }
}

/// Record the next point (player, result, stroke).
#[post("/api/matches/{id}/points")]
async fn api_record_point(state: AppState, path: Path<MatchPath>, body: Json<PointDraft>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.record_point(path.id, body.into_inner()) {
        return tracker_error(&e);
    }
    saved_match_detail(&state, &g, path.id)
}

/// Replace the last recorded point.
#[put("/api/matches/{id}/points/last")]
async fn api_edit_last_point(state: AppState, path: Path<MatchPath>, body: Json<PointDraft>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.edit_last_point(path.id, body.into_inner()) {
        return tracker_error(&e);
    }
    saved_match_detail(&state, &g, path.id)
}

/// End the match with its set scores; no more points can be recorded afterwards.
#[post("/api/matches/{id}/finish")]
async fn api_finish_match(state: AppState, path: Path<MatchPath>, body: Json<FinishMatchBody>) -> HttpResponse {
    let mut g = match state.tracker.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.finish_match(path.id, &body.sets) {
        return tracker_error(&e);
    }
    saved_match_detail(&state, &g, path.id)
}

/// One player's W/UE/FE counts and top strokes within a match.
#[get("/api/matches/{id}/players/{player_id}/stats")]
async fn api_match_player_stats(state: AppState, path: Path<MatchPlayerPath>) -> HttpResponse {
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.match_player_stats(path.id, path.player_id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => tracker_error(&e),
    }
}

/// Download one of the CSV reports: `players`, `matches` or `points`.
#[get("/api/export/{kind}")]
async fn api_export(state: AppState, path: Path<ExportPath>) -> HttpResponse {
    let kind = match ReportKind::from_slug(&path.kind) {
        Some(k) => k,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Unknown report" })),
    };
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let csv = match kind.build(&g.players, &g.matches).to_csv() {
        Ok(csv) => csv,
        Err(e) => {
            log::error!("Export {} failed: {}", kind.file_name(), e);
            return HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }));
        }
    };
    log::info!("Exported {}", kind.file_name());
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", kind.file_name()),
        ))
        .body(csv)
}

/// Current screen for this browser, falling back if its entity was deleted.
#[get("/api/view")]
async fn api_get_view(state: AppState, session: Session) -> HttpResponse {
    let view = session
        .get::<View>(VIEW_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();
    let g = match state.tracker.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(view.resolve(&g))
}

/// Navigate to another screen.
#[put("/api/view")]
async fn api_set_view(state: AppState, session: Session, body: Json<View>) -> HttpResponse {
    let view = {
        let g = match state.tracker.read() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        body.into_inner().resolve(&g)
    };
    if let Err(e) = session.insert(VIEW_SESSION_KEY, view) {
        return HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }));
    }
    HttpResponse::Ok().json(view)
}

/// Cookie sessions holding the current screen.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

/// Register every API route. The caller provides `Data<AppData>` and the session middleware.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_strokes)
        .service(api_list_players)
        .service(api_add_player)
        .service(api_delete_player)
        .service(api_player_profile)
        .service(api_list_matches)
        .service(api_create_match)
        .service(api_get_match)
        .service(api_delete_match)
        .service(api_record_point)
        .service(api_edit_last_point)
        .service(api_finish_match)
        .service(api_match_player_stats)
        .service(api_export)
        .service(api_get_view)
        .service(api_set_view);
}
