//! Padel tracker: library with models, statistics, CSV exports, storage and the HTTP API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod storage;

pub use config::Config;
pub use logic::{calc_stats, per_match_average, ExportError, PlayerProfile, PointStats, ReportKind, Table};
pub use models::{
    parse_set_score, MatchId, MatchSetup, PadelMatch, Player, PlayerId, Point, PointDraft, PointResult,
    SetEntry, Stroke, StrokeGroup, Tracker, TrackerError, View,
};
pub use storage::{load_tracker, FileStore, KeyValueStore, MemoryStore, Saver, StorageError};
