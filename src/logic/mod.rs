//! Derived views over the tracker: statistics and CSV exports.

pub mod export;
pub mod stats;

pub use export::{ExportError, ReportKind, Table};
pub use stats::{
    calc_stats, newest_first, per_match_average, MatchHistoryEntry, PlayerProfile, PointStats, ResultAverages,
    ResultTotals, TopStrokes, NO_STROKE,
};
