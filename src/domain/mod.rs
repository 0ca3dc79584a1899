pub mod adapters;
pub mod models;

pub use models::{HeadingStructure, MetricKind, PageRecord, ScoreBreakdownEntry, ScoreReport};
