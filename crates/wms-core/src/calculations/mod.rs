//! Utilization calculations: section aggregation and daily series.

pub mod aggregator;
pub mod series;

pub use aggregator::{KindBreakdown, Scope, StatusMap, UtilizationStats};
pub use series::build_daily_series;
