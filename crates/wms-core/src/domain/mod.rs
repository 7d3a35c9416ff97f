//! # WMS Core - Domain Module
//! 
//! Domain entities for the warehouse utilization application.

pub mod warehouse;
pub mod section;
pub mod utilization;
pub mod time_range;

// Re-export all entities and enums
pub use warehouse::{GroupId, NewWarehouse, Warehouse, WarehouseKind};
pub use section::{GridPosition, Section, SectionKey, SectionStatus};
pub use utilization::{DailySample, DailyUtilization};
pub use time_range::{DateRange, TimeRange};
