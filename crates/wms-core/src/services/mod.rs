//! Domain services (business logic)

pub mod history_service;
pub mod snapshot_service;
pub mod warehouse_service;

pub use history_service::{History, HistoryService};
pub use snapshot_service::{SnapshotReport, SnapshotService, WarehouseSnapshot};
pub use warehouse_service::{DeletedWarehouse, WarehouseOverview, WarehouseService};
