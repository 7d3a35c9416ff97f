//! Dashboard state, undo buffer, and request tokens.

pub mod dashboard;
pub mod request;
pub mod undo;

pub use dashboard::{reduce, Action, DashboardState, HistoryView, RemovedWarehouse, WarehouseEntry};
pub use request::{RequestToken, RequestTracker};
pub use undo::{UndoMiss, UndoSlot};
