use std::sync::Arc;

use crate::middleware::CronAuth;
use wms_core::repositories::{SectionRepository, UtilizationRepository, WarehouseRepository};
use wms_core::services::{HistoryService, SnapshotService, WarehouseService};

#[derive(Clone)]
pub struct AppState {
    pub warehouses: Arc<WarehouseService>,
    pub history: Arc<HistoryService>,
    pub snapshots: Arc<SnapshotService>,
    pub cron_auth: CronAuth,
}

impl AppState {
    pub fn new(
        warehouses: Arc<dyn WarehouseRepository>,
        sections: Arc<dyn SectionRepository>,
        utilization: Arc<dyn UtilizationRepository>,
        undo_window_ms: i64,
        cron_secret: Option<&str>,
    ) -> Self {
        Self {
            warehouses: Arc::new(WarehouseService::new(
                warehouses.clone(),
                sections.clone(),
                undo_window_ms,
            )),
            history: Arc::new(HistoryService::new(warehouses.clone(), utilization.clone())),
            snapshots: Arc::new(SnapshotService::new(warehouses, sections, utilization)),
            cron_auth: CronAuth::new(cron_secret),
        }
    }
}
