//! HTTP handlers

pub mod cron;
pub mod health;
pub mod sections;
pub mod utilization;
pub mod warehouses;

use crate::error::ApiError;
use wms_core::domain::GroupId;

/// Path identifiers are case-insensitive ("a" and "A" name the same warehouse).
pub(crate) fn parse_letter(raw: &str) -> Result<GroupId, ApiError> {
    GroupId::parse(&raw.to_ascii_uppercase()).map_err(ApiError::from)
}
