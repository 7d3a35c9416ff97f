// ============================================================================
// WMS Core - Section Entity
// File: crates/wms-core/src/domain/section.rs
// Description: Storage section, its key, and the occupied/available toggle
// ============================================================================

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

use super::warehouse::GroupId;
use crate::error::DomainError;
use wms_shared::constants::SECTIONS_PER_ROW;

static SECTION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)([0-9]+)$").expect("static section key pattern"));

/// Section status. Occupied sections count as utilized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Occupied,
    Available,
}

impl SectionStatus {
    /// Single click flips the state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Occupied => Self::Available,
            Self::Available => Self::Occupied,
        }
    }

    pub fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Occupied => "occupied",
            Self::Available => "available",
        }
    }

    /// Accepts the legacy color names: red is occupied, green is available.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "occupied" | "red" => Some(Self::Occupied),
            "available" | "green" => Some(Self::Available),
            _ => None,
        }
    }
}

/// Composite section key: warehouse identifier plus 1-based section number ("A1").
///
/// Serialized as its string form so it can key JSON maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionKey {
    pub group: GroupId,
    pub number: u32,
}

impl SectionKey {
    pub fn new(group: GroupId, number: u32) -> Self {
        Self { group, number }
    }

    /// Split "AB12" into group "AB" and number 12. The whole letter run is the
    /// group, so "AB1" never belongs to "A".
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let caps = SECTION_KEY
            .captures(raw)
            .ok_or_else(|| DomainError::InvalidSectionKey(raw.to_string()))?;
        let group = GroupId::parse(&caps[1])?;
        let number: u32 = caps[2]
            .parse()
            .map_err(|_| DomainError::InvalidSectionKey(raw.to_string()))?;
        if number == 0 {
            return Err(DomainError::InvalidSectionKey(raw.to_string()));
        }
        Ok(Self { group, number })
    }

    pub fn belongs_to(&self, group: &GroupId) -> bool {
        &self.group == group
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.group, self.number)
    }
}

impl TryFrom<String> for SectionKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SectionKey> for String {
    fn from(key: SectionKey) -> Self {
        key.to_string()
    }
}

/// Grid cell derived from a section's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub column: u32,
    pub row: u32,
}

impl GridPosition {
    pub fn from_position(position: i32) -> Self {
        let position = position.max(0) as u32;
        let width = SECTIONS_PER_ROW as u32;
        Self {
            column: position % width,
            row: position / width,
        }
    }
}

/// Section entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub key: SectionKey,
    pub status: SectionStatus,
    pub position: i32,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// New sections start available.
    pub fn new(warehouse_id: Uuid, key: SectionKey, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            warehouse_id,
            key,
            status: SectionStatus::Available,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn grid_position(&self) -> GridPosition {
        GridPosition::from_position(self.position)
    }
}
