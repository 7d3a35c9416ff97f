// ============================================================================
// WMS Core - Warehouse Entity
// File: crates/wms-core/src/domain/warehouse.rs
// Description: Warehouse (section group) entity and its identifier
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;
use wms_shared::constants::{MAX_WAREHOUSE_NAME_LENGTH, MIN_WAREHOUSE_NAME_LENGTH};

/// Warehouse identifier: one or more uppercase ASCII letters ("A", "AB").
///
/// Identifiers of coexisting warehouses must not be prefixes of one another,
/// see [`GroupId::overlaps`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let letter = raw.trim();
        if letter.is_empty() || !letter.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(letter.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when either identifier is a prefix of the other.
    pub fn overlaps(&self, other: &GroupId) -> bool {
        self.0.starts_with(&other.0) || other.0.starts_with(&self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GroupId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseKind {
    Indoor,
    Outdoor,
}

impl WarehouseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "indoor" => Some(Self::Indoor),
            "outdoor" => Some(Self::Outdoor),
            _ => None,
        }
    }
}

/// Warehouse entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    pub letter: GroupId,
    pub name: String,
    pub kind: WarehouseKind,
    pub last_modified: DateTime<Utc>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn new(new: &NewWarehouse) -> Result<Self, DomainError> {
        new.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        let letter = GroupId::parse(&new.letter)?;
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError("Warehouse name must not be blank".to_string()));
        }
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            letter,
            name: name.to_string(),
            kind: new.kind,
            last_modified: now,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_modified = at;
        self.updated_at = at;
    }
}

/// Warehouse creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewWarehouse {
    #[validate(length(min = 1, max = 8, message = "Warehouse letter must be between 1 and 8 characters"))]
    pub letter: String,

    #[validate(length(min = MIN_WAREHOUSE_NAME_LENGTH, max = MAX_WAREHOUSE_NAME_LENGTH, message = "Warehouse name must be between 1 and 100 characters"))]
    pub name: String,

    pub kind: WarehouseKind,

    /// Initial section count; clamped by the service.
    pub sections: Option<u32>,
}
