//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Invalid warehouse identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid section key: {0}")]
    InvalidSectionKey(String),

    #[error("Warehouse identifier {letter} conflicts with existing warehouse {existing}")]
    IdentifierConflict { letter: String, existing: String },

    #[error("Warehouse {0} has no complete row to remove")]
    NoCompleteRow(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Undo window expired for warehouse {0}")]
    UndoExpired(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
