//! # WMS Core
//! 
//! Domain entities, utilization calculations, dashboard state, services,
//! and repository traits for the warehouse utilization application.

pub mod domain;
pub mod calculations;
pub mod state;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
