//! # WMS Infrastructure
//! 
//! PostgreSQL and in-memory implementations of the repository ports.

pub mod database;
pub mod memory;

pub use database::{
    create_pool, run_migrations, PgSectionRepository, PgUtilizationRepository, PgWarehouseRepository,
};
pub use memory::MemoryStore;
