//! PostgreSQL repository implementations

pub mod warehouse_repo_impl;
pub mod section_repo_impl;
pub mod utilization_repo_impl;

pub use warehouse_repo_impl::PgWarehouseRepository;
pub use section_repo_impl::PgSectionRepository;
pub use utilization_repo_impl::PgUtilizationRepository;
