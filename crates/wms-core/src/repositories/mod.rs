//! Repository traits (ports)

pub mod warehouse_repository;
pub mod section_repository;
pub mod utilization_repository;

pub use warehouse_repository::WarehouseRepository;
pub use section_repository::SectionRepository;
pub use utilization_repository::UtilizationRepository;

#[cfg(test)]
pub use warehouse_repository::MockWarehouseRepository;
#[cfg(test)]
pub use section_repository::MockSectionRepository;
#[cfg(test)]
pub use utilization_repository::MockUtilizationRepository;
