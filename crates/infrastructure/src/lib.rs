//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_employee_repository;
mod in_memory_reference_data_repository;
mod postgres_employee_repository;
mod postgres_reference_data_repository;

pub use in_memory_employee_repository::InMemoryEmployeeRepository;
pub use in_memory_reference_data_repository::InMemoryReferenceDataRepository;
pub use postgres_employee_repository::PostgresEmployeeRepository;
pub use postgres_reference_data_repository::PostgresReferenceDataRepository;
