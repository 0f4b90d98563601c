//! Testing utilities
//!
//! - [`TestDatabase`] - throwaway `PostgreSQL` database with migrations applied
//! - Re-exported `mockall` for the generated store mock

pub mod database;

pub use database::TestDatabase;

// Re-export mockall for test usage
pub use mockall;
