//! Domain error types.

mod migration_error;

pub use migration_error::MigrationError;

/// Result alias for migration operations.
pub type MigrationResult<T> = Result<T, MigrationError>;
