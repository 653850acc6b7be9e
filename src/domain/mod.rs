//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Comment, CommentId, ContentName, PostPayload};
pub use errors::{MigrationError, MigrationResult};
pub use ports::{CommentSourcePort, FileFetcherPort, PostDestinationPort};
