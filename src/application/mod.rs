//! Application layer with transformation services and use cases.

/// Comment transformation services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{AttachmentExtractor, DirectiveParser, PostComposer, ResourceCache};
pub use use_cases::{
    FetchCommentsUseCase, MigrateCommentUseCase, MigrationOptions, MigrationReport,
    RunMigrationUseCase,
};
