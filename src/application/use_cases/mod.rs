//! Use case implementations.

mod fetch_comments_use_case;
mod migrate_comment_use_case;
mod run_migration_use_case;

pub use fetch_comments_use_case::{DEFAULT_PER_PAGE, FetchCommentsUseCase};
pub use migrate_comment_use_case::{MigrateCommentUseCase, MigrationSession};
pub use run_migration_use_case::{
    DEFAULT_MAX_ATTEMPTS, MigrationOptions, MigrationReport, RunMigrationUseCase,
};
