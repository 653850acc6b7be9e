//! Migration driver.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::fetch_comments_use_case::FetchCommentsUseCase;
use super::migrate_comment_use_case::{MigrateCommentUseCase, MigrationSession};
use crate::domain::entities::Comment;
use crate::domain::errors::{MigrationError, MigrationResult};
use crate::domain::ports::FileFetcherPort;

/// Default number of passes before giving up on a source that never drains.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Driver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Passes allowed before comments still present count as a failure.
    pub max_attempts: u32,
    /// Stop successfully after the first pass (dry run).
    pub single_pass: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            single_pass: false,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Number of non-empty batches migrated.
    pub passes: u32,
    /// Number of comments migrated.
    pub migrated: usize,
    /// Number of downloads started.
    pub downloads: usize,
    /// Number of files uploaded.
    pub uploads: usize,
}

enum RunState {
    Fetching,
    Migrating(Vec<Comment>),
    Done,
}

/// Repeats fetch-then-migrate until the source is empty or the attempt budget runs out.
pub struct RunMigrationUseCase {
    fetch: FetchCommentsUseCase,
    migrate: MigrateCommentUseCase,
    fetcher: Arc<dyn FileFetcherPort>,
    options: MigrationOptions,
}

impl RunMigrationUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        fetch: FetchCommentsUseCase,
        migrate: MigrateCommentUseCase,
        fetcher: Arc<dyn FileFetcherPort>,
        options: MigrationOptions,
    ) -> Self {
        Self {
            fetch,
            migrate,
            fetcher,
            options: MigrationOptions {
                max_attempts: options.max_attempts.max(1),
                ..options
            },
        }
    }

    /// Runs the migration with a fresh session.
    ///
    /// Comments are migrated strictly in fetch order; the first error aborts
    /// the whole run.
    ///
    /// # Errors
    /// Returns the first stage failure, or `RetryBudgetExhausted` if comments
    /// remain after `max_attempts` passes.
    pub async fn execute(&self) -> MigrationResult<MigrationReport> {
        let mut session = MigrationSession::new(Arc::clone(&self.fetcher));
        let mut report = MigrationReport::default();
        let mut state = RunState::Fetching;

        loop {
            state = match state {
                RunState::Fetching => {
                    let comments = self.fetch.execute().await?;
                    if comments.is_empty() {
                        debug!("No outstanding comments");
                        RunState::Done
                    } else if report.passes >= self.options.max_attempts {
                        error!(
                            attempts = report.passes,
                            remaining = comments.len(),
                            "Comments still remain after the last allowed pass"
                        );
                        return Err(MigrationError::RetryBudgetExhausted {
                            attempts: report.passes,
                        });
                    } else {
                        RunState::Migrating(comments)
                    }
                }
                RunState::Migrating(batch) => {
                    report.passes += 1;
                    info!(
                        attempt = report.passes,
                        count = batch.len(),
                        "Migrating batch"
                    );

                    for comment in &batch {
                        self.migrate.execute(comment, &mut session).await?;
                        report.migrated += 1;
                    }

                    if self.options.single_pass {
                        info!("Single pass requested, not checking for further comments");
                        RunState::Done
                    } else {
                        RunState::Fetching
                    }
                }
                RunState::Done => break,
            };
        }

        report.downloads = session.cache.downloads();
        report.uploads = session.uploads.len();

        info!(
            passes = report.passes,
            migrated = report.migrated,
            downloads = report.downloads,
            uploads = report.uploads,
            "Migration finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::PostComposer;
    use crate::domain::entities::CommentId;
    use crate::domain::ports::mocks::{
        Journal, MockCommentSource, MockFileFetcher, MockPostDestination,
    };
    use crate::domain::ports::{CommentSourcePort, PostDestinationPort};

    fn driver(
        source: Arc<MockCommentSource>,
        destination: Arc<MockPostDestination>,
        fetcher: Arc<MockFileFetcher>,
        options: MigrationOptions,
    ) -> RunMigrationUseCase {
        let source: Arc<dyn CommentSourcePort> = source;
        let destination: Arc<dyn PostDestinationPort> = destination;
        RunMigrationUseCase::new(
            FetchCommentsUseCase::new(source.clone(), 100),
            MigrateCommentUseCase::new(source, destination, PostComposer::new()),
            fetcher,
            options,
        )
    }

    fn fetcher() -> Arc<MockFileFetcher> {
        Arc::new(MockFileFetcher::new().with_file("https://host/a.png", b"png-a"))
    }

    #[tokio::test]
    async fn test_drains_source() {
        let source = Arc::new(MockCommentSource::numbered(3));
        let destination = Arc::new(MockPostDestination::new());
        let use_case = driver(
            source.clone(),
            destination.clone(),
            fetcher(),
            MigrationOptions::default(),
        );

        let report = use_case.execute().await.unwrap();

        assert_eq!(report.passes, 1);
        assert_eq!(report.migrated, 3);
        assert_eq!(source.remaining(), 0);
        assert_eq!(
            source.deleted(),
            vec![CommentId(1), CommentId(2), CommentId(3)]
        );
        let texts: Vec<_> = destination
            .posts()
            .iter()
            .map(|p| p.text().unwrap_or_default().to_string())
            .collect();
        assert_eq!(texts, vec!["comment 1", "comment 2", "comment 3"]);
    }

    #[tokio::test]
    async fn test_empty_source_is_done() {
        let source = Arc::new(MockCommentSource::new(Vec::new()));
        let destination = Arc::new(MockPostDestination::new());
        let use_case = driver(
            source.clone(),
            destination.clone(),
            fetcher(),
            MigrationOptions::default(),
        );

        let report = use_case.execute().await.unwrap();

        assert_eq!(report, MigrationReport::default());
        assert!(destination.posts().is_empty());
    }

    #[tokio::test]
    async fn test_all_pages_fetched_before_migration() {
        let journal = Journal::default();
        let source = Arc::new(MockCommentSource::numbered(101).with_journal(journal.clone()));
        let destination = Arc::new(MockPostDestination::new().with_journal(journal.clone()));
        let use_case = driver(
            source.clone(),
            destination,
            fetcher(),
            MigrationOptions::default(),
        );

        let report = use_case.execute().await.unwrap();

        let journal = journal.lock().clone();
        assert_eq!(journal[0], "list:1");
        assert_eq!(journal[1], "list:2");
        assert_eq!(journal[2], "post:comment 1");
        assert_eq!(report.migrated, 101);
    }

    #[tokio::test]
    async fn test_never_draining_source_exhausts_budget() {
        let source = Arc::new(MockCommentSource::numbered(2).never_draining());
        let destination = Arc::new(MockPostDestination::new());
        let use_case = driver(
            source.clone(),
            destination.clone(),
            fetcher(),
            MigrationOptions {
                max_attempts: 3,
                single_pass: false,
            },
        );

        let result = use_case.execute().await;

        assert!(matches!(
            result,
            Err(MigrationError::RetryBudgetExhausted { attempts: 3 })
        ));
        assert_eq!(destination.posts().len(), 6);
        assert_eq!(source.page_requests().len(), 4);
    }

    #[tokio::test]
    async fn test_single_pass_stops_after_one_batch() {
        let source = Arc::new(MockCommentSource::numbered(2).never_draining());
        let destination = Arc::new(MockPostDestination::new());
        let use_case = driver(
            source.clone(),
            destination.clone(),
            fetcher(),
            MigrationOptions {
                max_attempts: 1,
                single_pass: true,
            },
        );

        let report = use_case.execute().await.unwrap();

        assert_eq!(report.passes, 1);
        assert_eq!(destination.posts().len(), 2);
        assert_eq!(source.page_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_budget_is_raised_to_one() {
        let source = Arc::new(MockCommentSource::numbered(1));
        let destination = Arc::new(MockPostDestination::new());
        let use_case = driver(
            source,
            destination,
            fetcher(),
            MigrationOptions {
                max_attempts: 0,
                single_pass: false,
            },
        );

        assert_eq!(use_case.execute().await.unwrap().passes, 1);
    }

    #[tokio::test]
    async fn test_shared_locator_across_comments_downloads_once() {
        let source = Arc::new(MockCommentSource::new(vec![
            Comment::new(1, "first\n![x](https://host/a.png)"),
            Comment::new(2, "second\n![y](https://host/a.png)"),
        ]));
        let destination = Arc::new(MockPostDestination::new());
        let fetcher = fetcher();
        let use_case = driver(
            source,
            destination.clone(),
            fetcher.clone(),
            MigrationOptions::default(),
        );

        let report = use_case.execute().await.unwrap();

        assert_eq!(fetcher.calls_for("https://host/a.png"), 1);
        assert_eq!(report.downloads, 1);
        assert_eq!(report.uploads, 1);
        let posts = destination.posts();
        assert_eq!(posts[0].file_ids(), posts[1].file_ids());
    }

    #[tokio::test]
    async fn test_error_aborts_remaining_comments() {
        let source = Arc::new(MockCommentSource::new(vec![
            Comment::new(1, "ok"),
            Comment::new(2, "![x](https://host/missing.png)"),
            Comment::new(3, "never reached"),
        ]));
        let destination = Arc::new(MockPostDestination::new());
        let use_case = driver(
            source.clone(),
            destination.clone(),
            fetcher(),
            MigrationOptions::default(),
        );

        let result = use_case.execute().await;

        assert!(matches!(result, Err(MigrationError::Download { .. })));
        assert_eq!(source.deleted(), vec![CommentId(1)]);
        assert_eq!(destination.posts().len(), 1);
        assert_eq!(source.remaining(), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_is_fatal_after_post() {
        let journal = Journal::default();
        let source = Arc::new(
            MockCommentSource::numbered(2)
                .failing_deletes()
                .with_journal(journal.clone()),
        );
        let destination = Arc::new(MockPostDestination::new().with_journal(journal.clone()));
        let use_case = driver(source, destination, fetcher(), MigrationOptions::default());

        let result = use_case.execute().await;

        assert!(matches!(
            result,
            Err(MigrationError::CommentDeletion {
                comment_id: CommentId(1),
                ..
            })
        ));
        assert_eq!(
            *journal.lock(),
            vec!["list:1", "post:comment 1", "delete:1"]
        );
    }
}
