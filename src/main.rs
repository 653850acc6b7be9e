use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use issue2misskey::application::services::PostComposer;
use issue2misskey::application::{
    FetchCommentsUseCase, MigrateCommentUseCase, MigrationOptions, RunMigrationUseCase,
};
use issue2misskey::domain::ports::{CommentSourcePort, FileFetcherPort, PostDestinationPort};
use issue2misskey::infrastructure::config::{
    RepoRef, resolve_github_token, resolve_misskey_token,
};
use issue2misskey::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, DryRunCommentSource, DryRunDestination, GithubClient,
    HttpFileFetcher, MisskeyClient,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn create_driver(args: &CliArgs, config: &AppConfig) -> Result<RunMigrationUseCase> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let repo = RepoRef::parse(&args.repository)?;

    let github_token = resolve_github_token(
        args.personal_access_token.as_deref(),
        args.github_token.as_deref(),
        |name| std::env::var(name).ok(),
    )?;

    let github: Arc<dyn CommentSourcePort> = Arc::new(GithubClient::new(
        &config.github_api_base,
        repo,
        args.issue,
        &github_token,
        timeout,
    )?);
    let fetcher: Arc<dyn FileFetcherPort> = Arc::new(HttpFileFetcher::new(
        &config.source_origin,
        Some(github_token),
        timeout,
    )?);

    let (source, destination): (Arc<dyn CommentSourcePort>, Arc<dyn PostDestinationPort>) =
        if args.dry_run {
            info!("Dry run enabled, nothing will be posted or deleted");
            (
                Arc::new(DryRunCommentSource::new(github)),
                Arc::new(DryRunDestination::new()),
            )
        } else {
            let token = resolve_misskey_token(args.misskey_token.as_deref())?;
            (
                github,
                Arc::new(MisskeyClient::new(&args.misskey_server, token, timeout)?),
            )
        };

    let mut composer = PostComposer::new();
    if let Some(visibility) = config.default_visibility {
        composer = composer.with_default("visibility", visibility.as_str());
    }

    let options = MigrationOptions {
        max_attempts: if args.dry_run { 1 } else { config.max_attempts },
        single_pass: args.dry_run,
    };

    Ok(RunMigrationUseCase::new(
        FetchCommentsUseCase::new(Arc::clone(&source), config.per_page),
        MigrateCommentUseCase::new(source, destination, composer),
        fetcher,
        options,
    ))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let mut config = ConfigLoader::new().load(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(
        version = issue2misskey::VERSION,
        repository = %args.repository,
        issue = args.issue,
        "Starting issue2misskey"
    );

    let driver = create_driver(&args, &config)?;

    match driver.execute().await {
        Ok(report) => {
            info!(migrated = report.migrated, "All comments migrated");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_budget_exhausted() => {
            warn!(error = %e, "New comments kept arriving, giving up for now");
            Ok(ExitCode::from(e.exit_code()))
        }
        Err(e) => {
            error!(error = %e, "Migration aborted");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
