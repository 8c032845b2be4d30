//! membership-status-job - one recalculation pass against PostgreSQL.
//!
//! Intended to be started by a scheduler. Prints the run summary as JSON on
//! stdout and exits non-zero if the run could not complete.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use membership_status_job::adapters::{
    PostgresMembershipRepository, PostgresMembershipTypeReader, PostgresStatusCatalog,
    RuleBasedStatusCalculator, SystemClock,
};
use membership_status_job::application::{ProcessMembershipsCommand, ProcessMembershipsHandler};
use membership_status_job::config::{AppConfig, ConfigError, LoggingConfig};
use membership_status_job::domain::membership::{MembershipJobError, RecalculationSummary};
use membership_status_job::ports::StatusCatalog;

#[derive(Debug, Error)]
enum JobError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Recalculation failed: {0}")]
    Recalculation(#[from] MembershipJobError),

    #[error("Failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load().and_then(|c| {
        c.validate()?;
        Ok(c)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    match run(&config).await {
        Ok(summary) => {
            if summary.has_failures() {
                tracing::warn!(failed = summary.failures.len(), "Run completed with failures");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Membership status job failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let fmt_layer = if logging.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    // stdout carries the JSON summary only
    tracing_subscriber::registry()
        .with(logging.env_filter())
        .with(fmt_layer)
        .init();
}

async fn run(config: &AppConfig) -> Result<RecalculationSummary, JobError> {
    let db = &config.database;
    let pool = db.pool_options().connect(db.connection_url()).await?;

    if db.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let catalog = PostgresStatusCatalog::new(pool.clone());
    let calculator = RuleBasedStatusCalculator::new(
        catalog.list().await.map_err(MembershipJobError::from)?,
    );

    let handler = ProcessMembershipsHandler::new(
        Arc::new(PostgresMembershipRepository::new(pool.clone())),
        Arc::new(catalog),
        Arc::new(PostgresMembershipTypeReader::new(pool.clone())),
        Arc::new(calculator),
        Arc::new(SystemClock),
    )
    .with_defaults(config.job.defaults());

    let request = config
        .job
        .request()
        .map_err(|e| JobError::Config(ConfigError::ValidationFailed(e)))?;
    let summary = handler.handle(ProcessMembershipsCommand::new(request)).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    pool.close().await;

    Ok(summary)
}
