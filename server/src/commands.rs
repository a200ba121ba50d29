use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, close, connect};
use products_reports::{
    hierarchy::{self, AuditSummary},
    reports::{self, TableCounts},
    seed::{self, SeededRecords},
};
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Reset,
}

/// Connects, runs `work`, and closes the connection whatever the outcome.
async fn with_connection<T, F, Fut>(config: &AppConfig, work: F) -> Result<T>
where
    F: FnOnce(DbPool) -> Fut,
    Fut: std::future::Future<Output = (DbPool, Result<T>)>,
{
    let db = connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    let (db, outcome) = work(db).await;
    let closed = close(db).await;
    let value = outcome?;
    closed.context("failed to close the database connection")?;
    Ok(value)
}

pub async fn migrate(config: &AppConfig, action: MigrateAction) -> Result<()> {
    with_connection(config, |db| async move {
        let outcome = match action {
            MigrateAction::Up => Migrator::up(&db, None).await,
            MigrateAction::Down => Migrator::down(&db, Some(1)).await,
            MigrateAction::Reset => Migrator::reset(&db).await,
        }
        .with_context(|| format!("migrate {action:?} failed"));
        if outcome.is_ok() {
            info!(?action, "migrations finished");
        }
        (db, outcome)
    })
    .await
}

pub async fn seed(config: &AppConfig) -> Result<SeededRecords> {
    with_connection(config, |db| async move {
        let outcome = seed_on(&db, config).await;
        (db, outcome)
    })
    .await
}

async fn seed_on(db: &DbPool, config: &AppConfig) -> Result<SeededRecords> {
    if config.auto_migrate {
        Migrator::up(db, None)
            .await
            .context("applying pending migrations failed")?;
    }
    let seeded = seed::run(db, &config.seed).await.context("seeding failed")?;
    info!(
        sales = seeded.sales.len(),
        reused = seeded.reused_sales.len(),
        customers = seeded.customers.len(),
        reports = seeded.reports.len(),
        visits = seeded.visits.len(),
        comments = seeded.comments.len(),
        "seed summary"
    );
    Ok(seeded)
}

pub async fn check(config: &AppConfig) -> Result<(AuditSummary, TableCounts)> {
    with_connection(config, |db| async move {
        let outcome = async {
            let summary = hierarchy::audit(&db)
                .await
                .context("sales hierarchy is inconsistent")?;
            let counts = reports::counts(&db).await?;
            Ok::<_, anyhow::Error>((summary, counts))
        }
        .await;
        (db, outcome)
    })
    .await
}
