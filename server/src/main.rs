use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use server::{
    commands::{self, MigrateAction},
    config::AppConfig,
    finish,
};

#[derive(Parser, Debug)]
#[command(name = "daily-report", version, about = "Sales daily report backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Seed demo fixture data.
    Seed,
    /// Audit the sales hierarchy and print row counts.
    Check,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
    /// Rollback every migration.
    Reset,
}

impl From<MigrateCommand> for MigrateAction {
    fn from(value: MigrateCommand) -> Self {
        match value {
            MigrateCommand::Up => MigrateAction::Up,
            MigrateCommand::Down => MigrateAction::Down,
            MigrateCommand::Reset => MigrateAction::Reset,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    if let Err(err) = init_tracing(ObsConfig::default()) {
        eprintln!("failed to initialise tracing: {err:#}");
        return ExitCode::FAILURE;
    }
    let cli = Cli::parse();
    finish(run(cli.command).await)
}

async fn run(command: Command) -> Result<()> {
    let config = AppConfig::load()?;
    match command {
        Command::Migrate(action) => commands::migrate(&config, action.into()).await,
        Command::Seed => commands::seed(&config).await.map(|_| ()),
        Command::Check => {
            let (summary, counts) = commands::check(&config).await?;
            println!(
                "sales={} customers={} daily_reports={} visit_records={} comments={}",
                counts.sales,
                counts.customers,
                counts.daily_reports,
                counts.visit_records,
                counts.comments
            );
            println!(
                "hierarchy ok: roots={} max_depth={}",
                summary.roots, summary.max_depth
            );
            Ok(())
        }
    }
}
