use std::process::ExitCode;

use clap::Parser;
use engine::FileSessionStore;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use context::Context;
use settings::Settings;

mod cli;
mod commands;
mod context;
mod error;
mod prompt;
mod render;
mod settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.database_url.clone())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "donors={level},engine={level}",
            level = settings.app.level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let db = connect_db(&settings.database.url).await?;
    let engine = engine::Engine::builder().database(db).build().await?;
    let ctx = Context::new(
        engine,
        Box::new(FileSessionStore::new(&settings.session.path)),
        settings.auth.require_login,
    );

    match commands::run(&ctx, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("Error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn connect_db(database_url: &str) -> error::Result<sea_orm::DatabaseConnection> {
    tracing::info!("connecting to {database_url}");
    let database = sea_orm::Database::connect(database_url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
