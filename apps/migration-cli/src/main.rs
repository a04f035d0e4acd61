use std::env;

use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database};
use tracing::error;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Clone, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "GameShelf database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(
        short,
        long,
        value_enum,
        default_value = "postgres",
        help = "Database type: postgres, sqlite-file"
    )]
    db: Db,
}

fn must_var(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("Required environment variable '{name}' is not set"))
}

/// Owner-level connection URL; migrations need DDL rights the app role lacks.
fn database_url(env: &Env, db: &Db) -> Result<String, String> {
    match db {
        Db::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = match env {
                Env::Prod => must_var("PROD_DB")?,
                Env::Test => {
                    let name = must_var("TEST_DB")?;
                    if !name.ends_with("_test") {
                        return Err(format!(
                            "Test environment requires database name to end with '_test', but got: '{name}'"
                        ));
                    }
                    name
                }
            };
            let user = must_var("GAMESHELF_OWNER_USER")?;
            let password = must_var("GAMESHELF_OWNER_PASSWORD")?;
            Ok(format!(
                "postgresql://{user}:{password}@{host}:{port}/{db_name}"
            ))
        }
        Db::SqliteFile => {
            let path = must_var("GAMESHELF_SQLITE_PATH")?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command {
        Command::Up => MigrationCommand::Up,
        Command::Down => MigrationCommand::Down,
        Command::Fresh => MigrationCommand::Fresh,
        Command::Reset => MigrationCommand::Reset,
        Command::Refresh => MigrationCommand::Refresh,
        Command::Status => MigrationCommand::Status,
    };

    let url = match database_url(&args.env, &args.db) {
        Ok(url) => url,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1).sqlx_logging(false);

    let conn = match Database::connect(opts).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "failed to connect");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, command).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
}
