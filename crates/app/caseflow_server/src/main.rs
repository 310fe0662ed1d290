//! Caseflow API server binary.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server. Flags override the environment-derived
/// configuration (`BIND_ADDR`, `DATABASE_URL`, `JWT_SECRET`).
#[derive(Parser, Debug)]
#[command(
    name = "caseflow_server",
    about = "Caseflow CRM API server",
    version = caseflow_core::version()
)]
struct Args {
    /// Bind address, overriding `BIND_ADDR` (e.g. "0.0.0.0:8000").
    #[arg(long)]
    bind_addr: Option<String>,

    /// PostgreSQL connection URL, overriding `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,caseflow_api=debug,caseflow_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let mut config = caseflow_api::config::ApiConfig::from_env();
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!(
        bind_addr = %config.bind_addr,
        max_connections = args.max_connections,
        "starting caseflow_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    caseflow_api::migrate(&pool).await?;

    let state = caseflow_api::AppState {
        pool,
        config: config.clone(),
    };

    let app = caseflow_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
