use clinicflow::api::router::api_router;
use clinicflow::api::types::ApiContext;
use clinicflow::config;
use clinicflow::db::open_database;
use clinicflow::seed::seed_demo_data;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinicflow=info,tower_http=info".into()),
        )
        .init();

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = open_database(&db_path)?;
    seed_demo_data(&conn)?;
    tracing::info!(path = %db_path.display(), "Database ready");

    let ctx = ApiContext::new(conn);
    let app = api_router(ctx);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "{} v{} listening", config::APP_NAME, config::APP_VERSION);

    axum::serve(listener, app).await?;
    Ok(())
}
