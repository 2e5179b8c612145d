use comanda_server::{AppState, Config, DbService, api, common, db};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    common::logger::init_logger();

    let config = Config::from_env()?;
    tracing::info!("Starting comanda-server (env: {})", config.environment);

    let db_service = DbService::new(&config.database_path).await?;
    db::seed::seed_if_empty(&db_service.writer).await?;

    let state = AppState::new(&config, db_service);
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("comanda-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
