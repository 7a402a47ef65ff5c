use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_store::api::router;
use todo_store::config::AppConfig;
use todo_store::db::{self, SCHEMA_VERSION, SqliteTodoStore, TodoStore};
use todo_store::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_store=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let pool = db::open_pool(&config.database_url).await?;

    let store = SqliteTodoStore::new(pool.clone()).with_seed(config.seed.clone());
    store.migrate(SCHEMA_VERSION).await?;
    info!("schema version {}", store.schema_version().await?);

    let state = AppState {
        db: pool,
        store: Arc::new(store),
    };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
