use rusty_library_lending::{
    adapters::{
        mock::{
            BorrowRecordRepository as InMemoryBorrowRecordRepository,
            BookRepository as InMemoryBookRepository, PaymentGateway as MockPaymentGateway,
        },
        postgres::{PostgresBookRepository, PostgresBorrowRecordRepository, run_migrations},
    },
    api::{AppState, create_router},
    application::ServiceDependencies,
    config::{Config, StorageBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rusty_library_lending=debug,tower_http=debug,axum=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let service_deps = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Database URL: {}", config.redacted_database_url());

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(config.collaborator_timeout)
                .connect(&config.database_url)
                .await?;

            run_migrations(&pool).await?;

            ServiceDependencies::new(
                Arc::new(PostgresBookRepository::new(pool.clone())),
                Arc::new(PostgresBorrowRecordRepository::new(pool)),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            ServiceDependencies::new(
                Arc::new(InMemoryBookRepository::new()),
                Arc::new(InMemoryBorrowRecordRepository::new()),
            )
        }
    }
    .with_collaborator_timeout(config.collaborator_timeout);

    // No real processor is wired in; every charge is approved and nothing is kept
    let payment_gateway = Arc::new(MockPaymentGateway::approving());

    let app_state = Arc::new(AppState {
        service_deps,
        payment_gateway,
    });

    let app = create_router(app_state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
