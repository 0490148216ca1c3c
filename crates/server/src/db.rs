use axum::extract::FromRef;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use tokio::sync::OnceCell;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}

/// Pool created lazily; no connections are opened until the first query, so
/// the pool is not bound to whichever runtime happened to create it.
static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Create a new database connection pool from environment variables.
pub fn create_pool() -> Result<Pool<Postgres>, sqlx::Error> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Pool used by Dioxus server functions. Migrations run at most once per
/// process; REST handlers get their pool from `AppState` instead.
pub async fn get_db() -> Result<&'static Pool<Postgres>, sqlx::Error> {
    let pool = match POOL.get() {
        Some(pool) => pool,
        None => {
            let created = create_pool()?;
            POOL.get_or_init(|| created)
        }
    };

    MIGRATED
        .get_or_try_init(|| async {
            run_migrations(pool).await.map_err(|e| {
                tracing::error!(error = %e, "database migrations failed");
                sqlx::Error::Migrate(Box::new(e))
            })
        })
        .await?;

    Ok(pool)
}
