//! Wiring of adapters, domain service and use cases

use anyhow::Context;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::application::auth::{LoginUserUseCase, RegisterUserUseCase};
use crate::domain::auth::ports::{SessionStore, UserRepository};
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Password;
use crate::infrastructure::config::{Config, DatabaseConfig, RedisConfig, SecurityConfig};
use crate::infrastructure::memory::{InMemorySessionStore, InMemoryUserRepository};
use crate::infrastructure::persistence::postgres::PostgresUserRepository;
use crate::infrastructure::persistence::redis::RedisSessionStore;
use crate::infrastructure::security::Argon2PasswordHasher;

/// Fully wired authentication components
pub struct AuthContext {
  pub auth_service: Arc<AuthService>,
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  /// Shared with request handlers that read or clear sessions
  pub session_store: Arc<dyn SessionStore>,
}

impl AuthContext {
  /// Wires the service and use cases around the given adapters
  pub fn build(
    user_repo: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
    security: &SecurityConfig,
  ) -> anyhow::Result<Self> {
    anyhow::ensure!(
      security.password_min_length <= Password::MAX_LENGTH,
      "security.password_min_length is {} but passwords are limited to {} bytes",
      security.password_min_length,
      Password::MAX_LENGTH
    );

    let password_hasher = Arc::new(
      Argon2PasswordHasher::with_params(security.argon2_params())
        .context("Failed to create password hasher")?,
    );

    let auth_service = Arc::new(AuthService::new(
      user_repo,
      password_hasher,
      session_store.clone(),
    ));

    Ok(Self {
      register_use_case: Arc::new(RegisterUserUseCase::new(
        auth_service.clone(),
        security.password_policy(),
      )),
      login_use_case: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      auth_service,
      session_store,
    })
  }

  /// Wires everything against process memory; nothing outlives the process
  pub fn in_memory(security: &SecurityConfig) -> anyhow::Result<Self> {
    Self::build(
      Arc::new(InMemoryUserRepository::new()),
      Arc::new(InMemorySessionStore::new()),
      security,
    )
  }

  /// Connects to PostgreSQL (and Redis when configured) and wires everything
  ///
  /// Without a `redis` section sessions are kept in process memory.
  pub async fn connect(config: &Config) -> anyhow::Result<Self> {
    let pool = connect_database(&config.database).await?;
    run_migrations(&pool).await?;

    let ttl_seconds = config.session.ttl_seconds;
    let session_store: Arc<dyn SessionStore> = match &config.redis {
      Some(redis_config) => {
        let redis = connect_redis(redis_config).await?;
        Arc::new(RedisSessionStore::new(redis, ttl_seconds))
      }
      None => {
        tracing::warn!("Redis not configured, sessions are kept in process memory");
        Arc::new(InMemorySessionStore::with_ttl(Duration::from_secs(
          ttl_seconds,
        )))
      }
    };

    Self::build(
      Arc::new(PostgresUserRepository::new(pool)),
      session_store,
      &config.security,
    )
  }

  /// Loads `.env` and configuration, then connects
  pub async fn from_env() -> anyhow::Result<Self> {
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    Self::connect(&config).await
  }
}

/// Creates the connection pool, bounded by the configured timeouts
pub async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
  tracing::info!("Connecting to database");

  let pool = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(&config.url),
  )
  .await
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds",
      config.connect_timeout_seconds
    )
  })?
  .context("Could not connect to database")?;

  tracing::info!("Database connection pool created");
  Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");
  Ok(())
}

/// Opens a Redis connection manager, bounded by the configured timeout
pub async fn connect_redis(config: &RedisConfig) -> anyhow::Result<ConnectionManager> {
  tracing::info!("Connecting to Redis");

  let client = redis::Client::open(config.url.clone()).context("Invalid Redis URL")?;

  let conn = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    client.get_connection_manager(),
  )
  .await
  .with_context(|| {
    format!(
      "Redis connection timed out after {} seconds",
      config.connect_timeout_seconds
    )
  })?
  .context("Could not connect to Redis")?;

  tracing::info!("Redis connection established");
  Ok(conn)
}
