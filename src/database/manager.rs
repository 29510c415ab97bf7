use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the relational store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Record not found")]
    NotFound,

    #[error("Referenced driver does not exist")]
    UnknownDriver,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map a foreign-key violation (SQLSTATE 23503) to `UnknownDriver`
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23503") {
                return DatabaseError::UnknownDriver;
            }
        }
        DatabaseError::Sqlx(err)
    }
}

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS drivers (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        phone TEXT,
        address TEXT,
        license_no TEXT,
        license_expiry TEXT,
        aadhaar TEXT,
        profile_photo TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        assigned_vehicle TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS works (
        id BIGSERIAL PRIMARY KEY,
        driver_id BIGINT NOT NULL REFERENCES drivers(id) ON DELETE CASCADE,
        date DATE NOT NULL,
        machine TEXT,
        start_time TEXT,
        end_time TEXT,
        odometer_start DOUBLE PRECISION,
        odometer_end DOUBLE PRECISION,
        description TEXT,
        location TEXT,
        total_hours DOUBLE PRECISION,
        total_km DOUBLE PRECISION
    )"#,
    "CREATE INDEX IF NOT EXISTS works_driver_date_idx ON works (driver_id, date)",
];

/// Explicitly constructed handle to the connection pool, passed down through application state
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = Self::pool_options(config).connect(&config.url).await?;
        info!("Connected database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    /// Build the pool without opening a connection until first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = Self::pool_options(config).connect_lazy(&config.url)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the drivers and works tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
