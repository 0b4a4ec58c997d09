use std::env;

use async_trait::async_trait;
use log::{error, info};
use sqlx::{postgres::PgConnection, Connection};
use thiserror::Error;

pub mod queries;

pub use sqlx;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("could not initialize schema: {0}")]
    Schema(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl Default for DatabaseConnectionInfo {
    fn default() -> Self {
        Self {
            username: "root".to_owned(),
            password: "12345678".to_owned(),
            hostname: "localhost".to_owned(),
            port: 5432,
            database: "redbus_data".to_owned(),
        }
    }
}

impl DatabaseConnectionInfo {
    /// Reads the connection info from `DATABASE_*` variables. Every variable
    /// which is not set (or not parsable) keeps its built-in default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            username: lookup("DATABASE_USER").unwrap_or(defaults.username),
            password: lookup("DATABASE_PASSWORD").unwrap_or(defaults.password),
            hostname: lookup("DATABASE_HOST").unwrap_or(defaults.hostname),
            port: lookup("DATABASE_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            database: lookup("DATABASE_NAME").unwrap_or(defaults.database),
        }
    }

    pub(crate) fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

/// A single, unpooled connection. It lives for one unit of work and is closed
/// afterwards.
pub struct PgDatabase {
    connection: PgConnection,
}

impl PgDatabase {
    pub async fn connect(info: &DatabaseConnectionInfo) -> Result<Self> {
        info!(
            "connecting to database `{}` at {}:{}",
            info.database, info.hostname, info.port
        );
        let connection = PgConnection::connect(&info.postgres_url())
            .await
            .map_err(|why| {
                error!("error creating database connection: {}", why);
                DatabaseError::Connect(why)
            })?;
        info!("database connection established");
        Ok(Self { connection })
    }

    /// Creates the route table unless it already exists.
    pub async fn initialize_schema(&mut self) -> Result<()> {
        info!("initializing database schema");
        queries::route_table::create_if_missing(&mut self.connection)
            .await
            .map_err(|why| {
                error!("error initializing database schema: {}", why);
                DatabaseError::Schema(why)
            })?;
        info!("database schema initialized");
        Ok(())
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.connection
    }

    pub async fn close(self) {
        if let Err(why) = self.connection.close().await {
            error!("error closing database connection: {}", why);
        }
    }
}

/// The part of the database the dashboard needs: making sure the route table
/// exists.
#[async_trait]
pub trait RouteTableGateway: Send + Sync {
    async fn initialize_schema(&self) -> Result<()>;
}

/// Opens a fresh connection per call, creates the table and closes the
/// connection again.
#[derive(Debug, Clone)]
pub struct PgRouteTable {
    info: DatabaseConnectionInfo,
}

impl PgRouteTable {
    pub fn new(info: DatabaseConnectionInfo) -> Self {
        Self { info }
    }
}

#[async_trait]
impl RouteTableGateway for PgRouteTable {
    async fn initialize_schema(&self) -> Result<()> {
        let mut database = PgDatabase::connect(&self.info).await?;
        let result = database.initialize_schema().await;
        database.close().await;
        result
    }
}
