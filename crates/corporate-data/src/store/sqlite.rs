//! SQLite-backed store
//!
//! Every lookup opens its own read-only connection and closes it before
//! returning. No pool, no connection shared across calls.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use super::seed::{
    CREATE_DOCUMENTS, CREATE_EMPLOYEES, INSERT_DOCUMENT, INSERT_EMPLOYEE, SEED_DOCUMENTS,
    SEED_EMPLOYEES,
};
use super::{CorporateStore, Matches, StoreConfig, contains_pattern};
use crate::error::{Result, StoreError};
use crate::model::{Document, Employee};

const FIND_DOCUMENTS: &str = r"SELECT id, title, content, category FROM documents
WHERE title LIKE ? ESCAPE '\' OR content LIKE ? ESCAPE '\' OR category LIKE ? ESCAPE '\'
ORDER BY id LIMIT ?";

const FIND_EMPLOYEES: &str = r"SELECT id, name, department, email FROM employees
WHERE name LIKE ? ESCAPE '\' OR department LIKE ? ESCAPE '\' OR email LIKE ? ESCAPE '\'
ORDER BY id LIMIT ?";

const COUNT_DEPARTMENT: &str =
    r"SELECT COUNT(*) FROM employees WHERE department LIKE ? ESCAPE '\'";

/// Store over a single SQLite file
#[derive(Clone, Debug)]
pub struct SqliteStore {
    read_options: SqliteConnectOptions,
    max_results: u32,
    cap: usize,
}

impl SqliteStore {
    /// Open an existing database. Nothing is touched until the first lookup.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(StoreError::Config("database path is empty".into()));
        }
        if config.max_results == 0 {
            return Err(StoreError::Config("max_results must be at least 1".into()));
        }

        let read_options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true)
            .busy_timeout(config.busy_timeout);

        Ok(Self {
            read_options,
            max_results: config.max_results,
            cap: usize::try_from(config.max_results).unwrap_or(usize::MAX),
        })
    }

    /// Create the database file and schema if absent, insert the seed rows
    /// that are missing, then open the store for reads.
    pub async fn initialize(config: &StoreConfig) -> Result<Self> {
        let store = Self::new(config)?;
        tracing::info!(path = %config.path.display(), "Initializing corporate database");

        let mut conn = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .busy_timeout(config.busy_timeout)
            .connect()
            .await?;

        let seeded = seed(&mut conn).await;
        close(conn).await;
        seeded?;

        tracing::info!("Corporate database ready");
        Ok(store)
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        Ok(self.read_options.connect().await?)
    }

    /// One row past the cap, so a cut-off result can be told apart from an
    /// exact fit
    fn limit(&self) -> i64 {
        i64::from(self.max_results) + 1
    }
}

async fn seed(conn: &mut SqliteConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    sqlx::query(CREATE_EMPLOYEES).execute(&mut *tx).await?;
    sqlx::query(CREATE_DOCUMENTS).execute(&mut *tx).await?;

    for &(id, name, department, email) in SEED_EMPLOYEES {
        sqlx::query(INSERT_EMPLOYEE)
            .bind(id)
            .bind(name)
            .bind(department)
            .bind(email)
            .execute(&mut *tx)
            .await?;
    }
    for &(id, title, content, category) in SEED_DOCUMENTS {
        sqlx::query(INSERT_DOCUMENT)
            .bind(id)
            .bind(title)
            .bind(content)
            .bind(category)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::debug!(
        employees = SEED_EMPLOYEES.len(),
        documents = SEED_DOCUMENTS.len(),
        "Seed rows ensured"
    );
    Ok(())
}

async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection cleanly: {}", e);
    }
}

#[async_trait]
impl CorporateStore for SqliteStore {
    async fn find_documents(&self, query: &str) -> Result<Matches<Document>> {
        tracing::debug!(query, "Searching documents");
        let pattern = contains_pattern(query);

        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, Document>(FIND_DOCUMENTS)
            .bind(pattern.as_str())
            .bind(pattern.as_str())
            .bind(pattern.as_str())
            .bind(self.limit())
            .fetch_all(&mut conn)
            .await;
        close(conn).await;

        Ok(Matches::capped(rows?, self.cap))
    }

    async fn find_employees(&self, query: &str) -> Result<Matches<Employee>> {
        tracing::debug!(query, "Searching employees");
        let pattern = contains_pattern(query);

        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, Employee>(FIND_EMPLOYEES)
            .bind(pattern.as_str())
            .bind(pattern.as_str())
            .bind(pattern.as_str())
            .bind(self.limit())
            .fetch_all(&mut conn)
            .await;
        close(conn).await;

        Ok(Matches::capped(rows?, self.cap))
    }

    async fn department_count(&self, department: &str) -> Result<i64> {
        tracing::debug!(department, "Counting department employees");
        let pattern = contains_pattern(department);

        let mut conn = self.connect().await?;
        let count = sqlx::query_scalar::<_, i64>(COUNT_DEPARTMENT)
            .bind(pattern.as_str())
            .fetch_one(&mut conn)
            .await;
        close(conn).await;

        Ok(count?)
    }

    async fn health_check(&self) -> bool {
        let Ok(mut conn) = self.connect().await else {
            return false;
        };
        let ok = sqlx::query("SELECT 1").execute(&mut conn).await.is_ok();
        close(conn).await;
        ok
    }
}
