//! Data Store Adapter
//!
//! Read-only access to the employee and document collections. The trait
//! exposes no write operation; seeding happens once through
//! [`SqliteStore::initialize`] before any tool is registered.

mod seed;
mod sqlite;

pub use seed::{SEED_DOCUMENTS, SEED_EMPLOYEES};
pub use sqlite::SqliteStore;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Document, Employee};

/// Store configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// SQLite database file
    pub path: PathBuf,

    /// Cap on rows returned by one lookup
    pub max_results: u32,

    /// How long a connection waits on a locked database
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("corporate.db"),
            max_results: 50,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Rows from one lookup, cut at the configured cap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matches<T> {
    pub records: Vec<T>,
    /// More rows matched than the cap allowed through
    pub truncated: bool,
}

impl<T> Matches<T> {
    /// Keep the first `cap` rows of `rows`, noting whether any were dropped
    pub fn capped(mut rows: Vec<T>, cap: usize) -> Self {
        let truncated = rows.len() > cap;
        rows.truncate(cap);
        Self {
            records: rows,
            truncated,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lookups over the corporate records (Strategy pattern)
///
/// Matching is by substring, ASCII case-insensitive. Query text is always a
/// literal: `%`, `_` and `\` carry no pattern meaning, and the empty string
/// matches every record. Zero matches is an empty result, never an error.
/// Lookups return at most `max_results` rows, lowest id first, and say
/// whether more existed.
#[async_trait]
pub trait CorporateStore: Send + Sync {
    /// Documents whose title, content or category contains `query`
    async fn find_documents(&self, query: &str) -> Result<Matches<Document>>;

    /// Employees whose name, department or email contains `query`
    async fn find_employees(&self, query: &str) -> Result<Matches<Employee>>;

    /// Number of employees whose department contains `department`
    async fn department_count(&self, department: &str) -> Result<i64>;

    /// Check the store can be opened and read
    async fn health_check(&self) -> bool;
}

/// Escape character used in every `LIKE ... ESCAPE` clause
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Build a `LIKE` pattern matching `query` as a literal substring
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
