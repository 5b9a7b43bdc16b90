//! Service Kit - Agent Tools
//!
//! Read-only lookups over [`CorporateStore`](crate::store::CorporateStore),
//! each implementing `agent_core::Tool`.

mod department_stats;
mod document_search;
mod employee_lookup;

pub use department_stats::DepartmentStatsTool;
pub use document_search::DocumentSearchTool;
pub use employee_lookup::EmployeeLookupTool;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;

    use crate::error::{Result, StoreError};
    use crate::model::{Document, Employee};
    use crate::store::{CorporateStore, Matches};

    /// In-memory store over the seed rows, or one that always fails
    pub struct FakeStore {
        pub down: bool,
        pub cap: usize,
    }

    impl FakeStore {
        pub const fn up() -> Self {
            Self { down: false, cap: 50 }
        }

        fn check(&self) -> Result<()> {
            if self.down {
                Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
            } else {
                Ok(())
            }
        }
    }

    fn contains(haystack: &str, needle: &str) -> bool {
        haystack
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
    }

    #[async_trait]
    impl CorporateStore for FakeStore {
        async fn find_documents(&self, query: &str) -> Result<Matches<Document>> {
            self.check()?;
            let records = crate::store::SEED_DOCUMENTS
                .iter()
                .filter(|(_, t, c, k)| contains(t, query) || contains(c, query) || contains(k, query))
                .map(|&(id, t, c, k)| Document::new(id, t, c, k))
                .collect();
            Ok(Matches::capped(records, self.cap))
        }

        async fn find_employees(&self, query: &str) -> Result<Matches<Employee>> {
            self.check()?;
            let records = crate::store::SEED_EMPLOYEES
                .iter()
                .filter(|(_, n, d, e)| contains(n, query) || contains(d, query) || contains(e, query))
                .map(|&(id, n, d, e)| Employee::new(id, n, d, e))
                .collect();
            Ok(Matches::capped(records, self.cap))
        }

        async fn department_count(&self, department: &str) -> Result<i64> {
            self.check()?;
            let count = crate::store::SEED_EMPLOYEES
                .iter()
                .filter(|(_, _, d, _)| contains(d, department))
                .count();
            Ok(i64::try_from(count).unwrap_or(i64::MAX))
        }

        async fn health_check(&self) -> bool {
            !self.down
        }
    }
}
