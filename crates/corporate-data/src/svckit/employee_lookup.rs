//! Employee Lookup Tool
//!
//! Substring search over employee name, department and email.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolDescriptor, ToolOutput, ValidatedArgs};

use crate::store::CorporateStore;

pub const NAME: &str = "query_employees";

#[derive(Debug, Deserialize)]
struct Args {
    query: String,
}

/// Tool for finding employees
pub struct EmployeeLookupTool {
    store: Arc<dyn CorporateStore>,
}

impl EmployeeLookupTool {
    pub fn new(store: Arc<dyn CorporateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for EmployeeLookupTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: NAME.into(),
            description: "Query employee database. Matches the text against name, department and email; returns id, name, department and email for each match.".into(),
            parameters: vec![ParameterSchema::required_string(
                "query",
                "Text to look for, e.g. a name, a department ('Engineering') or an email",
            )],
            category: Some("employees".into()),
            read_only: true,
        }
    }

    async fn execute(&self, args: &ValidatedArgs) -> CoreResult<ToolOutput> {
        let Args { query } = args.parse()?;
        let employees = self.store.find_employees(&query).await?;
        tracing::debug!(
            query = %query,
            matches = employees.len(),
            truncated = employees.truncated,
            "Employee lookup"
        );
        ToolOutput::records("employees", query, &employees.records, employees.truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svckit::testing::FakeStore;
    use serde_json::{Map, json};

    fn tool(down: bool) -> EmployeeLookupTool {
        EmployeeLookupTool::new(Arc::new(FakeStore { down, cap: 50 }))
    }

    fn args_for(tool: &EmployeeLookupTool, text: &str) -> ValidatedArgs {
        let mut args = Map::new();
        args.insert("query".into(), json!(text));
        tool.descriptor().validate(&args).unwrap()
    }

    #[tokio::test]
    async fn test_employee_lookup() {
        let tool = tool(false);
        let output = tool.execute(&args_for(&tool, "Engineering")).await.unwrap();

        let ToolOutput::Records {
            entity,
            query,
            records,
            truncated,
        } = output
        else {
            panic!("expected records");
        };
        assert_eq!(entity, "employees");
        assert_eq!(query, "Engineering");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "John Doe");
        assert_eq!(records[1]["name"], "Bob Wilson");
        assert!(!truncated);
    }

    #[tokio::test]
    async fn capped_lookup_is_marked_truncated() {
        let tool = EmployeeLookupTool::new(Arc::new(FakeStore { down: false, cap: 1 }));
        let output = tool.execute(&args_for(&tool, "Engineering")).await.unwrap();

        let ToolOutput::Records {
            records, truncated, ..
        } = output
        else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "John Doe");
        assert!(truncated);
    }

    #[tokio::test]
    async fn store_fault_surfaces_as_unavailable() {
        let tool = tool(true);
        let err = tool.execute(&args_for(&tool, "John")).await.unwrap_err();
        assert!(matches!(err, agent_core::AgentError::StoreUnavailable(_)));
    }

    #[test]
    fn descriptor_is_read_only() {
        let descriptor = tool(false).descriptor();
        assert_eq!(descriptor.name, "query_employees");
        assert!(descriptor.read_only);
        assert_eq!(descriptor.parameters.len(), 1);
    }
}
