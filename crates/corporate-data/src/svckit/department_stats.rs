//! Department Statistics Tool
//!
//! Head count for a department. An unknown department is a count of zero,
//! not a failure.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolDescriptor, ToolOutput, ValidatedArgs};

use crate::model::DepartmentStats;
use crate::store::CorporateStore;

pub const NAME: &str = "get_department_stats";

#[derive(Debug, Deserialize)]
struct Args {
    department: String,
}

/// Tool for counting employees in a department
pub struct DepartmentStatsTool {
    store: Arc<dyn CorporateStore>,
}

impl DepartmentStatsTool {
    pub fn new(store: Arc<dyn CorporateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DepartmentStatsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: NAME.into(),
            description: "Get department statistics. Returns the department name as given and the number of employees whose department matches it.".into(),
            parameters: vec![ParameterSchema::required_string(
                "department",
                "Department name, e.g. 'Sales' or 'Engineering'",
            )],
            category: Some("employees".into()),
            read_only: true,
        }
    }

    async fn execute(&self, args: &ValidatedArgs) -> CoreResult<ToolOutput> {
        let Args { department } = args.parse()?;
        let employee_count = self.store.department_count(&department).await?;
        tracing::debug!(department = %department, employee_count, "Department stats");

        let stats = DepartmentStats {
            department,
            employee_count,
        };
        Ok(ToolOutput::Object(serde_json::to_value(stats)?))
    }
}
