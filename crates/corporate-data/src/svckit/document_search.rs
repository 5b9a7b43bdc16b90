//! Document Search Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolDescriptor, ToolOutput, ValidatedArgs};

use crate::store::CorporateStore;

pub const NAME: &str = "search_documents";

#[derive(Debug, Deserialize)]
struct Args {
    query: String,
}

/// Tool for searching internal documents by title, content or category
pub struct DocumentSearchTool {
    store: Arc<dyn CorporateStore>,
}

impl DocumentSearchTool {
    pub fn new(store: Arc<dyn CorporateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DocumentSearchTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: NAME.into(),
            description: "Search company documents. Matches the text against title, content and category; returns id, title, content and category for each match.".into(),
            parameters: vec![ParameterSchema::required_string(
                "query",
                "Text to look for, e.g. 'sales', 'guidelines' or 'benefits'",
            )],
            category: Some("documents".into()),
            read_only: true,
        }
    }

    async fn execute(&self, args: &ValidatedArgs) -> CoreResult<ToolOutput> {
        let Args { query } = args.parse()?;
        let documents = self.store.find_documents(&query).await?;
        tracing::debug!(
            query = %query,
            matches = documents.len(),
            truncated = documents.truncated,
            "Document search"
        );
        ToolOutput::records("documents", query, &documents.records, documents.truncated)
    }
}
