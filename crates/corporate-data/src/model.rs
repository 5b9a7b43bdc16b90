//! Domain Models
//!
//! Reference records served by the assistant. There is no write path:
//! rows only ever come from the seed data.
//!
//! Field order in each struct is the serialized field order.

use serde::{Deserialize, Serialize};

/// An employee record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub email: String,
}

impl Employee {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            department: department.into(),
            email: email.into(),
        }
    }
}

/// An internal document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
}

impl Document {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }
}

/// Head count for a department filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStats {
    /// The filter exactly as requested
    pub department: String,
    pub employee_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_serializes_in_declared_field_order() {
        let json = serde_json::to_string(&Employee::new(
            1,
            "John Doe",
            "Engineering",
            "john@company.com",
        ))
        .unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"John Doe","department":"Engineering","email":"john@company.com"}"#
        );
    }

    #[test]
    fn document_serializes_in_declared_field_order() {
        let json =
            serde_json::to_string(&Document::new(3, "HR Policy", "Benefits", "hr")).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"title":"HR Policy","content":"Benefits","category":"hr"}"#
        );
    }
}
