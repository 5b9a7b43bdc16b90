//! Seed records
//!
//! The only population path for the store. Inserted with `INSERT OR IGNORE`,
//! so re-running initialization never duplicates or overwrites a row.

/// (id, name, department, email)
pub const SEED_EMPLOYEES: &[(i64, &str, &str, &str)] = &[
    (1, "John Doe", "Engineering", "john@company.com"),
    (2, "Jane Smith", "Sales", "jane@company.com"),
    (3, "Bob Wilson", "Engineering", "bob@company.com"),
];

/// (id, title, content, category)
pub const SEED_DOCUMENTS: &[(i64, &str, &str, &str)] = &[
    (1, "Q4 Sales Report", "Sales increased by 20% in Q4 2024...", "reports"),
    (2, "Engineering Guidelines", "Follow these coding standards...", "guidelines"),
    (3, "HR Policy", "Employee benefits and policies...", "hr"),
];

pub(super) const CREATE_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS employees \
     (id INTEGER PRIMARY KEY, name TEXT, department TEXT, email TEXT)";

pub(super) const CREATE_DOCUMENTS: &str = "CREATE TABLE IF NOT EXISTS documents \
     (id INTEGER PRIMARY KEY, title TEXT, content TEXT, category TEXT)";

pub(super) const INSERT_EMPLOYEE: &str =
    "INSERT OR IGNORE INTO employees (id, name, department, email) VALUES (?, ?, ?, ?)";

pub(super) const INSERT_DOCUMENT: &str =
    "INSERT OR IGNORE INTO documents (id, title, content, category) VALUES (?, ?, ?, ?)";
