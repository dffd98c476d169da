//! Employee model.
//!
//! Employees are identified by their dealer-assigned LAN ID. The department
//! decides whether the employee competes in the sales contest at all.

use serde::{Deserialize, Serialize};

/// Department whose staff do not compete in the contest unless configured otherwise.
pub const DEFAULT_EXEMPT_DEPARTMENT: &str = "Operations";

/// An employee whose sales and audits are scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The dealer-assigned LAN ID; matches `employee_code` on records.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// The department the employee belongs to (e.g. "Sales", "Operations").
    #[serde(default)]
    pub department: Option<String>,
}

impl Employee {
    /// Creates an employee with no name or department.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            department: None,
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Returns true if the employee's department is one of `exempt_departments`.
    ///
    /// Department names compare case-insensitively and ignore surrounding
    /// whitespace. An employee without a department is never exempt.
    ///
    /// # Examples
    ///
    /// ```
    /// use dros_scoring::models::Employee;
    ///
    /// let exempt = vec!["Operations".to_string()];
    ///
    /// let ops = Employee::new("mops").with_department("operations");
    /// assert!(ops.is_exempt(&exempt));
    ///
    /// let sales = Employee::new("jdoe").with_department("Sales");
    /// assert!(!sales.is_exempt(&exempt));
    /// ```
    pub fn is_exempt(&self, exempt_departments: &[String]) -> bool {
        match &self.department {
            Some(department) => {
                let department = department.trim();
                exempt_departments
                    .iter()
                    .any(|exempt| exempt.trim().eq_ignore_ascii_case(department))
            }
            None => false,
        }
    }
}
