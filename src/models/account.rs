use crate::models::grievance::Department;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub password: String, // stored as entered
    pub department: Department,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub registered_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub department: Department,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub employee_id: String,
}

/// What the session keeps about the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub username: String,
    pub full_name: String,
    pub department: Department,
    pub email: String,
    pub employee_id: String,
}

impl From<&Account> for SessionIdentity {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            full_name: account.full_name.clone(),
            department: account.department,
            email: account.email.clone(),
            employee_id: account.employee_id.clone(),
        }
    }
}
