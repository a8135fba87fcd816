use crate::commands::{lock, PortalState};
use crate::models::account::{Registration, SessionIdentity};
use crate::models::grievance::Department;

pub fn register_account(state: &PortalState, candidate: Registration) -> Result<serde_json::Value, String> {
    let portal = lock(state)?;
    let account = portal.register(candidate).map_err(|e| e.to_string())?;
    Ok(serde_json::json!({
        "status": "registered",
        "username": account.username,
        "department": account.department,
    }))
}

pub fn login(state: &PortalState, username: &str, password: &str, department: &str) -> Result<SessionIdentity, String> {
    if department.trim().is_empty() {
        return Err("Please select your department first".to_string());
    }
    let department: Department = department
        .parse()
        .map_err(|e: crate::error::PortalError| e.to_string())?;

    let mut portal = lock(state)?;
    portal
        .login(username, password, department)
        .map_err(|e| e.to_string())
}

pub fn logout(state: &PortalState) -> Result<(), String> {
    let mut portal = lock(state)?;
    portal.logout();
    Ok(())
}

pub fn current_session(state: &PortalState) -> Result<Option<SessionIdentity>, String> {
    let portal = lock(state)?;
    Ok(portal.session().current().cloned())
}
