//! Caller-facing surface. Inputs arrive as the UI sends them (strings, `"all"`
//! wildcards) and errors leave as display strings.

pub mod auth;
pub mod grievances;
pub mod reports;
pub mod settings;

use crate::models::grievance::{Department, Status};
use crate::portal::Portal;
use crate::store::SqliteStorage;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub type PortalState = Arc<Mutex<Portal>>;

/// Opens the durable portal stored under `data_dir`, creating it if needed.
pub fn open_portal(data_dir: &Path) -> Result<PortalState, String> {
    let settings = settings::load_portal_settings(data_dir)
        .map_err(|e| format!("INIT_FAILED: Could not load settings: {e}"))?;
    let storage = SqliteStorage::open(data_dir)
        .map_err(|e| format!("INIT_FAILED: Could not open storage: {e}"))?;
    let portal = Portal::open(Arc::new(storage), settings).map_err(|e| e.to_string())?;
    log::info!("portal opened at {}", data_dir.display());
    Ok(Arc::new(Mutex::new(portal)))
}

pub(crate) fn lock(state: &PortalState) -> Result<MutexGuard<'_, Portal>, String> {
    state.lock().map_err(|_| "Portal lock error".to_string())
}

pub(crate) fn parse_status_filter(raw: &str) -> Result<Option<Status>, String> {
    if raw.trim().eq_ignore_ascii_case("all") || raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|e: crate::error::PortalError| e.to_string())
}

pub(crate) fn parse_department_filter(raw: &str) -> Result<Option<Department>, String> {
    if raw.trim().eq_ignore_ascii_case("all") || raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|e: crate::error::PortalError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_the_filter_wildcard() {
        assert_eq!(parse_status_filter("all").unwrap(), None);
        assert_eq!(parse_department_filter("").unwrap(), None);
        assert_eq!(parse_status_filter("Resolved").unwrap(), Some(Status::Resolved));
        assert_eq!(
            parse_department_filter("Water Department").unwrap(),
            Some(Department::Water)
        );
        assert!(parse_status_filter("Closed").is_err());
    }
}
