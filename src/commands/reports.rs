use crate::commands::{lock, PortalState};
use crate::models::report::{Analytics, GrievanceReport, RestoreSummary, StatusCounts, TrendingIssue};

pub fn get_stats(state: &PortalState) -> Result<StatusCounts, String> {
    let portal = lock(state)?;
    portal.counts().map_err(|e| e.to_string())
}

pub fn get_dashboard_stats(state: &PortalState) -> Result<StatusCounts, String> {
    let portal = lock(state)?;
    portal.dashboard_counts().map_err(|e| e.to_string())
}

pub fn generate_report(state: &PortalState) -> Result<GrievanceReport, String> {
    let portal = lock(state)?;
    portal.report().map_err(|e| e.to_string())
}

pub fn get_analytics(state: &PortalState) -> Result<Analytics, String> {
    let portal = lock(state)?;
    portal.analytics().map_err(|e| e.to_string())
}

pub fn get_trending(state: &PortalState, limit: Option<usize>) -> Result<Vec<TrendingIssue>, String> {
    let portal = lock(state)?;
    portal.trending(limit).map_err(|e| e.to_string())
}

pub fn export_data(state: &PortalState, format: &str) -> Result<String, String> {
    let portal = lock(state)?;
    match format {
        "json" => portal.export_json().map_err(|e| e.to_string()),
        "csv" => portal.export_csv().map_err(|e| e.to_string()),
        _ => Err(format!("Unknown export format: {format}")),
    }
}

pub fn backup_data(state: &PortalState) -> Result<String, String> {
    let portal = lock(state)?;
    portal.backup().map_err(|e| e.to_string())
}

pub fn restore_data(state: &PortalState, blob: &str) -> Result<RestoreSummary, String> {
    let portal = lock(state)?;
    portal.restore(blob).map_err(|e| e.to_string())
}

pub fn clear_all_data(state: &PortalState) -> Result<serde_json::Value, String> {
    let mut portal = lock(state)?;
    portal.clear_all().map_err(|e| e.to_string())?;
    Ok(serde_json::json!({"status": "cleared"}))
}
