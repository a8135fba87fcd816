use crate::commands::{lock, parse_department_filter, parse_status_filter, PortalState};
use crate::models::grievance::{Grievance, GrievanceFilter, NewGrievance, Status};

pub fn submit_grievance(state: &PortalState, input: NewGrievance) -> Result<Grievance, String> {
    let portal = lock(state)?;
    portal.submit_grievance(input).map_err(|e| e.to_string())
}

pub fn list_grievances(state: &PortalState, status: &str, department: &str) -> Result<Vec<Grievance>, String> {
    let filter = GrievanceFilter {
        status: parse_status_filter(status)?,
        department: parse_department_filter(department)?,
    };
    let portal = lock(state)?;
    portal.public_grievances(filter).map_err(|e| e.to_string())
}

pub fn get_grievance(state: &PortalState, id: i64) -> Result<Grievance, String> {
    let portal = lock(state)?;
    portal.grievances().get(id).map_err(|e| e.to_string())
}

pub fn upvote_grievance(state: &PortalState, id: i64) -> Result<Grievance, String> {
    let portal = lock(state)?;
    portal.upvote(id).map_err(|e| e.to_string())
}

pub fn update_status(state: &PortalState, id: i64, status: &str) -> Result<Grievance, String> {
    let status: Status = status.parse().map_err(|e: crate::error::PortalError| e.to_string())?;
    let portal = lock(state)?;
    portal.update_status(id, status).map_err(|e| e.to_string())
}

pub fn add_note(state: &PortalState, id: i64, text: &str) -> Result<Grievance, String> {
    let portal = lock(state)?;
    portal.add_note(id, text).map_err(|e| e.to_string())
}

pub fn get_dashboard(state: &PortalState, status: &str) -> Result<Vec<Grievance>, String> {
    let status = parse_status_filter(status)?;
    let portal = lock(state)?;
    portal.dashboard(status).map_err(|e| e.to_string())
}
