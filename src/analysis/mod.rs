//! Read-only reporting over grievance snapshots: counts, department
//! performance, trending, and the export formats.

pub mod export;
pub mod performance;
pub mod stats;
pub mod trending;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::grievance::{Department, Grievance, Status};

    pub fn grievance(id: i64, department: Department, status: Status, votes: u32) -> Grievance {
        Grievance {
            id,
            title: format!("Grievance {id}"),
            description: String::new(),
            location: String::new(),
            department,
            status,
            reporter_name: "Anonymous".to_string(),
            reporter_contact: "Not provided".to_string(),
            photo_ref: String::new(),
            votes,
            date_reported: String::new(),
            time_reported: String::new(),
            notes: Vec::new(),
        }
    }
}
