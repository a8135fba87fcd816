use crate::error::PortalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Municipal Corporation")]
    MunicipalCorporation,
    #[serde(rename = "Water Department")]
    Water,
    #[serde(rename = "Transport Department")]
    Transport,
    #[serde(rename = "Health Department")]
    Health,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::MunicipalCorporation,
        Department::Water,
        Department::Transport,
        Department::Health,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MunicipalCorporation => "Municipal Corporation",
            Self::Water => "Water Department",
            Self::Transport => "Transport Department",
            Self::Health => "Health Department",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|dept| dept.as_str() == s.trim())
            .ok_or_else(|| PortalError::UnknownDepartment(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Resolved" => Ok(Self::Resolved),
            other => Err(PortalError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(alias = "note")]
    pub text: String,
    #[serde(alias = "admin")]
    pub author: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grievance {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(alias = "authority")]
    pub department: Department,
    pub status: Status,
    #[serde(default)]
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_contact: String,
    #[serde(default, alias = "photo")]
    pub photo_ref: String,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub date_reported: String,
    #[serde(default)]
    pub time_reported: String,
    #[serde(default, alias = "adminNotes")]
    pub notes: Vec<Note>,
}

impl Grievance {
    pub fn has_displayable_photo(&self) -> bool {
        is_valid_image_ref(&self.photo_ref)
    }
}

/// Citizen-supplied fields for a new report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrievance {
    pub title: String,
    pub description: String,
    pub location: String,
    pub department: Department,
    #[serde(default)]
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_contact: String,
    #[serde(default)]
    pub photo_ref: String,
}

/// `None` on either predicate is the "all" wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrievanceFilter {
    pub status: Option<Status>,
    pub department: Option<Department>,
}

impl GrievanceFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, grievance: &Grievance) -> bool {
        let status_match = self.status.map_or(true, |s| grievance.status == s);
        let department_match = self.department.map_or(true, |d| grievance.department == d);
        status_match && department_match
    }
}

pub fn is_valid_image_ref(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    [".jpg", ".jpeg", ".png", ".gif", ".webp"]
        .iter()
        .any(|ext| lower.ends_with(ext))
        || reference.contains("imgur")
        || reference.contains("cloudinary")
        || reference.contains("unsplash")
        || reference.starts_with("data:image/")
}
