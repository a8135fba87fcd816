use thiserror::Error;

pub type Result<T> = std::result::Result<T, PortalError>;

/// Coarse classification used by callers that only need to pick a message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Duplicate,
    Format,
    Authorization,
    Storage,
}

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Please enter a note")]
    EmptyNote,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters long")]
    WeakPassword { min: usize },

    #[error("Invalid credentials or department mismatch")]
    InvalidCredentials,

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Grievance not found: {0}")]
    GrievanceNotFound(i64),

    #[error("No grievance id available after {0}")]
    IdSpaceExhausted(i64),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Email address already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid backup file format: {0}")]
    InvalidBackupFormat(String),

    #[error("Stored {key} collection is corrupt: {source}")]
    CorruptCollection {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Department login required")]
    Unauthorized,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl PortalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. }
            | Self::EmptyNote
            | Self::PasswordMismatch
            | Self::WeakPassword { .. }
            | Self::InvalidCredentials
            | Self::UnknownDepartment(_)
            | Self::UnknownStatus(_) => ErrorKind::Validation,
            Self::GrievanceNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateUsername(_) | Self::DuplicateEmail(_) => ErrorKind::Duplicate,
            Self::InvalidBackupFormat(_)
            | Self::CorruptCollection { .. }
            | Self::IdSpaceExhausted(_) => ErrorKind::Format,
            Self::Unauthorized => ErrorKind::Authorization,
            Self::StorageUnavailable(_) => ErrorKind::Storage,
        }
    }
}

impl From<rusqlite::Error> for PortalError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageUnavailable(format!("DB error: {err}"))
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageUnavailable(format!("I/O error: {err}"))
    }
}
