pub mod account;
pub mod grievance;
pub mod report;
