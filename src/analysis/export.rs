use crate::error::{PortalError, Result};
use crate::models::account::Account;
use crate::models::grievance::Grievance;
use crate::models::report::{Backup, JsonExport};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

const CSV_HEADERS: [&str; 10] = [
    "ID",
    "Title",
    "Description",
    "Location",
    "Department",
    "Status",
    "Reporter",
    "Contact",
    "Date",
    "Votes",
];

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PortalError::StorageUnavailable(format!("Failed to serialize export: {e}")))
}

pub fn export_json(grievances: &[Grievance], generated_at: DateTime<Utc>) -> Result<String> {
    to_pretty(&JsonExport {
        problems: grievances.to_vec(),
        export_date: iso_timestamp(generated_at),
    })
}

/// Free-text columns are wrapped in quotes; embedded quotes and commas in the
/// other columns pass through untouched.
pub fn export_csv(grievances: &[Grievance]) -> String {
    let mut lines = Vec::with_capacity(grievances.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for g in grievances {
        let row = [
            g.id.to_string(),
            format!("\"{}\"", g.title),
            format!("\"{}\"", g.description),
            format!("\"{}\"", g.location),
            g.department.to_string(),
            g.status.to_string(),
            g.reporter_name.clone(),
            g.reporter_contact.clone(),
            g.date_reported.clone(),
            g.votes.to_string(),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

pub fn backup_json(grievances: &[Grievance], accounts: &[Account], generated_at: DateTime<Utc>) -> Result<String> {
    to_pretty(&Backup {
        problems: grievances.to_vec(),
        admins: accounts.to_vec(),
        backup_date: iso_timestamp(generated_at),
    })
}

/// Decodes a backup blob. Both collections must be present; every record must decode.
pub fn parse_backup(blob: &str) -> Result<(Vec<Grievance>, Vec<Account>)> {
    let value: Value = serde_json::from_str(blob)
        .map_err(|e| PortalError::InvalidBackupFormat(format!("not valid JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| PortalError::InvalidBackupFormat("expected a JSON object".to_string()))?;

    let problems = collection(object, "problems")?;
    let admins = collection(object, "admins")?;

    let grievances: Vec<Grievance> = serde_json::from_value(problems.clone())
        .map_err(|e| PortalError::InvalidBackupFormat(format!("bad grievance record: {e}")))?;
    let accounts: Vec<Account> = serde_json::from_value(admins.clone())
        .map_err(|e| PortalError::InvalidBackupFormat(format!("bad account record: {e}")))?;

    let mut seen = HashSet::with_capacity(grievances.len());
    if let Some(dup) = grievances.iter().find(|g| !seen.insert(g.id)) {
        return Err(PortalError::InvalidBackupFormat(format!(
            "duplicate grievance id {}",
            dup.id
        )));
    }

    Ok((grievances, accounts))
}

fn collection<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Result<&'a Value> {
    object
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| PortalError::InvalidBackupFormat(format!("missing {key} collection")))
}
