use crate::accounts::{DirectoryPolicy, DEFAULT_MIN_PASSWORD_LENGTH};
use crate::analysis::trending::DEFAULT_TRENDING_LIMIT;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 1;
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalSettings {
    pub trending_limit: usize,
    pub min_password_length: usize,
    pub bootstrap_account_enabled: bool,
    pub seed_demo_data: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self::from_value(&default_settings())
    }
}

impl PortalSettings {
    pub fn from_value(settings: &Value) -> Self {
        let migrated = migrate_settings(settings.clone());
        Self {
            trending_limit: migrated["trendingLimit"]
                .as_u64()
                .unwrap_or(DEFAULT_TRENDING_LIMIT as u64) as usize,
            min_password_length: migrated["minPasswordLength"]
                .as_u64()
                .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH as u64) as usize,
            bootstrap_account_enabled: migrated["bootstrapAccountEnabled"].as_bool().unwrap_or(true),
            seed_demo_data: migrated["seedDemoData"].as_bool().unwrap_or(false),
        }
    }

    pub fn directory_policy(&self) -> DirectoryPolicy {
        DirectoryPolicy {
            min_password_length: self.min_password_length,
            bootstrap_enabled: self.bootstrap_account_enabled,
        }
    }
}

pub fn get_settings(data_dir: &Path) -> Result<Value, String> {
    load_settings_from_disk(data_dir)
}

pub fn save_settings(data_dir: &Path, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(data_dir, settings)
}

pub fn load_portal_settings(data_dir: &Path) -> Result<PortalSettings, String> {
    let settings = load_settings_from_disk(data_dir)?;
    Ok(PortalSettings::from_value(&settings))
}

pub fn load_settings_from_disk(data_dir: &Path) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|_| json!({}))
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(data_dir: &Path, settings: Value) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let mut merged = load_settings_from_disk(data_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    Ok(migrated)
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE_NAME)
}

fn ensure_data_dir(data_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(data_dir)
        .map_err(|e| format!("Failed to create data directory {}: {e}", data_dir.display()))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let defaults = default_settings();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    deep_merge_defaults(&mut out, &defaults);
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "trendingLimit": DEFAULT_TRENDING_LIMIT,
        "minPasswordLength": DEFAULT_MIN_PASSWORD_LENGTH,
        "bootstrapAccountEnabled": true,
        "seedDemoData": false
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "trendingLimit", 1, 50, DEFAULT_TRENDING_LIMIT as u64);
    clamp_u64(
        obj,
        "minPasswordLength",
        DEFAULT_MIN_PASSWORD_LENGTH as u64,
        64,
        DEFAULT_MIN_PASSWORD_LENGTH as u64,
    );

    ensure_bool(obj, "bootstrapAccountEnabled", true);
    ensure_bool(obj, "seedDemoData", false);
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn ensure_bool(map: &mut Map<String, Value>, key: &str, default: bool) {
    let value = map.get(key).and_then(Value::as_bool).unwrap_or(default);
    map.insert(key.to_string(), json!(value));
}
