// --- File: crates/appointly_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Backend API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the booking REST API, without a trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

// --- Slot Grid Config ---
// Times are "HH:MM" strings; the slots crate parses and validates them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SlotConfig {
    pub start: String,
    pub end: String,
    pub interval_minutes: u32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "16:30".to_string(),
            interval_minutes: 30,
        }
    }
}

// --- Admin View Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AdminConfig {
    /// Rows per page in the appointment listing.
    pub page_size: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// --- Main Application Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub slots: SlotConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}
