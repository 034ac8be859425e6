use std::fmt;

use serde::{Deserialize, Serialize};

use super::job::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechnicianStatus {
    Available,
    #[serde(rename = "En Route")]
    EnRoute,
    Working,
    #[serde(rename = "On Break")]
    OnBreak,
    Offline,
}

impl fmt::Display for TechnicianStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechnicianStatus::Available => write!(f, "Available"),
            TechnicianStatus::EnRoute => write!(f, "En Route"),
            TechnicianStatus::Working => write!(f, "Working"),
            TechnicianStatus::OnBreak => write!(f, "On Break"),
            TechnicianStatus::Offline => write!(f, "Offline"),
        }
    }
}

/// A fleet worker. Never mutated by dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub vehicle_id: String,
    pub status: TechnicianStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_job_id: Option<String>,
    pub location: Coordinates,
    pub zone: String,
    /// 0-100
    pub battery_level: u8,
    /// 0-100
    pub fuel_level: u8,
    /// 0-100
    pub efficiency_score: u8,
    pub jobs_completed_today: u32,
    /// Euros per hour.
    pub billable_rate: u32,
}
