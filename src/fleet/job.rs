use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency of a job. Ordered so that `Critical` ranks highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Integer rank used for descending presentation order.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 3,
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

/// Lifecycle status of a job. Only `Unassigned -> Assigned` is driven by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Unassigned,
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Unassigned => write!(f, "Unassigned"),
            JobStatus::Assigned => write!(f, "Assigned"),
            JobStatus::InProgress => write!(f, "In Progress"),
            JobStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Position on the schematic service map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// A unit of field work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub customer: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub priority: Priority,
    pub status: JobStatus,
    /// Estimated value in euros.
    pub estimated_value: u32,
    pub address: String,
    pub zone: String,
    pub scheduled_time: String,
    pub location: Coordinates,
}

impl Job {
    pub fn is_unassigned(&self) -> bool {
        self.status == JobStatus::Unassigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ranks_descend_from_critical() {
        assert_eq!(Priority::Critical.rank(), 3);
        assert_eq!(Priority::High.rank(), 2);
        assert_eq!(Priority::Medium.rank(), 1);
        assert_eq!(Priority::Low.rank(), 0);
    }

    #[test]
    fn status_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, r#""In Progress""#);
        let parsed: JobStatus = serde_json::from_str(r#""Unassigned""#).unwrap();
        assert_eq!(parsed, JobStatus::Unassigned);
        assert_eq!(JobStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn job_deserializes_from_dashboard_format() {
        let json = r#"{
            "id": "J-101",
            "customer": "Harrods Facilities",
            "type": "HVAC Repair",
            "priority": "Critical",
            "status": "Unassigned",
            "estimatedValue": 850,
            "address": "87-135 Brompton Rd",
            "zone": "Zone 2",
            "scheduledTime": "10:30",
            "location": {"x": 42.0, "y": 55.5}
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.job_type, "HVAC Repair");
        assert_eq!(job.priority, Priority::Critical);
        assert_eq!(job.estimated_value, 850);
        assert_eq!(job.scheduled_time, "10:30");
        assert!(job.is_unassigned());
    }

    #[test]
    fn job_serializes_with_camel_case_keys() {
        let job = Job {
            id: "J-1".into(),
            customer: "Acme".into(),
            job_type: "Inspection".into(),
            priority: Priority::Low,
            status: JobStatus::Assigned,
            estimated_value: 120,
            address: "1 Road".into(),
            zone: "Zone 1".into(),
            scheduled_time: "09:00".into(),
            location: Coordinates { x: 1.0, y: 2.0 },
        };
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains(r#""estimatedValue":120"#));
        assert!(json.contains(r#""type":"Inspection""#));
        assert!(!json.contains("job_type"));
    }
}
