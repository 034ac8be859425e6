//! Fleet data available at process start: the built-in mock fleet, or a
//! snapshot file supplied with `--data`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FleetError;
use crate::fleet::{
    Coordinates, DashboardMetrics, Job, JobStatus, Priority, Technician, TechnicianStatus,
};

/// Everything the dashboard is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub technicians: Vec<Technician>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    pub metrics: DashboardMetrics,
}

impl FleetSnapshot {
    /// Reads a snapshot from a `.json` file, or TOML for any other extension.
    pub fn load(path: &Path) -> Result<Self, FleetError> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let snapshot = if is_json {
            serde_json::from_str(&contents)?
        } else {
            toml::from_str(&contents)?
        };
        tracing::debug!(path = %path.display(), "loaded fleet snapshot");
        Ok(snapshot)
    }
}

/// The built-in mock fleet.
pub fn fleet() -> FleetSnapshot {
    FleetSnapshot {
        technicians: technicians(),
        jobs: jobs(),
        metrics: DashboardMetrics {
            active_jobs: 24,
            revenue_to_date: 14_250,
            avg_response_time: 38,
            fleet_efficiency: 92,
            billable_hours: 312,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn tech(
    id: &str,
    name: &str,
    vehicle_id: &str,
    status: TechnicianStatus,
    current_job_id: Option<&str>,
    (x, y): (f64, f64),
    zone: &str,
    (battery_level, fuel_level): (u8, u8),
    efficiency_score: u8,
    jobs_completed_today: u32,
    billable_rate: u32,
) -> Technician {
    Technician {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!("https://i.pravatar.cc/150?u={id}"),
        vehicle_id: vehicle_id.to_string(),
        status,
        current_job_id: current_job_id.map(str::to_string),
        location: Coordinates { x, y },
        zone: zone.to_string(),
        battery_level,
        fuel_level,
        efficiency_score,
        jobs_completed_today,
        billable_rate,
    }
}

fn technicians() -> Vec<Technician> {
    use TechnicianStatus::*;
    vec![
        tech("T-01", "H. Specter", "VAN-042", Working, Some("J-098"), (22.0, 31.0), "Barons Court", (91, 78), 98, 5, 95),
        tech("T-02", "M. Ross", "VAN-017", EnRoute, Some("J-099"), (48.0, 22.0), "Kensington", (76, 64), 91, 4, 85),
        tech("T-03", "R. Zane", "VAN-088", Available, None, (67.0, 58.0), "Chelsea", (54, 18), 87, 3, 80),
        tech("T-04", "D. Paulsen", "VAN-023", OnBreak, None, (35.0, 72.0), "Fulham", (63, 55), 84, 3, 75),
        tech("T-05", "L. Litt", "VAN-061", Working, Some("J-097"), (81.0, 36.0), "Knightsbridge", (88, 81), 93, 6, 90),
        tech("T-06", "K. Bennett", "VAN-035", Available, None, (14.0, 64.0), "Barons Court", (97, 90), 79, 2, 70),
        tech("T-07", "S. Wheeler", "VAN-054", Offline, None, (58.0, 84.0), "Fulham", (12, 40), 72, 0, 70),
    ]
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: &str,
    customer: &str,
    job_type: &str,
    priority: Priority,
    estimated_value: u32,
    address: &str,
    zone: &str,
    scheduled_time: &str,
    (x, y): (f64, f64),
) -> Job {
    Job {
        id: id.to_string(),
        customer: customer.to_string(),
        job_type: job_type.to_string(),
        priority,
        status: JobStatus::Unassigned,
        estimated_value,
        address: address.to_string(),
        zone: zone.to_string(),
        scheduled_time: scheduled_time.to_string(),
        location: Coordinates { x, y },
    }
}

fn jobs() -> Vec<Job> {
    use Priority::*;
    let mut jobs = vec![
        job("J-101", "Harrods Facilities", "HVAC Repair", High, 850, "87-135 Brompton Rd", "Knightsbridge", "10:30", (78.0, 40.0)),
        job("J-102", "Natural History Museum", "Electrical Fault", Critical, 1_200, "Cromwell Rd", "Kensington", "09:45", (52.0, 30.0)),
        job("J-103", "Chelsea Flats Ltd", "Boiler Service", Medium, 320, "12 King's Rd", "Chelsea", "13:00", (64.0, 62.0)),
        job("J-104", "Queen's Club", "Lighting Install", Low, 450, "Palliser Rd", "Barons Court", "15:30", (18.0, 36.0)),
        job("J-105", "Fulham Broadway Retail", "Refrigeration", Critical, 980, "472 Fulham Rd", "Fulham", "10:00", (40.0, 76.0)),
        job("J-106", "V&A Archive", "Access Control", High, 640, "Exhibition Rd", "Kensington", "11:15", (55.0, 26.0)),
        job("J-107", "Stamford Dental", "Plumbing", Medium, 210, "3 Stamford Bridge", "Fulham", "14:00", (46.0, 80.0)),
        job("J-108", "Sloane Square Hotel", "Fire Alarm Test", Low, 380, "Sloane Square", "Chelsea", "16:45", (72.0, 54.0)),
    ];
    jobs.extend([
        Job {
            status: JobStatus::InProgress,
            ..job("J-097", "Beauchamp Place Salon", "Air Con Service", Medium, 290, "24 Beauchamp Pl", "Knightsbridge", "08:30", (80.0, 35.0))
        },
        Job {
            status: JobStatus::InProgress,
            ..job("J-098", "Talgarth Offices", "Server Room Cooling", Critical, 1_450, "Talgarth Rd", "Barons Court", "08:00", (21.0, 30.0))
        },
        Job {
            status: JobStatus::Assigned,
            ..job("J-099", "Kensington Olympia", "Generator Check", High, 720, "Hammersmith Rd", "Kensington", "12:00", (44.0, 18.0))
        },
    ]);
    jobs
}
