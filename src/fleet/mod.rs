mod job;
mod metrics;
mod technician;

pub use job::{Coordinates, Job, JobStatus, Priority};
pub use metrics::DashboardMetrics;
pub use technician::{Technician, TechnicianStatus};
