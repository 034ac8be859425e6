use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the metrics cards.
///
/// Only `active_jobs` changes at runtime, as a side effect of job assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub active_jobs: u64,
    /// Euros.
    pub revenue_to_date: u32,
    /// Minutes.
    pub avg_response_time: u32,
    /// Percentage.
    pub fleet_efficiency: u8,
    pub billable_hours: u32,
}
