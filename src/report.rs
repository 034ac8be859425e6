//! Paginated plain-text fleet report.
//!
//! Layout follows the operations export: title, key metrics, technician
//! status table, then pending jobs in collection order.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, TimeZone};

use crate::error::FleetError;
use crate::fleet::{DashboardMetrics, Job, Technician};
use crate::ranking;

pub const TITLE: &str = "LUX OPS FLEET Report";
const PAGE_BREAK: char = '\u{c}';
const RULE_WIDTH: usize = 72;

pub struct FleetReport {
    lines_per_page: usize,
}

impl FleetReport {
    pub fn new(lines_per_page: usize) -> Self {
        // Footer needs two lines of its own.
        Self {
            lines_per_page: lines_per_page.max(3),
        }
    }

    pub fn render<Tz>(
        &self,
        jobs: &[Job],
        technicians: &[Technician],
        metrics: &DashboardMetrics,
        generated_at: &DateTime<Tz>,
    ) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let body = body_lines(jobs, technicians, metrics, generated_at);
        self.paginate(&body)
    }

    pub fn write_to(&self, path: &Path, document: &str) -> Result<(), FleetError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, document)?;
        tracing::info!(path = %path.display(), bytes = document.len(), "report written");
        Ok(())
    }

    fn paginate(&self, body: &[String]) -> String {
        let per_page = self.lines_per_page - 2;
        let pages: Vec<&[String]> = if body.is_empty() {
            vec![body]
        } else {
            body.chunks(per_page).collect()
        };
        let total = pages.len();

        let mut out = String::new();
        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                out.push(PAGE_BREAK);
            }
            for line in page.iter() {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            let _ = writeln!(out, "Page {} of {total}", i + 1);
        }
        out
    }
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn body_lines<Tz>(
    jobs: &[Job],
    technicians: &[Technician],
    metrics: &DashboardMetrics,
    generated_at: &DateTime<Tz>,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut lines = vec![
        TITLE.to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        rule(),
        String::new(),
        "Key Metrics".to_string(),
        String::new(),
        format!(
            "  {:<32}{}",
            format!("Active Jobs: {}", metrics.active_jobs),
            format!("Revenue YTD: €{}", metrics.revenue_to_date)
        ),
        format!(
            "  {:<32}{}",
            format!("Avg Response: {}m", metrics.avg_response_time),
            format!("Fleet Efficiency: {}%", metrics.fleet_efficiency)
        ),
        format!("  Billable Hours: {}", metrics.billable_hours),
        rule(),
        String::new(),
        "Technician Status".to_string(),
        String::new(),
        format!("  {:<22}{:<14}{:<14}{}", "Name", "Vehicle", "Status", "Efficiency"),
        format!("  {}", "-".repeat(RULE_WIDTH - 2)),
    ];
    for tech in technicians {
        lines.push(format!(
            "  {:<22}{:<14}{:<14}{}%",
            tech.name,
            tech.vehicle_id,
            tech.status.to_string(),
            tech.efficiency_score
        ));
    }

    lines.extend([
        String::new(),
        "Pending Jobs".to_string(),
        String::new(),
        format!("  {:<34}{:<12}{}", "Customer", "Priority", "Value"),
        format!("  {}", "-".repeat(RULE_WIDTH - 2)),
    ]);
    let pending = ranking::pending_jobs(jobs);
    if pending.is_empty() {
        lines.push("  No pending jobs.".to_string());
    }
    for job in pending {
        lines.push(format!(
            "  {:<34}{:<12}€{}",
            job.customer,
            job.priority.to_string(),
            job.estimated_value
        ));
    }
    lines
}
