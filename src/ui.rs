//! Terminal output for fleetops: coloured panels and the loading spinner.
//!
//! `console` handles the styling and `indicatif` draws the spinner shown while
//! an AI analysis is pending.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::fleet::{DashboardMetrics, Job, Priority, Technician, TechnicianStatus};
use crate::ranking;
use crate::store::{Dashboard, Notifier};

/// Revenue in thousands of euros, e.g. 14260 → "€14.3k".
pub fn format_revenue(euros: u32) -> String {
    format!("€{:.1}k", f64::from(euros) / 1000.0)
}

/// Title, value and caption of each metrics card, in panel order.
pub fn metric_cards(metrics: &DashboardMetrics) -> [(&'static str, String, &'static str); 5] {
    [
        ("Active Jobs", metrics.active_jobs.to_string(), "+2 today"),
        ("Revenue YTD", format_revenue(metrics.revenue_to_date), "Vs €12k"),
        ("Avg Response", format!("{}m", metrics.avg_response_time), "Target 40m"),
        ("Efficiency", format!("{}%", metrics.fleet_efficiency), "Utilization"),
        ("Billable Hrs", metrics.billable_hours.to_string(), "MTD Total"),
    ]
}

/// Terminal rendering of the operations dashboard.
pub struct TerminalUi {
    // Section titles.
    bold: Style,
    // Secondary text.
    dim: Style,
    green: Style,
    red: Style,
    yellow: Style,
    blue: Style,
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self {
            bold: Style::new().bold(),
            dim: Style::new().dim(),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            blue: Style::new().blue(),
        }
    }
}

impl Notifier for TerminalUi {
    fn notify(&self, message: &str, job: Option<&Job>) {
        match job {
            Some(job) => println!(
                "  {} {message} {}",
                self.green.apply_to("✓"),
                self.dim.apply_to(format!("({}, {})", job.customer, job.address))
            ),
            None => println!("  {} {message}", self.green.apply_to("✓")),
        }
    }
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full dashboard: metrics, fleet, queue and top performers.
    pub fn print_dashboard(&self, dashboard: &Dashboard) {
        self.print_metrics(dashboard.metrics());
        self.print_technicians(dashboard.technicians());
        self.print_queue(&dashboard.ranked_queue());
        self.print_top_performers(dashboard.technicians());
    }

    pub fn print_metrics(&self, metrics: &DashboardMetrics) {
        println!("{}", self.bold.apply_to("Operational Overview"));
        for (title, value, sub) in metric_cards(metrics) {
            println!(
                "  {:<14}{:>8}  {}",
                self.dim.apply_to(title.to_uppercase()),
                self.bold.apply_to(value),
                self.dim.apply_to(sub)
            );
        }
        println!();
    }

    pub fn print_technicians(&self, technicians: &[Technician]) {
        println!("{}", self.bold.apply_to("Fleet"));
        for tech in technicians {
            let status = self.status_style(tech.status).apply_to(tech.status.to_string());
            println!(
                "  {} {:<14} {:<8} {:<10} {:<15} battery {:>3}%",
                self.status_style(tech.status).apply_to("●"),
                tech.name,
                tech.id,
                status,
                tech.zone,
                tech.battery_level
            );
        }
        println!();
    }

    /// Unassigned jobs, already ranked by priority.
    pub fn print_queue(&self, queue: &[Job]) {
        println!(
            "{} {}",
            self.bold.apply_to("Unassigned Jobs"),
            self.dim.apply_to(format!("({})", queue.len()))
        );
        if queue.is_empty() {
            println!("  {}", self.dim.apply_to("No pending jobs."));
        }
        for job in queue {
            println!(
                "  {:<9} {:<7} {:<26} €{:<6} {}",
                self.priority_style(job.priority).apply_to(job.priority.to_string()),
                job.id,
                job.customer,
                job.estimated_value,
                self.dim.apply_to(format!("{} · Due: {}", job.address, job.scheduled_time))
            );
        }
        println!();
    }

    pub fn print_top_performers(&self, technicians: &[Technician]) {
        println!("{}", self.bold.apply_to("Top 3 Techs"));
        for (i, tech) in ranking::top_technicians(technicians, 3).iter().enumerate() {
            println!(
                "  {}. {:<14} {:>3}%  {} jobs today",
                i + 1,
                tech.name,
                tech.efficiency_score,
                tech.jobs_completed_today
            );
        }
        println!();
    }

    pub fn print_insight(&self, text: &str) {
        println!("{}", self.bold.apply_to("Fleet Intelligence"));
        println!("{text}");
    }

    pub fn warn(&self, message: &str) {
        println!("  {} {message}", self.yellow.apply_to("!"));
    }

    pub fn error(&self, message: &str) {
        eprintln!("  {} {message}", self.red.apply_to("✗"));
    }

    fn status_style(&self, status: TechnicianStatus) -> &Style {
        match status {
            TechnicianStatus::Available => &self.green,
            TechnicianStatus::EnRoute => &self.blue,
            TechnicianStatus::Working => &self.bold,
            TechnicianStatus::OnBreak => &self.yellow,
            TechnicianStatus::Offline => &self.dim,
        }
    }

    fn priority_style(&self, priority: Priority) -> &Style {
        match priority {
            Priority::Critical => &self.red,
            Priority::High => &self.yellow,
            Priority::Medium | Priority::Low => &self.blue,
        }
    }
}

/// Spinner shown while an insight request is pending.
pub struct InsightSpinner {
    pb: ProgressBar,
}

impl InsightSpinner {
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Thinking...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    /// Safe to call more than once.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_in_thousands_with_one_decimal() {
        assert_eq!(format_revenue(14_260), "€14.3k");
        assert_eq!(format_revenue(12_000), "€12.0k");
        assert_eq!(format_revenue(0), "€0.0k");
    }

    #[test]
    fn metric_cards_follow_panel_order() {
        let metrics = DashboardMetrics {
            active_jobs: 25,
            revenue_to_date: 9_900,
            avg_response_time: 41,
            fleet_efficiency: 88,
            billable_hours: 300,
        };
        let cards = metric_cards(&metrics);
        let titles: Vec<&str> = cards.iter().map(|c| c.0).collect();
        assert_eq!(
            titles,
            vec!["Active Jobs", "Revenue YTD", "Avg Response", "Efficiency", "Billable Hrs"]
        );
        assert_eq!(cards[0].1, "25");
        assert_eq!(cards[1].1, "€9.9k");
        assert_eq!(cards[2].1, "41m");
        assert_eq!(cards[3].1, "88%");
    }
}
