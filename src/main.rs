mod cli;
mod config;
mod error;
mod fleet;
mod gemini;
mod insight;
mod ranking;
mod report;
mod seed;
mod store;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::FleetConfig;
use insight::{InsightPanel, InsightService};
use report::FleetReport;
use seed::FleetSnapshot;
use store::Dashboard;
use tracing_subscriber::EnvFilter;
use ui::{InsightSpinner, TerminalUi};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        TerminalUi::new().error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fleetops=debug" } else { "fleetops=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = FleetConfig::load()?;
    let snapshot = match &cli.data {
        Some(path) => FleetSnapshot::load(path)
            .with_context(|| format!("failed to load fleet data from {}", path.display()))?,
        None => seed::fleet(),
    };
    let mut dashboard = Dashboard::new(snapshot)?;
    let ui = TerminalUi::new();

    match cli.command {
        Command::Status => ui.print_dashboard(&dashboard),
        Command::Assign { job_ids } => {
            assign_all(&mut dashboard, &job_ids, &ui);
            println!();
            ui.print_metrics(dashboard.metrics());
            ui.print_queue(&dashboard.ranked_queue());
        }
        Command::Export { output, assign } => {
            assign_all(&mut dashboard, &assign, &ui);
            let path = output.unwrap_or_else(|| config.report_path.clone());
            let report = FleetReport::new(config.lines_per_page);
            let document = report.render(
                dashboard.jobs(),
                dashboard.technicians(),
                dashboard.metrics(),
                &chrono::Local::now(),
            );
            report.write_to(&path, &document)?;
            println!("Report saved to {}", path.display());
        }
        Command::Insight { refreshes } => {
            if !config.has_api_key() {
                ui.warn("GEMINI_API_KEY is not set; analysis is unavailable.");
            }
            let service = Arc::new(InsightService::from_config(&config));
            let snapshot = Arc::new(FleetSnapshot {
                technicians: dashboard.technicians().to_vec(),
                jobs: dashboard.jobs().to_vec(),
                metrics: dashboard.metrics().clone(),
            });
            let mut panel = InsightPanel::new();

            let spinner = InsightSpinner::start();
            let superseded = insight::refresh_overlapping(
                service,
                snapshot,
                &mut panel,
                refreshes.into(),
                |panel| {
                    if !panel.is_loading() {
                        spinner.finish();
                    }
                },
            )
            .await;
            spinner.finish();

            tracing::debug!(superseded, generation = panel.displayed_generation(), "insight settled");
            ui.print_insight(panel.text());
        }
    }

    Ok(())
}

fn assign_all(dashboard: &mut Dashboard, job_ids: &[String], ui: &TerminalUi) {
    for id in job_ids {
        let assignment = dashboard.assign_job(id, ui);
        match dashboard.job(&assignment.job_id) {
            Some(job) if assignment.matched => {
                tracing::debug!(job_id = %job.id, customer = %job.customer, "dispatched");
            }
            _ => ui.warn(&format!(
                "No job with id {id}; active jobs counter still incremented."
            )),
        }
    }
}
