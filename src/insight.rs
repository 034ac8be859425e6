//! Free-text fleet analysis from a generative model.
//!
//! [`InsightService`] never fails: a missing credential or any request error
//! degrades to a fixed message. [`InsightPanel`] tracks overlapping refreshes
//! with a generation counter so the newest request always owns the display.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::config::FleetConfig;
use crate::fleet::{Coordinates, DashboardMetrics, Job, Technician, TechnicianStatus};
use crate::gemini::{ContentGenerator, GeminiClient, GeminiError, GenerateContentRequest};
use crate::ranking;
use crate::seed::FleetSnapshot;

pub const MISSING_KEY_MESSAGE: &str = "AI service unavailable: Missing API Key.";
pub const REQUEST_FAILED_MESSAGE: &str =
    "Unable to generate insights at this time. Please check your connection or API key.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No insights generated.";
pub const NO_ANALYSIS_MESSAGE: &str = "No analysis available.";

const SYSTEM_INSTRUCTION: &str = "\
You are an expert Fleet Operations Manager AI named \"FleetOps Prime\".
Your goal is to analyze the current state of a field service fleet and provide actionable insights.
Focus on:
1. Identifying critical bottlenecks (e.g., unassigned critical jobs).
2. Suggesting the best technician for unassigned jobs based on location (coordinates), status, and skill (implied by efficiency).
3. Commenting on overall fleet efficiency and potential revenue risks.
Keep the response concise (under 200 words), professional, and formatted in Markdown.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FleetContext<'a> {
    metrics: &'a DashboardMetrics,
    unassigned_jobs: Vec<&'a Job>,
    technicians: Vec<TechnicianSummary<'a>>,
}

#[derive(Serialize)]
struct TechnicianSummary<'a> {
    id: &'a str,
    name: &'a str,
    status: TechnicianStatus,
    location: Coordinates,
    zone: &'a str,
    efficiency: u8,
}

/// Builds the user prompt: a JSON dump of the metrics, pending jobs and a
/// trimmed technician roster.
pub fn build_prompt(
    technicians: &[Technician],
    jobs: &[Job],
    metrics: &DashboardMetrics,
) -> Result<String, serde_json::Error> {
    let context = FleetContext {
        metrics,
        unassigned_jobs: ranking::pending_jobs(jobs),
        technicians: technicians
            .iter()
            .map(|t| TechnicianSummary {
                id: &t.id,
                name: &t.name,
                status: t.status,
                location: t.location,
                zone: &t.zone,
                efficiency: t.efficiency_score,
            })
            .collect(),
    };
    let data = serde_json::to_string(&context)?;
    Ok(format!(
        "Here is the current real-time fleet data:\n{data}\n\nPlease provide a tactical status report and recommendations."
    ))
}

enum Backend<G> {
    /// No credential configured. Requests never touch the network.
    MissingKey,
    /// The HTTP client could not be built.
    Unavailable,
    Ready(G),
}

pub struct InsightService<G> {
    backend: Backend<G>,
    model: String,
    temperature: f32,
}

impl InsightService<GeminiClient> {
    /// Gemini-backed service. Without an API key no client is built and every
    /// request short-circuits; a client that fails to build is logged and
    /// reported per request as a failure.
    pub fn from_config(config: &FleetConfig) -> Self {
        let backend = if !config.has_api_key() {
            Backend::MissingKey
        } else {
            match GeminiClient::with_base_url(config.api_key.clone(), config.base_url.clone()) {
                Ok(client) => Backend::Ready(client),
                Err(e) => {
                    tracing::error!(error = %e, "failed to build Gemini client");
                    Backend::Unavailable
                }
            }
        };
        Self {
            backend,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

impl<G: ContentGenerator> InsightService<G> {
    /// `None` behaves like a missing API key.
    pub fn new(generator: Option<G>, model: String, temperature: f32) -> Self {
        Self {
            backend: generator.map_or(Backend::MissingKey, Backend::Ready),
            model,
            temperature,
        }
    }

    /// Asks the model for a status report. Single attempt; always returns displayable text.
    pub async fn analyze_fleet_status(
        &self,
        technicians: &[Technician],
        jobs: &[Job],
        metrics: &DashboardMetrics,
    ) -> String {
        let generator = match &self.backend {
            Backend::Ready(generator) => generator,
            Backend::MissingKey => {
                tracing::warn!("API key not found in environment or config");
                return MISSING_KEY_MESSAGE.to_string();
            }
            Backend::Unavailable => return REQUEST_FAILED_MESSAGE.to_string(),
        };

        let prompt = match build_prompt(technicians, jobs, metrics) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize fleet context");
                return REQUEST_FAILED_MESSAGE.to_string();
            }
        };
        let req = GenerateContentRequest::prompt(prompt)
            .with_system_instruction(SYSTEM_INSTRUCTION)
            .with_temperature(self.temperature);

        match generator.generate_content(&self.model, &req).await {
            Ok(resp) => {
                let text = resp.text();
                if text.is_empty() {
                    EMPTY_RESPONSE_MESSAGE.to_string()
                } else {
                    text
                }
            }
            Err(GeminiError::RateLimited { retry_after_ms }) => {
                tracing::warn!(retry_after_ms, model = %self.model, "Gemini rate limit hit");
                REQUEST_FAILED_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "Gemini API error");
                REQUEST_FAILED_MESSAGE.to_string()
            }
        }
    }
}

/// Identifies one insight request. Later tickets carry larger generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket {
    generation: u64,
}

/// What happened to a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Displayed,
    /// A newer request's response was already on screen.
    Superseded,
}

/// Display state of the insight modal.
#[derive(Debug, Default)]
pub struct InsightPanel {
    issued: u64,
    displayed: u64,
    text: Option<String>,
}

impl InsightPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a refresh. In-flight requests are not cancelled.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket {
            generation: self.issued,
        }
    }

    pub fn complete(&mut self, ticket: RequestTicket, text: String) -> Delivery {
        if ticket.generation > self.displayed {
            self.displayed = ticket.generation;
            self.text = Some(text);
            Delivery::Displayed
        } else {
            tracing::debug!(
                generation = ticket.generation,
                displayed = self.displayed,
                "discarding stale insight"
            );
            Delivery::Superseded
        }
    }

    /// True until the newest issued request has been displayed.
    pub fn is_loading(&self) -> bool {
        self.displayed < self.issued
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(NO_ANALYSIS_MESSAGE)
    }

    pub fn displayed_generation(&self) -> u64 {
        self.displayed
    }
}

/// Fires `refreshes` overlapping requests against one snapshot and feeds the
/// responses to `panel` in arrival order, calling `on_complete` after each.
/// A task that dies still completes its ticket with the failure message.
/// Returns how many responses were superseded.
pub async fn refresh_overlapping<G>(
    service: Arc<InsightService<G>>,
    snapshot: Arc<FleetSnapshot>,
    panel: &mut InsightPanel,
    refreshes: usize,
    mut on_complete: impl FnMut(&InsightPanel),
) -> usize
where
    G: ContentGenerator + Send + Sync + 'static,
{
    let mut tasks = JoinSet::new();
    let mut tickets = HashMap::new();
    for _ in 0..refreshes.max(1) {
        let ticket = panel.begin();
        let service = Arc::clone(&service);
        let snapshot = Arc::clone(&snapshot);
        let handle = tasks.spawn(async move {
            service
                .analyze_fleet_status(&snapshot.technicians, &snapshot.jobs, &snapshot.metrics)
                .await
        });
        tickets.insert(handle.id(), ticket);
    }

    let mut superseded = 0;
    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, text) = match joined {
            Ok(done) => done,
            Err(e) => {
                tracing::error!(error = %e, "insight task failed");
                (e.id(), REQUEST_FAILED_MESSAGE.to_string())
            }
        };
        let Some(ticket) = tickets.remove(&id) else {
            continue;
        };
        if panel.complete(ticket, text) == Delivery::Superseded {
            superseded += 1;
        }
        on_complete(panel);
    }
    superseded
}
