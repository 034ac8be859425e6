//! The dashboard's owned state: jobs, technicians and metrics, plus the one
//! mutation the operator can trigger.

use std::collections::HashSet;

use crate::error::FleetError;
use crate::fleet::{DashboardMetrics, Job, JobStatus, Technician};
use crate::ranking;
use crate::seed::FleetSnapshot;

/// Receives operator-facing acknowledgments.
pub trait Notifier {
    /// `job` is the targeted job as it stood before the assignment, if it exists.
    fn notify(&self, message: &str, job: Option<&Job>);
}

/// Result of an assignment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub job_id: String,
    /// Whether a job with this id existed. The active-jobs counter moves either way.
    pub matched: bool,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    jobs: Vec<Job>,
    technicians: Vec<Technician>,
    metrics: DashboardMetrics,
}

impl Dashboard {
    /// Builds the store, rejecting snapshots with repeated job ids.
    pub fn new(snapshot: FleetSnapshot) -> Result<Self, FleetError> {
        {
            let mut seen = HashSet::new();
            for job in &snapshot.jobs {
                if !seen.insert(job.id.as_str()) {
                    return Err(FleetError::DuplicateJobId(job.id.clone()));
                }
            }
        }
        Ok(Self {
            jobs: snapshot.jobs,
            technicians: snapshot.technicians,
            metrics: snapshot.metrics,
        })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn technicians(&self) -> &[Technician] {
        &self.technicians
    }

    pub fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Unassigned jobs, highest priority first.
    pub fn ranked_queue(&self) -> Vec<Job> {
        ranking::rank_unassigned(&self.jobs)
    }

    /// Marks a job as assigned and bumps the active-jobs counter.
    ///
    /// The acknowledgment goes out before any state changes. An unknown id
    /// leaves every job untouched but still increments `active_jobs`.
    pub fn assign_job(&mut self, job_id: &str, notifier: &impl Notifier) -> Assignment {
        notifier.notify(&format!("Job {job_id} dispatch initiated."), self.job(job_id));

        let mut matched = false;
        for job in self.jobs.iter_mut().filter(|j| j.id == job_id) {
            job.status = JobStatus::Assigned;
            matched = true;
        }
        // TODO: count only matched ids if the unconditional increment is confirmed as a defect.
        self.metrics.active_jobs = self.metrics.active_jobs.saturating_add(1);

        if matched {
            tracing::info!(job_id, active_jobs = self.metrics.active_jobs, "job assigned");
        } else {
            tracing::warn!(
                job_id,
                active_jobs = self.metrics.active_jobs,
                "assignment matched no job; active jobs counter incremented anyway"
            );
        }

        Assignment {
            job_id: job_id.to_string(),
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::fleet::{Coordinates, Priority};

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<String>>,
        seen_status: RefCell<Vec<Option<JobStatus>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, job: Option<&Job>) {
            self.messages.borrow_mut().push(message.to_string());
            self.seen_status.borrow_mut().push(job.map(|j| j.status));
        }
    }

    fn job(id: &str, priority: Priority, status: JobStatus) -> Job {
        Job {
            id: id.into(),
            customer: format!("Customer {id}"),
            job_type: "Repair".into(),
            priority,
            status,
            estimated_value: 250,
            address: "2 Mill Lane".into(),
            zone: "Zone 3".into(),
            scheduled_time: "11:00".into(),
            location: Coordinates { x: 5.0, y: 5.0 },
        }
    }

    fn dashboard(jobs: Vec<Job>) -> Dashboard {
        Dashboard::new(FleetSnapshot {
            technicians: Vec::new(),
            jobs,
            metrics: DashboardMetrics {
                active_jobs: 10,
                revenue_to_date: 5_000,
                avg_response_time: 40,
                fleet_efficiency: 90,
                billable_hours: 100,
            },
        })
        .unwrap()
    }

    #[test]
    fn assign_flips_only_the_matching_job() {
        let mut store = dashboard(vec![
            job("J1", Priority::High, JobStatus::Unassigned),
            job("J2", Priority::Low, JobStatus::Unassigned),
        ]);
        let before = store.jobs().to_vec();
        let notifier = RecordingNotifier::default();

        let result = store.assign_job("J1", &notifier);

        assert!(result.matched);
        assert_eq!(store.job("J1").unwrap().status, JobStatus::Assigned);
        assert_eq!(
            Job {
                status: JobStatus::Unassigned,
                ..store.job("J1").unwrap().clone()
            },
            before[0]
        );
        assert_eq!(store.job("J2").unwrap(), &before[1]);
        assert_eq!(store.metrics().active_jobs, 11);
    }

    #[test]
    fn unknown_id_changes_no_job_but_counts() {
        let mut store = dashboard(vec![job("J1", Priority::High, JobStatus::Unassigned)]);
        let before = store.jobs().to_vec();

        let result = store.assign_job("J99", &RecordingNotifier::default());

        assert!(!result.matched);
        assert_eq!(result.job_id, "J99");
        assert_eq!(store.jobs(), before.as_slice());
        assert_eq!(store.metrics().active_jobs, 11);
    }

    #[test]
    fn acknowledgment_names_the_job() {
        let mut store = dashboard(vec![job("J1", Priority::High, JobStatus::Unassigned)]);
        let notifier = RecordingNotifier::default();

        store.assign_job("J1", &notifier);
        store.assign_job("J7", &notifier);

        assert_eq!(
            *notifier.messages.borrow(),
            vec![
                "Job J1 dispatch initiated.".to_string(),
                "Job J7 dispatch initiated.".to_string()
            ]
        );
    }

    #[test]
    fn acknowledgment_sees_state_before_assignment() {
        let mut store = dashboard(vec![job("J1", Priority::High, JobStatus::Unassigned)]);
        let notifier = RecordingNotifier::default();

        store.assign_job("J1", &notifier);
        store.assign_job("J99", &notifier);

        assert_eq!(
            *notifier.seen_status.borrow(),
            vec![Some(JobStatus::Unassigned), None]
        );
        assert_eq!(store.job("J1").unwrap().status, JobStatus::Assigned);
    }

    #[test]
    fn counter_grows_past_u32_and_saturates() {
        let mut store = dashboard(vec![job("J1", Priority::High, JobStatus::Unassigned)]);
        store.metrics.active_jobs = u64::from(u32::MAX);
        store.assign_job("J1", &RecordingNotifier::default());
        assert_eq!(store.metrics().active_jobs, u64::from(u32::MAX) + 1);

        store.metrics.active_jobs = u64::MAX;
        let result = store.assign_job("J99", &RecordingNotifier::default());
        assert!(!result.matched);
        assert_eq!(store.metrics().active_jobs, u64::MAX);
    }

    #[test]
    fn assigned_job_leaves_the_queue() {
        let mut store = dashboard(vec![
            job("A", Priority::Medium, JobStatus::Unassigned),
            job("B", Priority::Critical, JobStatus::Unassigned),
            job("D", Priority::Low, JobStatus::Unassigned),
        ]);
        store.assign_job("B", &RecordingNotifier::default());

        let queue: Vec<String> = store.ranked_queue().into_iter().map(|j| j.id).collect();
        assert_eq!(queue, vec!["A", "D"]);
    }

    #[test]
    fn reassigning_still_counts() {
        let mut store = dashboard(vec![job("J1", Priority::High, JobStatus::Unassigned)]);
        let notifier = RecordingNotifier::default();
        store.assign_job("J1", &notifier);
        let second = store.assign_job("J1", &notifier);

        assert!(second.matched);
        assert_eq!(store.job("J1").unwrap().status, JobStatus::Assigned);
        assert_eq!(store.metrics().active_jobs, 12);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Dashboard::new(FleetSnapshot {
            technicians: Vec::new(),
            jobs: vec![
                job("J1", Priority::High, JobStatus::Unassigned),
                job("J1", Priority::Low, JobStatus::Assigned),
            ],
            metrics: DashboardMetrics {
                active_jobs: 0,
                revenue_to_date: 0,
                avg_response_time: 0,
                fleet_efficiency: 0,
                billable_hours: 0,
            },
        });
        assert!(matches!(result, Err(FleetError::DuplicateJobId(id)) if id == "J1"));
    }
}
