//! Presentation orderings over the fleet: the unassigned job queue and the
//! top performers panel.

use crate::fleet::{Job, Technician};

/// Orders the unassigned jobs by priority rank, highest first.
///
/// The sort is stable: jobs of equal priority keep their relative order from
/// `jobs`. The input is never modified; an empty or fully assigned collection
/// yields an empty queue.
pub fn rank_unassigned(jobs: &[Job]) -> Vec<Job> {
    let mut queue: Vec<Job> = jobs.iter().filter(|j| j.is_unassigned()).cloned().collect();
    queue.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    queue
}

/// Unassigned jobs in collection order. Used by the report, which lists
/// pending work without ranking it.
pub fn pending_jobs(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter().filter(|j| j.is_unassigned()).collect()
}

/// The `n` technicians with the highest efficiency score. Ties keep roster order.
pub fn top_technicians(technicians: &[Technician], n: usize) -> Vec<&Technician> {
    let mut ranked: Vec<&Technician> = technicians.iter().collect();
    ranked.sort_by(|a, b| b.efficiency_score.cmp(&a.efficiency_score));
    ranked.truncate(n);
    ranked
}
