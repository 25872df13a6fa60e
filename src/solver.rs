pub mod greedy;
pub mod hybrid;
pub mod relocation;
pub mod reordering;
pub mod simulated_annealing;

use crate::data::{Instance, JobId, Schedule, Time};
use itertools::Itertools;
use std::error::Error;
use std::time::{Duration, Instant};

// Early work of a single job: the part of its (speed-adjusted) processing
// that finishes strictly before the due date, capped by the processing
// requirement itself: X_j = min(max(d_j - C_j + p_j*b_k, 0), p_j*b_k)
pub fn early_work(completion: f64, actual_p: f64, due: Time) -> f64 {
  let early_part = (due as f64 - completion + actual_p).max(0.0);
  return early_part.min(actual_p);
}

pub fn calculate_early_work(inst: &Instance, schedule: &Schedule) -> f64 {
  let mut total = 0.0;

  for (machine, seq) in schedule.machines.iter().enumerate() {
    let speed_factor = inst.speeds[machine];
    let mut current_time: f64 = 0.0;

    for &job_id in seq {
      let job = inst.job(job_id);
      let actual_p = job.p as f64 * speed_factor;
      let start = current_time.max(job.r as f64);
      let completion = start + actual_p;

      total += early_work(completion, actual_p, job.d);
      current_time = completion;
    }
  }

  return total;
}

// Nearest integer, halves away from zero. The verifier rounds with the same
// rule, otherwise equal solutions would be reported as mismatches.
pub fn round_criterion(value: f64) -> i64 {
  return value.round() as i64;
}

pub fn verify_schedule(inst: &Instance, schedule: &Schedule) -> Result<(), Box<dyn Error>> {
  let all_ids = schedule.job_ids();
  let mut problems = Vec::new();

  if all_ids.len() != inst.n_jobs {
    problems.push(format!(
      "Job count mismatch: scheduled {} of {}",
      all_ids.len(),
      inst.n_jobs
    ));
  }

  let sorted_ids: Vec<JobId> = all_ids.iter().cloned().sorted().collect();

  let duplicated: Vec<JobId> = sorted_ids
    .iter()
    .tuple_windows()
    .filter(|(a, b)| a == b)
    .map(|(a, _)| *a)
    .dedup()
    .collect();
  if !duplicated.is_empty() {
    problems.push(format!("Duplicate job ids: {:?}", duplicated));
  }

  let present: Vec<JobId> = sorted_ids.iter().cloned().dedup().collect();
  let missing: Vec<JobId> = (1..=inst.n_jobs)
    .filter(|id| present.binary_search(id).is_err())
    .collect();
  if !missing.is_empty() {
    problems.push(format!("Missing job ids: {:?}", missing));
  }
  let unknown: Vec<JobId> = present
    .iter()
    .filter(|&&id| id < 1 || id > inst.n_jobs)
    .cloned()
    .collect();
  if !unknown.is_empty() {
    problems.push(format!("Unknown job ids: {:?}", unknown));
  }

  if problems.is_empty() {
    return Ok(());
  }
  return Err(problems.join("; ").into());
}

pub fn format_solution(inst: &Instance, schedule: &Schedule) -> String {
  let value = round_criterion(calculate_early_work(inst, schedule));

  let mut lines = Vec::with_capacity(inst.n_machines() + 1);
  lines.push(value.to_string());
  for seq in &schedule.machines {
    lines.push(seq.iter().map(|id| id.to_string()).join(" "));
  }

  return lines.join("\n") + "\n";
}

// Shared deadline state threaded through all search phases. Each phase polls
// against its own fraction of the total limit and returns its best-so-far
// when the checkpoint is passed.
#[derive(Debug, Clone)]
pub struct Budget {
  start: Instant,
  limit: Duration,
}

impl Budget {
  pub fn new(limit: Duration) -> Self {
    return Budget {
      start: Instant::now(),
      limit: limit,
    };
  }

  pub fn expired(&self, fraction: f64) -> bool {
    return self.start.elapsed().as_secs_f64() >= self.limit.as_secs_f64() * fraction;
  }

  pub fn elapsed(&self) -> Duration {
    return self.start.elapsed();
  }
}
