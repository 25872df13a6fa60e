use crate::data::{Instance, Job, JobId};
use ndarray::Array1;
use std::error::Error;
use std::time::Duration;

pub fn parse_instance(contents: &str) -> Result<Instance, Box<dyn Error>> {
  let mut lines = contents.lines();

  let n_jobs: usize = lines.next().ok_or("Job count missing")?.trim().parse()?;

  let speed_items = lines.next().ok_or("Speed factors missing")?;
  let speeds: Vec<f64> = speed_items
    .split_whitespace()
    .map(|item| item.parse())
    .collect::<Result<_, _>>()?;
  if speeds.is_empty() {
    return Err("Speed factors missing".into());
  }

  let mut jobs = Vec::with_capacity(n_jobs);
  for i in 0..n_jobs {
    let line = lines
      .next()
      .ok_or_else(|| format!("Job line {} missing", i + 1))?;
    let items: Vec<&str> = line.split_whitespace().collect();

    let p = items.get(0).ok_or("Processing time missing")?.parse()?;
    let r = items.get(1).ok_or("Release time missing")?.parse()?;
    let d = items.get(2).ok_or("Due date missing")?.parse()?;

    jobs.push(Job {
      id: i + 1,
      p: p,
      r: r,
      d: d,
    });
  }

  return Ok(Instance {
    n_jobs: n_jobs,
    speeds: Array1::from(speeds),
    jobs: jobs,
  });
}

// Reads a solution file back: the reported (already rounded) criterion value
// and one job-id sequence per machine, idle machines as empty lines.
pub fn parse_solution(
  contents: &str,
  n_machines: usize,
) -> Result<(i64, Vec<Vec<JobId>>), Box<dyn Error>> {
  let lines: Vec<&str> = contents.lines().collect();

  let reported: i64 = lines
    .get(0)
    .ok_or("Criterion value missing")?
    .trim()
    .parse()?;

  let mut machines = Vec::with_capacity(n_machines);
  for k in 0..n_machines {
    let line = lines
      .get(k + 1)
      .ok_or_else(|| format!("Machine line {} missing", k + 1))?;
    let seq: Vec<JobId> = line
      .split_whitespace()
      .map(|item| item.parse())
      .collect::<Result<_, _>>()?;
    machines.push(seq);
  }

  return Ok((reported, machines));
}

// Time limits arrive as decimal seconds on the command line. Negative and
// non-finite values must not reach Duration::from_secs_f64, which panics on
// them with an unhelpful message.
pub fn parse_time_limit(item: &str) -> Result<Duration, Box<dyn Error>> {
  let secs: f64 = item.trim().parse()?;
  if !secs.is_finite() || secs < 0.0 {
    return Err(format!("Invalid time limit: {}", item).into());
  }
  return Ok(Duration::from_secs_f64(secs));
}
