use crate::data::{Instance, Job, Machine, Schedule};
use crate::solver::early_work;
use ndarray::Array1;
use std::cmp::{Ordering, Reverse};

// Trial placement of a job at the end of one machine's sequence, as seen by
// the scoring functions below
pub struct Placement {
  pub machine: Machine,
  pub speed_factor: f64,
  pub load: f64,
  pub early_work: f64,
}

// Earliest due date first, machines picked by a weighted score preferring
// high early work, fast machines and low load
pub fn find_solution_edd(inst: &Instance) -> Schedule {
  return find_solution(
    inst,
    &mut |a, b| (a.d, a.r, Reverse(a.p)).cmp(&(b.d, b.r, Reverse(b.p))),
    &mut |placement| {
      placement.early_work * 100.0 - placement.speed_factor * 50.0 - placement.load * 0.5
    },
  );
}

// Tightest slack first, biased toward faster machines so that jobs with
// little room still finish before their due date
pub fn find_solution_slack(inst: &Instance) -> Schedule {
  return find_solution(
    inst,
    &mut |a, b| (a.slack(), a.d, Reverse(a.p)).cmp(&(b.slack(), b.d, Reverse(b.p))),
    &mut |placement| placement.early_work / placement.speed_factor.sqrt(),
  );
}

// Longest processing time first with a load balancing bias
pub fn find_solution_lpt(inst: &Instance) -> Schedule {
  return find_solution(
    inst,
    &mut |a, b| (Reverse(a.p), a.d).cmp(&(Reverse(b.p), b.d)),
    &mut |placement| placement.early_work * 50.0 - placement.load,
  );
}

// Shared greedy core: iterate jobs in priority order and append each to the
// best-scoring machine. Every job is placed exactly once, so the resulting
// schedule holds the permutation invariant by construction.
pub fn find_solution(
  inst: &Instance,
  priority: &mut dyn FnMut(&Job, &Job) -> Ordering,
  score: &mut dyn FnMut(&Placement) -> f64,
) -> Schedule {
  let n_machines = inst.n_machines();
  let mut schedule = Schedule::empty(n_machines);
  let mut machine_times = Array1::<f64>::zeros(n_machines);

  let mut order: Vec<&Job> = inst.jobs.iter().collect();
  order.sort_by(|a, b| priority(a, b));

  for job in order {
    let mut best_machine = None;
    let mut best_score = f64::NEG_INFINITY;

    for k in 0..n_machines {
      let speed_factor = inst.speeds[k];
      let actual_p = job.p as f64 * speed_factor;
      let start = machine_times[k].max(job.r as f64);
      let completion = start + actual_p;

      let placement = Placement {
        machine: k,
        speed_factor: speed_factor,
        load: machine_times[k],
        early_work: early_work(completion, actual_p, job.d),
      };

      let candidate_score = score(&placement);
      if candidate_score > best_score {
        best_score = candidate_score;
        best_machine = Some(placement.machine);
      }
    }

    // NaN scores compare false above; fall back to the first machine
    let chosen = best_machine.unwrap_or(0);
    let actual_p = job.p as f64 * inst.speeds[chosen];
    let start = machine_times[chosen].max(job.r as f64);
    machine_times[chosen] = start + actual_p;
    schedule.machines[chosen].push(job.id);
  }

  return schedule;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::{Job, Time};
  use crate::solver::{calculate_early_work, verify_schedule};
  use ndarray::arr1;

  fn instance(speeds: Vec<f64>, jobs: Vec<(Time, Time, Time)>) -> Instance {
    let jobs: Vec<Job> = jobs
      .into_iter()
      .enumerate()
      .map(|(i, (p, r, d))| Job {
        id: i + 1,
        p: p,
        r: r,
        d: d,
      })
      .collect();

    return Instance {
      n_jobs: jobs.len(),
      speeds: arr1(&speeds),
      jobs: jobs,
    };
  }

  fn ten_job_instance() -> Instance {
    return instance(
      vec![1.0, 1.3, 1.8],
      vec![
        (7, 0, 9),
        (3, 2, 4),
        (5, 1, 20),
        (2, 0, 3),
        (4, 6, 15),
        (9, 0, 12),
        (1, 3, 8),
        (6, 2, 19),
        (8, 5, 30),
        (2, 1, 6),
      ],
    );
  }

  #[test]
  fn edd_assigns_every_job_once() {
    let inst = ten_job_instance();
    let schedule = find_solution_edd(&inst);
    assert!(verify_schedule(&inst, &schedule).is_ok());
  }

  #[test]
  fn slack_assigns_every_job_once() {
    let inst = ten_job_instance();
    let schedule = find_solution_slack(&inst);
    assert!(verify_schedule(&inst, &schedule).is_ok());
  }

  #[test]
  fn lpt_assigns_every_job_once() {
    let inst = ten_job_instance();
    let schedule = find_solution_lpt(&inst);
    assert!(verify_schedule(&inst, &schedule).is_ok());
  }

  #[test]
  fn edd_orders_single_machine_by_due_date() {
    let inst = instance(vec![1.0], vec![(2, 0, 5), (3, 0, 4), (1, 0, 10)]);
    let schedule = find_solution_edd(&inst);

    assert_eq!(schedule.machines, vec![vec![2, 1, 3]]);
    let value = calculate_early_work(&inst, &schedule);
    assert!((value - 6.0).abs() < 1e-12);
  }

  #[test]
  fn edd_breaks_due_date_ties_by_release_then_longest() {
    let inst = instance(vec![1.0], vec![(1, 5, 10), (4, 0, 10), (2, 0, 10)]);
    let schedule = find_solution_edd(&inst);

    assert_eq!(schedule.machines, vec![vec![2, 3, 1]]);
  }

  #[test]
  fn slack_orders_single_machine_by_slack() {
    // Slacks 8, 2 and 5: tightest first
    let inst = instance(vec![1.0], vec![(2, 0, 10), (3, 0, 5), (1, 0, 6)]);
    let schedule = find_solution_slack(&inst);

    assert_eq!(schedule.machines, vec![vec![2, 3, 1]]);
  }

  #[test]
  fn slack_breaks_ties_by_due_date_then_longest() {
    // All slacks equal 6: due date ascending, then processing time descending
    let inst = instance(vec![1.0], vec![(2, 2, 10), (2, 0, 8), (4, 0, 10)]);
    let schedule = find_solution_slack(&inst);

    assert_eq!(schedule.machines, vec![vec![2, 3, 1]]);
  }

  #[test]
  fn lpt_orders_by_processing_time_descending() {
    let inst = instance(vec![1.0], vec![(2, 0, 50), (5, 0, 50), (3, 0, 50)]);
    let schedule = find_solution_lpt(&inst);

    assert_eq!(schedule.machines, vec![vec![2, 3, 1]]);
  }

  #[test]
  fn construction_criterion_is_non_negative() {
    // Everything is hopelessly late, contributions clamp to zero
    let inst = instance(vec![2.0, 2.0], vec![(9, 0, 0), (9, 0, 0), (9, 0, 0)]);

    for schedule in &[
      find_solution_edd(&inst),
      find_solution_slack(&inst),
      find_solution_lpt(&inst),
    ] {
      assert!(calculate_early_work(&inst, schedule) >= 0.0);
    }
  }
}
