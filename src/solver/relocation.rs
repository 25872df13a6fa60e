use crate::data::{Instance, Schedule};
use crate::solver::{calculate_early_work, Budget};
use log::{debug, trace};

const IMPROVEMENT_TOLERANCE: f64 = 0.01;
const PHASE_BUDGET: f64 = 0.85;

// First-improvement relocation: scan (source machine, position, destination
// machine) in ascending order, move the job to the end of the destination
// sequence and accept the first trial that beats the current value by more
// than the tolerance. Accepting restarts the scan from the new schedule.
//
// Trials mutate the schedule in place and are undone on rejection, so a
// trial costs one criterion evaluation but no schedule copy.
pub fn improve_solution(inst: &Instance, mut schedule: Schedule, budget: &Budget) -> Schedule {
  let n_machines = inst.n_machines();
  let mut current_value = calculate_early_work(inst, &schedule);
  debug!("Relocation starting at {}", current_value);

  let mut improved = true;
  while improved && !budget.expired(PHASE_BUDGET) {
    improved = false;

    'scan: for from_m in 0..n_machines {
      if budget.expired(PHASE_BUDGET) {
        break;
      }

      for i in 0..schedule.machines[from_m].len() {
        if budget.expired(PHASE_BUDGET) {
          break 'scan;
        }

        for to_m in 0..n_machines {
          if to_m == from_m {
            continue;
          }

          let job_id = schedule.machines[from_m].remove(i);
          schedule.machines[to_m].push(job_id);

          let new_value = calculate_early_work(inst, &schedule);
          if new_value > current_value + IMPROVEMENT_TOLERANCE {
            trace!(
              "Relocated job {} from machine {} to {} ({} -> {})",
              job_id,
              from_m,
              to_m,
              current_value,
              new_value
            );
            current_value = new_value;
            improved = true;
            break 'scan;
          }

          schedule.machines[to_m].pop();
          schedule.machines[from_m].insert(i, job_id);
        }
      }
    }
  }

  debug!("Relocation finished at {}", current_value);
  return schedule;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::{Job, Time};
  use crate::solver::verify_schedule;
  use ndarray::arr1;
  use std::time::Duration;

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

  fn generous_budget() -> Budget {
    return Budget::new(Duration::from_secs(60));
  }

  #[test]
  fn moves_job_off_an_overloaded_machine() {
    let inst = instance(vec![1.0, 1.0], vec![(4, 0, 4), (4, 0, 4)]);
    let schedule = Schedule {
      machines: vec![vec![1, 2], vec![]],
    };

    let improved = improve_solution(&inst, schedule, &generous_budget());

    // The first improving trial moves job 1 to the idle machine, leaving
    // both jobs fully early on machines of their own
    assert_eq!(improved.machines, vec![vec![2], vec![1]]);
    let value = calculate_early_work(&inst, &improved);
    assert!((value - 8.0).abs() < 1e-12);
  }

  #[test]
  fn never_decreases_the_criterion() {
    let inst = instance(
      vec![1.0, 1.4, 2.0],
      vec![(7, 0, 9), (3, 2, 4), (5, 1, 20), (2, 0, 3), (4, 6, 15), (6, 0, 8)],
    );
    let schedule = Schedule {
      machines: vec![vec![1, 2, 3, 4, 5, 6], vec![], vec![]],
    };
    let before = calculate_early_work(&inst, &schedule);

    let improved = improve_solution(&inst, schedule, &generous_budget());

    assert!(calculate_early_work(&inst, &improved) >= before);
    assert!(verify_schedule(&inst, &improved).is_ok());
  }

  #[test]
  fn returns_input_unchanged_when_budget_is_spent() {
    let inst = instance(vec![1.0, 1.0], vec![(4, 0, 4), (4, 0, 4)]);
    let schedule = Schedule {
      machines: vec![vec![1, 2], vec![]],
    };

    let result = improve_solution(&inst, schedule.clone(), &Budget::new(Duration::from_secs(0)));
    assert_eq!(result, schedule);
  }
}
