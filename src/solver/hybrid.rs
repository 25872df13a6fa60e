use crate::data::{Instance, Schedule};
use crate::solver::{
  calculate_early_work, greedy, relocation, reordering, simulated_annealing, verify_schedule,
  Budget,
};
use log::{debug, error, info, warn};
use rand::SeedableRng;
use std::time::Duration;

pub struct Config {
  pub time_limit: Duration,
  pub seed: u64,
}

// Phase checkpoints as fractions of the total time limit
const EDD_CHECKPOINT: f64 = 0.1;
const SLACK_CHECKPOINT: f64 = 0.2;
const LPT_CHECKPOINT: f64 = 0.3;
const RELOCATION_CHECKPOINT: f64 = 0.5;
const REORDERING_CHECKPOINT: f64 = 0.7;
const ANNEALING_CHECKPOINT: f64 = 0.95;

// Runs construction, both local searches and annealing against one shared
// deadline and always hands back a schedule holding the permutation
// invariant.
pub fn find_solution(inst: &Instance, config: &Config) -> Schedule {
  let budget = Budget::new(config.time_limit);

  let constructions: [(&str, fn(&Instance) -> Schedule, f64); 3] = [
    ("edd", greedy::find_solution_edd, EDD_CHECKPOINT),
    ("slack", greedy::find_solution_slack, SLACK_CHECKPOINT),
    ("lpt", greedy::find_solution_lpt, LPT_CHECKPOINT),
  ];

  let mut best: Option<(Schedule, f64)> = None;
  for (name, construct, checkpoint) in &constructions {
    if budget.expired(*checkpoint) {
      debug!("Skipping {} construction, checkpoint passed", name);
      continue;
    }

    let candidate = construct(inst);
    match verify_schedule(inst, &candidate) {
      Ok(()) => {
        let value = calculate_early_work(inst, &candidate);
        debug!("Construction {} scored {}", name, value);
        if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
          best = Some((candidate, value));
        }
      }
      Err(err) => {
        warn!("Construction {} produced an invalid schedule: {}", name, err);
      }
    }
  }

  let mut schedule = match best {
    Some((schedule, value)) => {
      debug!("Best construction scored {}", value);
      schedule
    }
    None => {
      // Guaranteed-valid seed when nothing else survived validation
      warn!("No valid construction, seeding with edd");
      greedy::find_solution_edd(inst)
    }
  };

  if !budget.expired(RELOCATION_CHECKPOINT) {
    schedule = relocation::improve_solution(inst, schedule, &budget);
  }
  if !budget.expired(REORDERING_CHECKPOINT) {
    schedule = reordering::improve_solution(inst, schedule, &budget);
  }
  if !budget.expired(ANNEALING_CHECKPOINT) {
    let mut rng = rand_chacha::ChaChaRng::seed_from_u64(config.seed);
    schedule = simulated_annealing::improve_solution(inst, schedule, &budget, &mut rng);
  }

  let schedule = ensure_valid(inst, schedule);
  info!(
    "Finished at {} after {:?}",
    calculate_early_work(inst, &schedule),
    budget.elapsed()
  );

  return schedule;
}

// Hard safety net: a schedule that fails validation is discarded for a fresh
// edd construction, which is valid by construction.
pub fn ensure_valid(inst: &Instance, schedule: Schedule) -> Schedule {
  match verify_schedule(inst, &schedule) {
    Ok(()) => {
      return schedule;
    }
    Err(err) => {
      error!("Final schedule failed validation ({}), regenerating with edd", err);
      return greedy::find_solution_edd(inst);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::{Job, Time};
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

  fn twelve_job_instance() -> Instance {
    return instance(
      vec![1.0, 1.2, 1.5, 1.7, 2.0],
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
        (5, 0, 11),
        (3, 4, 16),
      ],
    );
  }

  #[test]
  fn returns_a_valid_schedule() {
    let inst = twelve_job_instance();
    let config = Config {
      time_limit: Duration::from_millis(500),
      seed: 1,
    };

    let schedule = find_solution(&inst, &config);
    assert!(verify_schedule(&inst, &schedule).is_ok());
  }

  #[test]
  fn never_ends_below_the_best_construction() {
    let inst = twelve_job_instance();
    let config = Config {
      time_limit: Duration::from_millis(500),
      seed: 2,
    };

    let schedule = find_solution(&inst, &config);
    let value = calculate_early_work(&inst, &schedule);

    for construction in &[
      greedy::find_solution_edd(&inst),
      greedy::find_solution_slack(&inst),
      greedy::find_solution_lpt(&inst),
    ] {
      assert!(value >= calculate_early_work(&inst, construction) - 1e-9);
    }
  }

  #[test]
  fn exhausted_budget_still_yields_a_valid_schedule() {
    // All checkpoints are already passed, so the unconditional edd seed is
    // the only thing that runs
    let inst = twelve_job_instance();
    let config = Config {
      time_limit: Duration::from_secs(0),
      seed: 3,
    };

    let schedule = find_solution(&inst, &config);
    assert!(verify_schedule(&inst, &schedule).is_ok());
  }

  #[test]
  fn corrupted_schedules_fall_back_to_edd() {
    let inst = twelve_job_instance();

    let empty = Schedule::empty(inst.n_machines());
    let recovered = ensure_valid(&inst, empty);
    assert!(verify_schedule(&inst, &recovered).is_ok());

    let mut duplicated = greedy::find_solution_edd(&inst);
    duplicated.machines[0].push(1);
    let recovered = ensure_valid(&inst, duplicated);
    assert!(verify_schedule(&inst, &recovered).is_ok());
  }
}
