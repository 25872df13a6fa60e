use crate::data::{Instance, Machine, Schedule};
use crate::solver::{calculate_early_work, Budget};
use log::{debug, trace};
use rand::Rng;

const INITIAL_TEMPERATURE: f64 = 100.0;
const COOLING_RATE: f64 = 0.95;
const PHASE_BUDGET: f64 = 0.95;

// Inverse of a perturbation, recorded so a rejected move can be undone
// without ever copying the working schedule
enum Perturbation {
  Relocate {
    from: Machine,
    to: Machine,
    idx: usize,
  },
  Swap {
    machine: Machine,
    idx: usize,
  },
  Noop,
}

// Annealing refinement on top of the local search result. The working state
// may regress under Boltzmann acceptance, but the tracked best never does
// and is what gets returned. The rng handle is seeded by the caller so runs
// are reproducible.
pub fn improve_solution<R: Rng>(
  inst: &Instance,
  schedule: Schedule,
  budget: &Budget,
  rng: &mut R,
) -> Schedule {
  let mut current = schedule;
  let mut current_value = calculate_early_work(inst, &current);
  let mut best = current.clone();
  let mut best_value = current_value;

  let max_iterations = max_iterations_for(inst.n_jobs);
  let mut temperature = INITIAL_TEMPERATURE;
  debug!(
    "Annealing starting at {} ({} iterations max)",
    current_value, max_iterations
  );

  for iteration in 0..max_iterations {
    if budget.expired(PHASE_BUDGET) {
      debug!("Annealing stopping on budget at iteration {}", iteration);
      break;
    }

    let perturbation = perturb(&mut current, inst.n_machines(), rng);
    let new_value = calculate_early_work(inst, &current);
    let delta = new_value - current_value;

    let acceptance_threshold = f64::min(1.0, (delta / temperature).exp());
    if delta > 0.0 || rng.gen_range(0.0, 1.0) < acceptance_threshold {
      current_value = new_value;

      if current_value > best_value {
        best = current.clone();
        best_value = current_value;
        trace!(
          "Improved best to {} (iteration {}, temp {})",
          best_value,
          iteration,
          temperature
        );
      }
    } else {
      undo(&mut current, &perturbation);
    }

    temperature *= COOLING_RATE;
  }

  debug!("Annealing finished at {}", best_value);
  return best;
}

fn perturb<R: Rng>(schedule: &mut Schedule, n_machines: usize, rng: &mut R) -> Perturbation {
  if rng.gen_range(0.0, 1.0) < 0.5 {
    // Relocate a random job to the end of a random machine's sequence
    let from = rng.gen_range(0, n_machines);
    if schedule.machines[from].is_empty() {
      return Perturbation::Noop;
    }
    let to = rng.gen_range(0, n_machines);
    if from == to {
      return Perturbation::Noop;
    }

    let idx = rng.gen_range(0, schedule.machines[from].len());
    let job_id = schedule.machines[from].remove(idx);
    schedule.machines[to].push(job_id);
    return Perturbation::Relocate {
      from: from,
      to: to,
      idx: idx,
    };
  }

  // Swap a random adjacent pair on a random machine
  let machine = rng.gen_range(0, n_machines);
  if schedule.machines[machine].len() < 2 {
    return Perturbation::Noop;
  }

  let idx = rng.gen_range(0, schedule.machines[machine].len() - 1);
  schedule.machines[machine].swap(idx, idx + 1);
  return Perturbation::Swap {
    machine: machine,
    idx: idx,
  };
}

fn undo(schedule: &mut Schedule, perturbation: &Perturbation) {
  match perturbation {
    Perturbation::Relocate { from, to, idx } => {
      let job_id = schedule.machines[*to].pop().expect("Relocated job missing");
      schedule.machines[*from].insert(*idx, job_id);
    }
    Perturbation::Swap { machine, idx } => {
      schedule.machines[*machine].swap(*idx, *idx + 1);
    }
    Perturbation::Noop => {}
  }
}

// Every iteration pays a full O(n) evaluation, so the cap shrinks for large
// instances
fn max_iterations_for(n_jobs: usize) -> u32 {
  if n_jobs > 300 {
    return 100;
  }
  return 200;
}
