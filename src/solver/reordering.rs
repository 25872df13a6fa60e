use crate::data::{Instance, Schedule};
use crate::solver::{calculate_early_work, Budget};
use log::{debug, trace};

const IMPROVEMENT_TOLERANCE: f64 = 0.01;
const PHASE_BUDGET: f64 = 0.9;

// Within-machine refinement: first-improvement swaps of adjacent jobs, no
// cross-machine movement. Bounded by a pass cap on top of the time budget
// since adjacent swaps converge slowly on long sequences.
pub fn improve_solution(inst: &Instance, mut schedule: Schedule, budget: &Budget) -> Schedule {
  let max_passes = max_passes_for(inst.n_jobs);
  let mut current_value = calculate_early_work(inst, &schedule);
  debug!("Reordering starting at {}", current_value);

  let mut passes = 0;
  let mut improved = true;
  while improved && passes < max_passes && !budget.expired(PHASE_BUDGET) {
    improved = false;
    passes += 1;

    'scan: for machine in 0..inst.n_machines() {
      if budget.expired(PHASE_BUDGET) {
        break;
      }
      if schedule.machines[machine].len() < 2 {
        continue;
      }

      for i in 0..schedule.machines[machine].len() - 1 {
        schedule.machines[machine].swap(i, i + 1);

        let new_value = calculate_early_work(inst, &schedule);
        if new_value > current_value + IMPROVEMENT_TOLERANCE {
          trace!(
            "Swapped positions {} and {} on machine {} ({} -> {})",
            i,
            i + 1,
            machine,
            current_value,
            new_value
          );
          current_value = new_value;
          improved = true;
          break 'scan;
        }

        schedule.machines[machine].swap(i, i + 1);
      }
    }
  }

  debug!("Reordering finished at {} after {} passes", current_value, passes);
  return schedule;
}

// Each trial costs a full criterion evaluation, so large instances get a
// smaller pass ceiling
fn max_passes_for(n_jobs: usize) -> u32 {
  if n_jobs > 300 {
    return 25;
  }
  return 50;
}
