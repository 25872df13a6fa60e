use crate::data::{Instance, Schedule};
use crate::parser::parse_solution;
use crate::solver::{calculate_early_work, round_criterion, verify_schedule};
use std::error::Error;

// Outcome of checking a solution file against its instance. Invalid and
// Mismatch are diagnostics about the producer, not runtime faults, so they
// are values rather than errors; Err is reserved for unparseable files.
#[derive(Debug, PartialEq)]
pub enum Verdict {
  Pass { value: i64 },
  Mismatch { computed: i64, reported: i64 },
  Invalid { reason: String },
}

// Independently recomputes the criterion with the producer's simulation and
// rounding rules and re-checks the permutation invariant.
pub fn verify_output(inst: &Instance, solution_contents: &str) -> Result<Verdict, Box<dyn Error>> {
  let (reported, machines) = parse_solution(solution_contents, inst.n_machines())?;
  let schedule = Schedule { machines: machines };

  if let Err(err) = verify_schedule(inst, &schedule) {
    return Ok(Verdict::Invalid {
      reason: err.to_string(),
    });
  }

  let computed = round_criterion(calculate_early_work(inst, &schedule));
  if computed != reported {
    return Ok(Verdict::Mismatch {
      computed: computed,
      reported: reported,
    });
  }

  return Ok(Verdict::Pass { value: computed });
}
