use ndarray::Array1;

pub type JobId = usize;
pub type Machine = usize;
pub type Time = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
  pub id: JobId,
  pub p: Time,
  pub r: Time,
  pub d: Time,
}

impl Job {
  pub fn slack(&self) -> Time {
    return self.d - self.r - self.p;
  }
}

#[derive(Debug, Clone)]
pub struct Instance {
  pub n_jobs: usize,
  pub speeds: Array1<f64>,
  pub jobs: Vec<Job>,
}

impl Instance {
  pub fn n_machines(&self) -> usize {
    return self.speeds.len();
  }

  // Job ids are 1-based in the instance format
  pub fn job(&self, id: JobId) -> &Job {
    return &self.jobs[id - 1];
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
  pub machines: Vec<Vec<JobId>>,
}

impl Schedule {
  pub fn empty(n_machines: usize) -> Self {
    return Schedule {
      machines: vec![Vec::new(); n_machines],
    };
  }

  pub fn job_ids(&self) -> Vec<JobId> {
    return self.machines.iter().flatten().cloned().collect();
  }
}
