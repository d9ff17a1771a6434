use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Error, Result};
use crate::models::{GaussianWorkload, TaskSpec, WorkloadProfile};
use crate::task::Task;

pub fn build_tasks<R: Rng + ?Sized>(profile: &WorkloadProfile, rng: &mut R) -> Result<Vec<Task>> {
    match profile {
        WorkloadProfile::Fixed(specs) => fixed_tasks(specs),
        WorkloadProfile::Gaussian(workload) => gaussian_tasks(workload, rng),
    }
}

pub fn fixed_tasks(specs: &[TaskSpec]) -> Result<Vec<Task>> {
    if specs.is_empty() {
        return Err(Error::TasksZero);
    }
    Ok(specs
        .iter()
        .enumerate()
        .map(|(id, spec)| Task::new(id, spec.arrival, spec.work))
        .collect())
}

pub fn gaussian_tasks<R: Rng + ?Sized>(workload: &GaussianWorkload, rng: &mut R) -> Result<Vec<Task>> {
    if workload.tasks == 0 {
        return Err(Error::TasksZero);
    }
    let interval = normal("interval", workload.mean_interval, workload.interval_std_dev)?;
    let work = normal("work", workload.mean_work, workload.work_std_dev)?;

    let mut arrival = 0.0;
    let mut tasks = Vec::with_capacity(workload.tasks);
    for id in 0..workload.tasks {
        arrival += positive_duration(&interval, rng);
        tasks.push(Task::new(id, arrival, positive_duration(&work, rng)));
    }
    Ok(tasks)
}

fn normal(name: &'static str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() {
        return Err(Error::InvalidDistribution {
            name,
            reason: format!("mean must be finite (got {})", mean),
        });
    }
    if !(std_dev >= 0.0 && std_dev.is_finite()) {
        return Err(Error::InvalidDistribution {
            name,
            reason: format!(
                "standard deviation must be finite and non-negative (got {})",
                std_dev
            ),
        });
    }
    Normal::new(mean, std_dev).map_err(|err| Error::InvalidDistribution {
        name,
        reason: err.to_string(),
    })
}

/// Whole time units, at least 1.
fn positive_duration<R: Rng + ?Sized>(dist: &Normal<f64>, rng: &mut R) -> f64 {
    dist.sample(rng).round().abs() + 1.0
}
