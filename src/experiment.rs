use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::{simulate, StableRng};
use crate::error::{Error, Result};
use crate::models::{PoolConfig, SimConfig, TieBreakConfig};
use crate::statistics::{QueueStatistics, TrialAverager};
use crate::workload::build_tasks;

#[derive(Clone, Debug, Serialize)]
pub struct ExperimentReport {
    pub metadata: RunMetadata,
    pub scenarios: Vec<ScenarioReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetadata {
    pub trials: usize,
    pub tie_break: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub pool: PoolConfig,
    pub statistics: QueueStatistics,
}

/// Runs every scenario against the same task set in each trial and averages
/// the statistics per scenario.
pub fn run_experiment(config: &SimConfig) -> Result<ExperimentReport> {
    validate_config(config)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut stable = StableRng;
    let pools: Vec<PoolConfig> = config
        .scenarios
        .iter()
        .map(|scenario| config.pool_for(scenario))
        .collect();
    let mut averagers = vec![TrialAverager::default(); pools.len()];

    info!(
        trials = config.trials,
        scenarios = pools.len(),
        "experiment started"
    );
    for trial in 0..config.trials {
        let mut tasks = build_tasks(&config.workload, &mut rng)?;
        debug!(trial, tasks = tasks.len(), "workload generated");

        for (pool, averager) in pools.iter().zip(averagers.iter_mut()) {
            let tie_rng: &mut dyn RngCore = match config.tie_break {
                TieBreakConfig::Stable => &mut stable,
                TieBreakConfig::Random => &mut rng,
            };
            let run = simulate(&mut tasks, *pool, tie_rng)?;
            let stats = run.statistics(&tasks)?;
            debug!(
                trial,
                %pool,
                waiting_probability = stats.waiting_probability,
                "scenario finished"
            );
            averager.add(stats)?;
        }
    }

    let scenarios = pools
        .into_iter()
        .zip(averagers)
        .map(|(pool, averager)| {
            Ok(ScenarioReport {
                pool,
                statistics: averager.average()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!("experiment finished");

    Ok(ExperimentReport {
        metadata: RunMetadata {
            trials: config.trials,
            tie_break: config.tie_break.label_with_seed(config.seed),
        },
        scenarios,
    })
}

pub fn validate_config(config: &SimConfig) -> Result<()> {
    if config.trials == 0 {
        return Err(Error::TrialsZero);
    }
    if config.scenarios.is_empty() {
        return Err(Error::EmptyScenarios);
    }
    if config
        .scenarios
        .iter()
        .any(|scenario| config.pool_for(scenario).server_count() == 0)
    {
        return Err(Error::NoServers);
    }
    Ok(())
}
