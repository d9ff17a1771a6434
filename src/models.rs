use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub workload: WorkloadProfile,
    #[serde(default = "default_static_servers")]
    pub static_servers: usize,
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default)]
    pub tie_break: TieBreakConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            workload: WorkloadProfile::default(),
            static_servers: default_static_servers(),
            scenarios: default_scenarios(),
            trials: default_trials(),
            tie_break: TieBreakConfig::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn pool_for(&self, scenario: &ScenarioConfig) -> PoolConfig {
        PoolConfig {
            static_servers: self.static_servers,
            dynamic_servers: scenario.dynamic_servers,
            has_queue: scenario.has_queue,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum WorkloadProfile {
    Fixed(Vec<TaskSpec>),
    Gaussian(GaussianWorkload),
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        WorkloadProfile::Gaussian(GaussianWorkload::default())
    }
}

/// Inter-arrival and work durations drawn as `|round(N(mean, sd))| + 1`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GaussianWorkload {
    #[serde(default = "default_task_count")]
    pub tasks: usize,
    #[serde(default = "default_mean_interval")]
    pub mean_interval: f64,
    #[serde(default = "default_interval_std_dev")]
    pub interval_std_dev: f64,
    #[serde(default = "default_mean_work")]
    pub mean_work: f64,
    #[serde(default = "default_work_std_dev")]
    pub work_std_dev: f64,
}

impl Default for GaussianWorkload {
    fn default() -> Self {
        Self {
            tasks: default_task_count(),
            mean_interval: default_mean_interval(),
            interval_std_dev: default_interval_std_dev(),
            mean_work: default_mean_work(),
            work_std_dev: default_work_std_dev(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct TaskSpec {
    pub arrival: f64,
    pub work: f64,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub dynamic_servers: usize,
    #[serde(default)]
    pub has_queue: bool,
}

/// Server pool for a single run.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PoolConfig {
    pub static_servers: usize,
    pub dynamic_servers: usize,
    pub has_queue: bool,
}

impl PoolConfig {
    pub fn server_count(&self) -> usize {
        self.static_servers + self.dynamic_servers
    }
}

impl fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "static={} dynamic={} queue={}",
            self.static_servers, self.dynamic_servers, self.has_queue
        )
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreakConfig {
    #[default]
    Random,
    Stable,
}

impl TieBreakConfig {
    pub fn label_with_seed(&self, seed: Option<u64>) -> String {
        match (self, seed) {
            (TieBreakConfig::Stable, _) => "stable".to_string(),
            (TieBreakConfig::Random, Some(seed)) => format!("random({})", seed),
            (TieBreakConfig::Random, None) => "random".to_string(),
        }
    }
}

fn default_static_servers() -> usize {
    4
}

fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig {
            dynamic_servers: 0,
            has_queue: false,
        },
        ScenarioConfig {
            dynamic_servers: 0,
            has_queue: true,
        },
    ]
}

fn default_trials() -> usize {
    1
}

fn default_task_count() -> usize {
    300
}

fn default_mean_interval() -> f64 {
    60.0
}

fn default_interval_std_dev() -> f64 {
    15.0
}

fn default_mean_work() -> f64 {
    220.0
}

fn default_work_std_dev() -> f64 {
    60.0
}
