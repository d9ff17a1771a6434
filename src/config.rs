use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{ScenarioConfig, SimConfig, TieBreakConfig, WorkloadProfile};

#[derive(Parser, Debug)]
#[command(name = "queue-sim", about = "Queueing configuration simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every scenario over the configured trials and print statistics
    Run(RunArgs),
    /// Print the resolved configuration without running it
    ShowConfig(RunArgs),
    /// List supported output formats
    ListFormats,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(long, help = "TOML or JSON config file; flags override its values")]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub tasks: Option<usize>,
    #[arg(long)]
    pub mean_interval: Option<f64>,
    #[arg(long)]
    pub interval_std_dev: Option<f64>,
    #[arg(long)]
    pub mean_work: Option<f64>,
    #[arg(long)]
    pub work_std_dev: Option<f64>,
    #[arg(long)]
    pub static_servers: Option<usize>,
    #[arg(
        long = "scenario",
        help = "Repeatable scenario as dynamic_servers[:queue|:no-queue]"
    )]
    pub scenarios: Vec<String>,
    #[arg(long)]
    pub trials: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreakArg>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreakArg {
    Random,
    Stable,
}

impl From<TieBreakArg> for TieBreakConfig {
    fn from(value: TieBreakArg) -> Self {
        match value {
            TieBreakArg::Random => TieBreakConfig::Random,
            TieBreakArg::Stable => TieBreakConfig::Stable,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    #[default]
    Human,
    Table,
    Json,
}

impl FormatArg {
    pub fn all() -> [FormatArg; 3] {
        [FormatArg::Human, FormatArg::Table, FormatArg::Json]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormatArg::Human => "human",
            FormatArg::Table => "table",
            FormatArg::Json => "json",
        }
    }
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|err| Error::Cli(err.to_string()))
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Resolves the config file (or defaults) and applies flag overrides.
pub fn build_config(args: &RunArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    let overrides_workload = args.tasks.is_some()
        || args.mean_interval.is_some()
        || args.interval_std_dev.is_some()
        || args.mean_work.is_some()
        || args.work_std_dev.is_some();
    if overrides_workload {
        let WorkloadProfile::Gaussian(workload) = &mut config.workload else {
            return Err(Error::Cli(
                "workload flags require a gaussian workload".to_string(),
            ));
        };
        if let Some(tasks) = args.tasks {
            workload.tasks = tasks;
        }
        if let Some(value) = args.mean_interval {
            workload.mean_interval = value;
        }
        if let Some(value) = args.interval_std_dev {
            workload.interval_std_dev = value;
        }
        if let Some(value) = args.mean_work {
            workload.mean_work = value;
        }
        if let Some(value) = args.work_std_dev {
            workload.work_std_dev = value;
        }
    }

    if let Some(static_servers) = args.static_servers {
        config.static_servers = static_servers;
    }
    if !args.scenarios.is_empty() {
        config.scenarios = args
            .scenarios
            .iter()
            .map(|entry| parse_scenario(entry))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(tie_break) = args.tie_break {
        config.tie_break = tie_break.into();
    }

    Ok(config)
}

pub fn parse_scenario(input: &str) -> Result<ScenarioConfig> {
    let trimmed = input.trim();
    let mut parts = trimmed.split(':');
    let count = parts.next().unwrap_or("").trim();
    let queue = parts.next().map(str::trim);
    if parts.next().is_some() {
        return Err(Error::InvalidScenarioEntry(trimmed.to_string()));
    }

    let dynamic_servers: usize = count
        .parse()
        .map_err(|_| Error::InvalidScenarioEntry(trimmed.to_string()))?;
    let has_queue = match queue {
        None | Some("no-queue") => false,
        Some("queue") => true,
        Some(_) => return Err(Error::InvalidScenarioEntry(trimmed.to_string())),
    };

    Ok(ScenarioConfig {
        dynamic_servers,
        has_queue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GaussianWorkload;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be available")
            .as_nanos();
        path.push(format!("queue-sim-unit-{}.{}", nanos, extension));
        fs::write(&path, contents).expect("config write should succeed");
        path
    }

    #[test]
    fn parse_scenario_accepts_queue_suffixes() {
        assert_eq!(
            parse_scenario("2:queue").unwrap(),
            ScenarioConfig {
                dynamic_servers: 2,
                has_queue: true
            }
        );
        assert_eq!(
            parse_scenario(" 1:no-queue ").unwrap(),
            ScenarioConfig {
                dynamic_servers: 1,
                has_queue: false
            }
        );
        assert!(!parse_scenario("0").unwrap().has_queue);
    }

    #[test]
    fn parse_scenario_rejects_invalid_entries() {
        let err = parse_scenario("x:queue").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid scenario entry 'x:queue': expected dynamic_servers[:queue|:no-queue]"
        );
        assert!(parse_scenario("1:maybe").is_err());
        assert!(parse_scenario("1:queue:extra").is_err());
        assert!(parse_scenario("").is_err());
    }

    #[test]
    fn defaults_match_reference_experiment() {
        let config = build_config(&RunArgs::default()).unwrap();
        assert_eq!(config.static_servers, 4);
        assert_eq!(config.trials, 1);
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(
            config.workload,
            WorkloadProfile::Gaussian(GaussianWorkload::default())
        );
        assert_eq!(config.tie_break, TieBreakConfig::Random);
    }

    #[test]
    fn flags_override_workload_and_pool() {
        let args = RunArgs {
            tasks: Some(12),
            mean_work: Some(5.0),
            static_servers: Some(2),
            scenarios: vec!["1:queue".to_string()],
            seed: Some(3),
            tie_break: Some(TieBreakArg::Stable),
            ..RunArgs::default()
        };
        let config = build_config(&args).unwrap();
        let WorkloadProfile::Gaussian(workload) = &config.workload else {
            panic!("expected gaussian workload");
        };
        assert_eq!(workload.tasks, 12);
        assert_eq!(workload.mean_work, 5.0);
        assert_eq!(workload.mean_interval, 60.0);
        assert_eq!(config.static_servers, 2);
        assert_eq!(config.scenarios[0].dynamic_servers, 1);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.tie_break, TieBreakConfig::Stable);
    }

    #[test]
    fn toml_fixed_workload_loads() {
        let path = write_temp_config(
            r#"
static_servers = 2
tie_break = "stable"
workload = [
  { arrival = 0.0, work = 5.0 },
  { arrival = 1.5, work = 2.0 },
]
scenarios = [{ dynamic_servers = 1, has_queue = true }]
"#,
            "toml",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.static_servers, 2);
        assert_eq!(config.trials, 1);
        let WorkloadProfile::Fixed(specs) = &config.workload else {
            panic!("expected fixed workload");
        };
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].arrival, 1.5);
        assert!(config.scenarios[0].has_queue);
    }

    #[test]
    fn json_gaussian_workload_loads_with_defaults() {
        let path = write_temp_config(
            r#"{ "workload": { "tasks": 50, "mean_work": 100.0 }, "seed": 8 }"#,
            "json",
        );
        let config = load_config(&path).unwrap();
        let WorkloadProfile::Gaussian(workload) = &config.workload else {
            panic!("expected gaussian workload");
        };
        assert_eq!(workload.tasks, 50);
        assert_eq!(workload.mean_work, 100.0);
        assert_eq!(workload.work_std_dev, 60.0);
        assert_eq!(config.seed, Some(8));
    }

    #[test]
    fn workload_flags_reject_fixed_workload() {
        let path = write_temp_config("workload = [{ arrival = 0.0, work = 1.0 }]\n", "toml");
        let args = RunArgs {
            config: Some(path),
            tasks: Some(3),
            ..RunArgs::default()
        };
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn unsupported_extension_errors() {
        let path = write_temp_config("static_servers = 1", "yaml");
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.to_string(), "unsupported config format 'yaml'");
    }
}
