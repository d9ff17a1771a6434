use queue_sim::config::{self, Command, FormatArg, RunArgs};
use queue_sim::error::Result;
use queue_sim::experiment::{self, run_experiment};
use queue_sim::logging::init_logging;
use queue_sim::models::{SimConfig, WorkloadProfile};
use queue_sim::output::{Formatter, HumanFormatter, JsonFormatter, TableFormatter};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    match cli.command {
        Command::Run(args) => run_command(&args),
        Command::ShowConfig(args) => {
            let config = config::build_config(&args)?;
            experiment::validate_config(&config)?;
            print!("{}", describe_config(&config));
            Ok(())
        }
        Command::ListFormats => {
            for format in FormatArg::all() {
                println!("{}", format.name());
            }
            Ok(())
        }
    }
}

fn run_command(args: &RunArgs) -> Result<()> {
    init_logging(&args.log_level);
    let config = config::build_config(args)?;
    let report = run_experiment(&config)?;

    let formatter = formatter_for(&args.format);
    print!("{}", formatter.write(&report)?);
    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Table => Box::new(TableFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}

fn describe_config(config: &SimConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("Static servers: {}\n", config.static_servers));
    out.push_str(&format!("Trials: {}\n", config.trials));
    out.push_str(&format!(
        "Tie-break: {}\n",
        config.tie_break.label_with_seed(config.seed)
    ));
    match &config.workload {
        WorkloadProfile::Fixed(specs) => {
            out.push_str(&format!("Workload: fixed ({} tasks)\n", specs.len()));
        }
        WorkloadProfile::Gaussian(workload) => {
            out.push_str(&format!(
                "Workload: gaussian (tasks: {}, interval: {} sd {}, work: {} sd {})\n",
                workload.tasks,
                workload.mean_interval,
                workload.interval_std_dev,
                workload.mean_work,
                workload.work_std_dev
            ));
        }
    }
    out.push_str("Scenarios:\n");
    for scenario in &config.scenarios {
        out.push_str(&format!("- {}\n", config.pool_for(scenario)));
    }
    out
}
