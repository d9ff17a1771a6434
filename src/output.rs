use crate::error::{Error, Result};
use crate::experiment::{ExperimentReport, ScenarioReport};

pub trait Formatter {
    fn write(&self, report: &ExperimentReport) -> Result<String>;
}

/// Every metric of every scenario, one per line.
pub struct HumanFormatter;

/// Tab-separated headline metrics, one row per scenario.
pub struct TableFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, report: &ExperimentReport) -> Result<String> {
        let mut out = String::new();
        out.push_str("Metadata:\n");
        push_line(&mut out, format!("trials: {}", report.metadata.trials));
        push_line(
            &mut out,
            format!("tie_break: {}", report.metadata.tie_break),
        );
        for (idx, scenario) in report.scenarios.iter().enumerate() {
            write_scenario(&mut out, idx + 1, scenario);
        }
        Ok(out)
    }
}

impl Formatter for TableFormatter {
    fn write(&self, report: &ExperimentReport) -> Result<String> {
        let mut out = String::from(
            "scenario\tstatic\tdynamic\tqueue\twaiting_probability\tavg_waiting\tavg_waiting_waited\tavg_queue_size\tavg_idle_probability\n",
        );
        for (idx, scenario) in report.scenarios.iter().enumerate() {
            let stats = &scenario.statistics;
            push_line(
                &mut out,
                format!(
                    "{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
                    idx + 1,
                    scenario.pool.static_servers,
                    scenario.pool.dynamic_servers,
                    scenario.pool.has_queue,
                    stats.waiting_probability,
                    stats.average_waiting,
                    stats.average_waiting_waited,
                    stats.average_queue_size,
                    stats.average_idle_probability
                ),
            );
        }
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, report: &ExperimentReport) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(report).map_err(|err| Error::Render(err.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

fn write_scenario(out: &mut String, number: usize, scenario: &ScenarioReport) {
    let stats = &scenario.statistics;
    push_line(out, format!("Scenario {}: {}", number, scenario.pool));
    push_line(out, format!("tasks: {}", stats.tasks));
    push_line(
        out,
        format!("simulation_time: {:.4}", stats.simulation_time),
    );
    push_line(
        out,
        format!("waiting_probability: {:.4}", stats.waiting_probability),
    );
    push_line(out, format!("avg_waiting: {:.4}", stats.average_waiting));
    push_line(
        out,
        format!("avg_waiting_waited: {:.4}", stats.average_waiting_waited),
    );
    push_line(
        out,
        format!("avg_interval: {:.4}", stats.average_interval),
    );
    push_line(
        out,
        format!("avg_work_per_task: {:.4}", stats.average_work_per_task),
    );
    push_line(
        out,
        format!("avg_queue_size: {:.4}", stats.average_queue_size),
    );
    push_line(
        out,
        format!("avg_idle_probability: {:.4}", stats.average_idle_probability),
    );
    push_line(
        out,
        format!(
            "idle_probability: {}",
            indexed(&stats.idle_probability_by_server)
        ),
    );
    push_line(
        out,
        format!(
            "busy_servers_duration: {}",
            indexed(&stats.busy_servers_duration)
        ),
    );
}

fn indexed(values: &[f64]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| format!("{}: {:.4}", idx, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}
