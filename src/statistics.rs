//! Aggregate metrics for one finished run, and their averaging across trials.
//!
//! Two sweep-line passes derive the time-weighted metrics: one over waiting
//! intervals (average queue size) and one over service intervals (how long
//! the pool spent at each number of busy servers).

use std::collections::BTreeMap;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::{SimTime, Timeline};
use crate::server::{Server, ServerTier};
use crate::task::Task;

/// Waiting durations at or below this are treated as no wait, and sweep
/// segments at or below it are not accumulated.
pub const WAIT_TOLERANCE: f64 = 0.0001;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueStatistics {
    pub tasks: usize,
    pub static_servers: usize,
    pub dynamic_servers: usize,
    pub has_queue: bool,
    pub simulation_time: f64,
    pub waiting_probability: f64,
    pub average_waiting: f64,
    pub average_waiting_waited: f64,
    pub average_interval: f64,
    pub average_work_per_task: f64,
    pub average_queue_size: f64,
    pub idle_probability_by_server: Vec<f64>,
    pub average_idle_probability: f64,
    /// Index is the number of simultaneously busy servers.
    pub busy_servers_duration: Vec<f64>,
    /// Busy server count in effect from each time on. Kept from the first
    /// run when statistics are accumulated.
    #[serde(serialize_with = "serialize_time_series")]
    pub busy_servers_by_time: BTreeMap<SimTime, usize>,
}

impl QueueStatistics {
    pub fn compute(tasks: &[Task], timeline: &Timeline, servers: &[Server]) -> Result<Self> {
        if tasks.is_empty() {
            return Err(Error::EmptyTasks);
        }
        if servers.is_empty() {
            return Err(Error::NoServers);
        }
        let unserved = tasks.iter().filter(|task| !task.is_served()).count();
        if unserved > 0 {
            return Err(Error::UnservedTasks(unserved));
        }

        let count = tasks.len() as f64;
        let simulation_time = timeline
            .last_time()
            .map(SimTime::as_f64)
            .ok_or(Error::EmptyTasks)?;

        let waited: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.waiting() > WAIT_TOLERANCE)
            .collect();
        let waiting_probability = waited.len() as f64 / count;
        let average_waiting = tasks.iter().map(Task::waiting).sum::<f64>() / count;
        let average_waiting_waited = if waited.is_empty() {
            0.0
        } else {
            waited.iter().map(|task| task.waiting()).sum::<f64>() / waited.len() as f64
        };

        let mut previous_arrival = 0.0;
        let mut interval_sum = 0.0;
        for task in tasks {
            interval_sum += task.arrival() - previous_arrival;
            previous_arrival = task.arrival();
        }
        let average_interval = interval_sum / count;

        let idle_probability_by_server: Vec<f64> = servers
            .iter()
            .map(|server| 1.0 - server.busy_time() / simulation_time)
            .collect();
        let average_idle_probability =
            idle_probability_by_server.iter().sum::<f64>() / servers.len() as f64;
        let total_busy: f64 = servers.iter().map(Server::busy_time).sum();

        let average_queue_size = time_weighted_queue_size(&waited)?;
        let (busy_servers_duration, busy_servers_by_time) =
            busy_server_distribution(tasks, servers.len())?;

        let static_servers = servers
            .iter()
            .filter(|server| server.tier() == ServerTier::Static)
            .count();

        debug!(
            simulation_time,
            waiting_probability, average_queue_size, "statistics computed"
        );

        Ok(Self {
            tasks: tasks.len(),
            static_servers,
            dynamic_servers: servers.len() - static_servers,
            has_queue: servers[0].has_queue(),
            simulation_time,
            waiting_probability,
            average_waiting,
            average_waiting_waited,
            average_interval,
            average_work_per_task: total_busy / count,
            average_queue_size,
            idle_probability_by_server,
            average_idle_probability,
            busy_servers_duration,
            busy_servers_by_time,
        })
    }

    /// Adds `other` field by field. Both sides must describe the same pool.
    pub fn accumulate(&mut self, other: &QueueStatistics) -> Result<()> {
        if self.idle_probability_by_server.len() != other.idle_probability_by_server.len()
            || self.busy_servers_duration.len() != other.busy_servers_duration.len()
        {
            return Err(Error::StatisticsMismatch(format!(
                "{} servers vs {} servers",
                self.idle_probability_by_server.len(),
                other.idle_probability_by_server.len()
            )));
        }

        self.simulation_time += other.simulation_time;
        self.waiting_probability += other.waiting_probability;
        self.average_waiting += other.average_waiting;
        self.average_waiting_waited += other.average_waiting_waited;
        self.average_interval += other.average_interval;
        self.average_work_per_task += other.average_work_per_task;
        self.average_queue_size += other.average_queue_size;
        self.average_idle_probability += other.average_idle_probability;
        add_each(
            &mut self.idle_probability_by_server,
            &other.idle_probability_by_server,
        );
        add_each(&mut self.busy_servers_duration, &other.busy_servers_duration);
        Ok(())
    }

    pub fn divided_by(&self, trials: usize) -> Result<Self> {
        if trials == 0 {
            return Err(Error::TrialsZero);
        }
        let n = trials as f64;
        let mut averaged = self.clone();
        averaged.simulation_time /= n;
        averaged.waiting_probability /= n;
        averaged.average_waiting /= n;
        averaged.average_waiting_waited /= n;
        averaged.average_interval /= n;
        averaged.average_work_per_task /= n;
        averaged.average_queue_size /= n;
        averaged.average_idle_probability /= n;
        averaged
            .idle_probability_by_server
            .iter_mut()
            .for_each(|value| *value /= n);
        averaged
            .busy_servers_duration
            .iter_mut()
            .for_each(|value| *value /= n);
        Ok(averaged)
    }
}

/// Running sum of per-trial statistics for one configuration.
#[derive(Clone, Debug, Default)]
pub struct TrialAverager {
    total: Option<QueueStatistics>,
    trials: usize,
}

impl TrialAverager {
    pub fn add(&mut self, stats: QueueStatistics) -> Result<()> {
        match self.total.as_mut() {
            Some(total) => total.accumulate(&stats)?,
            None => self.total = Some(stats),
        }
        self.trials += 1;
        Ok(())
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn average(&self) -> Result<QueueStatistics> {
        match &self.total {
            Some(total) => total.divided_by(self.trials),
            None => Err(Error::TrialsZero),
        }
    }
}

fn add_each(target: &mut [f64], other: &[f64]) {
    for (value, extra) in target.iter_mut().zip(other) {
        *value += extra;
    }
}

/// Time-weighted number of simultaneously waiting tasks, over the span from
/// 0 to the last end of wait. Zero when nothing waited.
fn time_weighted_queue_size(waited: &[&Task]) -> Result<f64> {
    if waited.is_empty() {
        return Ok(0.0);
    }
    let starts = waited.iter().map(|task| task.arrival()).collect();
    let ends = waited.iter().map(|task| task.service_start()).collect();

    let mut weighted = 0.0;
    let last = sweep("waiting", starts, ends, |step| {
        weighted += step.active as f64 * (step.to - step.from);
        Ok(())
    })?;

    if last <= 0.0 {
        return Ok(0.0);
    }
    Ok(weighted / last)
}

fn busy_server_distribution(
    tasks: &[Task],
    server_count: usize,
) -> Result<(Vec<f64>, BTreeMap<SimTime, usize>)> {
    let mut durations = vec![0.0; server_count + 1];
    let mut by_time = BTreeMap::new();
    let starts = tasks.iter().map(Task::service_start).collect();
    let ends = tasks.iter().map(Task::departure_time).collect();

    let last = sweep("busy-server", starts, ends, |step| {
        let duration = step.to - step.from;
        if duration > WAIT_TOLERANCE {
            let slot = durations
                .get_mut(step.active)
                .ok_or(Error::BusyCountOverflow {
                    count: step.active,
                    servers: server_count,
                })?;
            *slot += duration;
        }
        by_time.insert(SimTime::new(step.from), step.active);
        Ok(())
    })?;
    by_time.insert(SimTime::new(last), 0);

    Ok((durations, by_time))
}

#[derive(Clone, Copy, Debug)]
struct SweepStep {
    from: f64,
    to: f64,
    active: usize,
}

/// Merges sorted interval starts and ends, calling `visit` with the count of
/// open intervals over each gap between consecutive boundaries. Starts win
/// ties. Returns the time of the last boundary.
fn sweep<F>(
    name: &'static str,
    mut starts: Vec<f64>,
    mut ends: Vec<f64>,
    mut visit: F,
) -> Result<f64>
where
    F: FnMut(SweepStep) -> Result<()>,
{
    starts.sort_by(f64::total_cmp);
    ends.sort_by(f64::total_cmp);

    let mut start_idx = 0;
    let mut end_idx = 0;
    let mut active: i64 = 0;
    let mut last = 0.0;

    while end_idx < ends.len() {
        let (time, delta) = match starts.get(start_idx) {
            Some(&start) if start <= ends[end_idx] => {
                start_idx += 1;
                (start, 1)
            }
            _ => {
                end_idx += 1;
                (ends[end_idx - 1], -1)
            }
        };

        visit(SweepStep {
            from: last,
            to: time,
            active: active as usize,
        })?;
        last = time;
        active += delta;
        if active < 0 {
            return Err(Error::UnbalancedSweep {
                sweep: name,
                counter: active,
            });
        }
    }

    if active != 0 || start_idx != starts.len() {
        return Err(Error::UnbalancedSweep {
            sweep: name,
            counter: active + (starts.len() - start_idx) as i64,
        });
    }
    Ok(last)
}

fn serialize_time_series<S: Serializer>(
    series: &BTreeMap<SimTime, usize>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(series.len()))?;
    for (time, count) in series {
        seq.serialize_element(&(time.as_f64(), count))?;
    }
    seq.end()
}
