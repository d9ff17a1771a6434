use rand::RngCore;
use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::algorithms::{default_strategy, SelectionContext, SelectionStrategy};
use crate::error::{Error, Result};
use crate::events::{Event, SimTime, Timeline};
use crate::models::PoolConfig;
use crate::server::{Server, ServerTier, WorkStarted};
use crate::statistics::QueueStatistics;
use crate::task::{Task, TaskId};

pub struct SimulationEngine {
    pub pool: PoolConfig,
    pub strategy: Box<dyn SelectionStrategy>,
    servers: Vec<Server>,
    timeline: Timeline,
    waiting: VecDeque<TaskId>,
    time: SimTime,
}

/// A finished run: the realized timeline and the servers that produced it.
/// Per-task results live on the tasks themselves.
#[derive(Clone, Debug)]
pub struct SimulationRun {
    pub timeline: Timeline,
    pub servers: Vec<Server>,
}

impl SimulationRun {
    pub fn statistics(&self, tasks: &[Task]) -> Result<QueueStatistics> {
        QueueStatistics::compute(tasks, &self.timeline, &self.servers)
    }
}

impl SimulationEngine {
    pub fn new(pool: PoolConfig, strategy: Box<dyn SelectionStrategy>) -> Self {
        Self {
            pool,
            strategy,
            servers: Vec::new(),
            timeline: Timeline::new(),
            waiting: VecDeque::new(),
            time: SimTime::ZERO,
        }
    }

    pub fn run(mut self, tasks: &mut [Task], rng: &mut dyn RngCore) -> Result<SimulationRun> {
        validate_pool(&self.pool)?;
        validate_tasks(tasks)?;

        self.servers = init_servers(&self.pool);
        for task in tasks.iter_mut() {
            task.reset();
            self.timeline
                .schedule(SimTime::new(task.arrival()), Event::Arrival(task.id()));
        }
        debug!(
            tasks = tasks.len(),
            static_servers = self.pool.static_servers,
            dynamic_servers = self.pool.dynamic_servers,
            has_queue = self.pool.has_queue,
            "simulation started"
        );

        let mut cursor = None;
        while let Some((time, events)) = self.timeline.next_after(cursor) {
            cursor = Some(time);
            self.time = time;
            trace!(time = time.as_f64(), events = events.len(), "timeline step");

            for event in events {
                match event {
                    Event::Arrival(task_id) => self.waiting.push_back(task_id),
                    Event::Departure { server_id, .. } => {
                        let started = self.servers[server_id].end_work(time.as_f64(), tasks)?;
                        if let Some(started) = started {
                            self.schedule_departure(started)?;
                        }
                    }
                }
            }

            self.admit(tasks, rng)?;
        }

        if !self.waiting.is_empty() {
            return Err(Error::UnservedTasks(self.waiting.len()));
        }

        debug!(
            simulation_time = self.time.as_f64(),
            event_times = self.timeline.len(),
            "simulation finished"
        );

        Ok(SimulationRun {
            timeline: self.timeline,
            servers: self.servers,
        })
    }

    fn admit(&mut self, tasks: &mut [Task], rng: &mut dyn RngCore) -> Result<()> {
        while let Some(&task_id) = self.waiting.front() {
            let mut ctx = SelectionContext {
                servers: &self.servers,
                rng: &mut *rng,
            };
            let Some(selection) = self.strategy.select(&mut ctx) else {
                break;
            };

            self.waiting.pop_front();
            trace!(
                task_id,
                server_id = selection.server_id,
                pending = selection.pending,
                "task admitted"
            );
            let started =
                self.servers[selection.server_id].add_task(self.time.as_f64(), task_id, tasks)?;
            if let Some(started) = started {
                self.schedule_departure(started)?;
            }
        }
        Ok(())
    }

    fn schedule_departure(&mut self, started: WorkStarted) -> Result<()> {
        if started.departs_at <= self.time {
            return Err(Error::DepartureNotInFuture {
                task: started.task_id,
                time: started.departs_at.as_f64(),
            });
        }
        self.timeline.schedule(
            started.departs_at,
            Event::Departure {
                task_id: started.task_id,
                server_id: started.server_id,
            },
        );
        Ok(())
    }
}

/// Runs one configuration over `tasks` with the default admission policy.
pub fn simulate(
    tasks: &mut [Task],
    pool: PoolConfig,
    rng: &mut dyn RngCore,
) -> Result<SimulationRun> {
    SimulationEngine::new(pool, default_strategy()).run(tasks, rng)
}

fn validate_pool(pool: &PoolConfig) -> Result<()> {
    if pool.server_count() == 0 {
        return Err(Error::NoServers);
    }
    Ok(())
}

fn validate_tasks(tasks: &[Task]) -> Result<()> {
    if tasks.is_empty() {
        return Err(Error::EmptyTasks);
    }

    let mut previous_arrival = 0.0;
    for (position, task) in tasks.iter().enumerate() {
        let id = task.id();
        if id != position {
            return Err(Error::TaskIdMismatch { position, id });
        }
        if !task.arrival().is_finite() || task.arrival() < 0.0 {
            return Err(Error::InvalidArrival {
                id,
                arrival: task.arrival(),
            });
        }
        if task.arrival() < previous_arrival {
            return Err(Error::UnorderedArrival { id });
        }
        if !task.work().is_finite() || task.work() <= 0.0 {
            return Err(Error::InvalidWorkDuration {
                id,
                work: task.work(),
            });
        }
        previous_arrival = task.arrival();
    }
    Ok(())
}

fn init_servers(pool: &PoolConfig) -> Vec<Server> {
    (0..pool.server_count())
        .map(|id| {
            let tier = if id < pool.static_servers {
                ServerTier::Static
            } else {
                ServerTier::Dynamic
            };
            Server::new(id, tier, pool.has_queue)
        })
        .collect()
}

/// Generator that always yields zero, so tie-breaks pick the first candidate.
pub struct StableRng;

impl RngCore for StableRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
