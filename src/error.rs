use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("task set must not be empty")]
    EmptyTasks,
    #[error("task count must be greater than 0")]
    TasksZero,
    #[error("task at position {position} has id {id}: ids must match positions")]
    TaskIdMismatch { position: usize, id: usize },
    #[error("task {id}: arrival time must be finite and >= 0 (got {arrival})")]
    InvalidArrival { id: usize, arrival: f64 },
    #[error("task {id}: arrival times must be non-decreasing")]
    UnorderedArrival { id: usize },
    #[error("task {id}: work duration must be finite and > 0 (got {work})")]
    InvalidWorkDuration { id: usize, work: f64 },
    #[error("server pool must contain at least one server")]
    NoServers,
    #[error("server {0} has no queue and is already serving a task")]
    ServerOccupied(usize),
    #[error("server {0} received a departure while idle")]
    IdleServerDeparture(usize),
    /// Also raised when the work is below the f64 resolution of the start
    /// time, e.g. work 1.0 starting at 1e17.
    #[error("task {task} departs at {time}, which is not after the current time (work below the time resolution)")]
    DepartureNotInFuture { task: usize, time: f64 },
    #[error("{0} tasks were never served")]
    UnservedTasks(usize),
    #[error("{sweep} sweep ended unbalanced (counter {counter})")]
    UnbalancedSweep { sweep: &'static str, counter: i64 },
    #[error("{count} busy servers observed with only {servers} servers")]
    BusyCountOverflow { count: usize, servers: usize },
    #[error("cannot combine statistics: {0}")]
    StatisticsMismatch(String),
    #[error("trials must be greater than 0")]
    TrialsZero,
    #[error("scenarios must not be empty")]
    EmptyScenarios,
    #[error("invalid {name} distribution: {reason}")]
    InvalidDistribution { name: &'static str, reason: String },
    #[error("invalid scenario entry '{0}': expected dynamic_servers[:queue|:no-queue]")]
    InvalidScenarioEntry(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("failed to render report: {0}")]
    Render(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
