use crate::server::ServerId;

/// Position of a task in the task slice handed to the engine.
pub type TaskId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    id: TaskId,
    arrival: f64,
    work: f64,
    waiting: f64,
    served_by: Option<ServerId>,
}

impl Task {
    pub fn new(id: TaskId, arrival: f64, work: f64) -> Self {
        Self {
            id,
            arrival,
            work,
            waiting: 0.0,
            served_by: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn arrival(&self) -> f64 {
        self.arrival
    }

    pub fn work(&self) -> f64 {
        self.work
    }

    /// Time spent between arrival and service start. Zero until served.
    pub fn waiting(&self) -> f64 {
        self.waiting
    }

    pub fn served_by(&self) -> Option<ServerId> {
        self.served_by
    }

    pub fn is_served(&self) -> bool {
        self.served_by.is_some()
    }

    pub fn service_start(&self) -> f64 {
        self.arrival + self.waiting
    }

    pub fn departure_time(&self) -> f64 {
        self.arrival + self.waiting + self.work
    }

    pub(crate) fn start(&mut self, time: f64, server: ServerId) {
        self.waiting = time - self.arrival;
        self.served_by = Some(server);
    }

    pub fn reset(&mut self) {
        self.waiting = 0.0;
        self.served_by = None;
    }
}
