use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::events::SimTime;
use crate::task::{Task, TaskId};

pub type ServerId = usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServerTier {
    /// Always-on capacity, filled first.
    Static,
    /// Overflow capacity, admitted only while every static server is busy.
    Dynamic,
}

/// Emitted whenever a server puts a task into service. The engine turns it
/// into a departure event on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkStarted {
    pub task_id: TaskId,
    pub server_id: ServerId,
    pub departs_at: SimTime,
}

#[derive(Clone, Debug)]
pub struct Server {
    id: ServerId,
    tier: ServerTier,
    has_queue: bool,
    queue: VecDeque<TaskId>,
    busy_time: f64,
    served: usize,
}

impl Server {
    pub fn new(id: ServerId, tier: ServerTier, has_queue: bool) -> Self {
        Self {
            id,
            tier,
            has_queue,
            queue: VecDeque::new(),
            busy_time: 0.0,
            served: 0,
        }
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn tier(&self) -> ServerTier {
        self.tier
    }

    pub fn has_queue(&self) -> bool {
        self.has_queue
    }

    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Whether the server can accept another task right now.
    pub fn is_available(&self) -> bool {
        self.queue.is_empty() || self.has_queue
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn busy_time(&self) -> f64 {
        self.busy_time
    }

    pub fn served_count(&self) -> usize {
        self.served
    }

    pub fn add_task(
        &mut self,
        time: f64,
        task_id: TaskId,
        tasks: &mut [Task],
    ) -> Result<Option<WorkStarted>> {
        if !self.has_queue && !self.queue.is_empty() {
            return Err(Error::ServerOccupied(self.id));
        }

        self.queue.push_back(task_id);
        if self.queue.len() == 1 {
            return Ok(Some(self.start_work(time, task_id, tasks)));
        }
        Ok(None)
    }

    /// Completes the head task and starts the next queued one, if any.
    pub fn end_work(&mut self, time: f64, tasks: &mut [Task]) -> Result<Option<WorkStarted>> {
        if self.queue.pop_front().is_none() {
            return Err(Error::IdleServerDeparture(self.id));
        }

        Ok(self
            .queue
            .front()
            .copied()
            .map(|next| self.start_work(time, next, tasks)))
    }

    fn start_work(&mut self, time: f64, task_id: TaskId, tasks: &mut [Task]) -> WorkStarted {
        let task = &mut tasks[task_id];
        task.start(time, self.id);
        self.busy_time += task.work();
        self.served += 1;

        WorkStarted {
            task_id,
            server_id: self.id,
            departs_at: SimTime::new(task.departure_time()),
        }
    }
}
