use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Serialize, Serializer};

use crate::server::ServerId;
use crate::task::TaskId;

/// Simulated time usable as an ordered map key.
#[derive(Clone, Copy, Debug)]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for SimTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Arrival(TaskId),
    Departure { task_id: TaskId, server_id: ServerId },
}

/// Events grouped by time. Entries are appended while the engine scans, but
/// only at times after the scan cursor.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: BTreeMap<SimTime, Vec<Event>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, time: SimTime, event: Event) {
        self.entries.entry(time).or_default().push(event);
    }

    /// The first entry strictly after `cursor`, or the first entry overall.
    pub fn next_after(&self, cursor: Option<SimTime>) -> Option<(SimTime, Vec<Event>)> {
        let lower = match cursor {
            Some(time) => Bound::Excluded(time),
            None => Bound::Unbounded,
        };
        self.entries
            .range((lower, Bound::Unbounded))
            .next()
            .map(|(time, events)| (*time, events.clone()))
    }

    pub fn last_time(&self) -> Option<SimTime> {
        self.entries.keys().next_back().copied()
    }

    /// Number of distinct event times.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SimTime, &[Event])> {
        self.entries
            .iter()
            .map(|(time, events)| (*time, events.as_slice()))
    }
}
