mod tiered_least_pending;

use rand::RngCore;

use crate::server::{Server, ServerId};

pub use tiered_least_pending::TieredLeastPendingStrategy;

/// Picks a server for the task at the head of the general waiting queue.
/// Returning `None` leaves the task waiting until the next event time.
pub trait SelectionStrategy {
    fn select(&mut self, ctx: &mut SelectionContext) -> Option<Selection>;
}

pub struct SelectionContext<'a> {
    pub servers: &'a [Server],
    pub rng: &'a mut dyn RngCore,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Selection {
    pub server_id: ServerId,
    pub pending: usize,
}

pub fn default_strategy() -> Box<dyn SelectionStrategy> {
    Box::new(TieredLeastPendingStrategy)
}
