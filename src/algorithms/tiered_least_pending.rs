use rand::Rng;

use crate::algorithms::{Selection, SelectionContext, SelectionStrategy};
use crate::server::ServerTier;

/// Static servers first, dynamic servers only once every static server is
/// busy; least pending tasks wins, ties broken uniformly at random.
#[derive(Default)]
pub struct TieredLeastPendingStrategy;

impl SelectionStrategy for TieredLeastPendingStrategy {
    fn select(&mut self, ctx: &mut SelectionContext) -> Option<Selection> {
        let all_static_busy = ctx
            .servers
            .iter()
            .filter(|server| server.tier() == ServerTier::Static)
            .all(|server| server.is_busy());

        let mut min_pending = usize::MAX;
        let mut candidates = Vec::new();

        for (idx, server) in ctx.servers.iter().enumerate() {
            if !server.is_available() {
                continue;
            }
            if server.tier() == ServerTier::Dynamic && !all_static_busy {
                continue;
            }
            let pending = server.pending_count();
            if pending < min_pending {
                min_pending = pending;
                candidates.clear();
                candidates.push(idx);
            } else if pending == min_pending {
                candidates.push(idx);
            }
        }

        let server_id = match candidates.len() {
            0 => return None,
            1 => candidates[0],
            len => candidates[ctx.rng.gen_range(0..len)],
        };

        Some(Selection {
            server_id,
            pending: min_pending,
        })
    }
}
