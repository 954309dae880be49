/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Single-flight coordination of access token refreshes
//!
//! The first request that needs a refresh receives a [`RefreshLease`] and
//! performs the network call. Requests that need one while the lease is held
//! are parked in a FIFO queue and resumed, in arrival order, with the outcome
//! the lease holder settles. Every settlement bumps a generation counter so a
//! request that was sent before a refresh completed can tell that its token
//! is already stale and replay instead of refreshing again.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

/// Result of a refresh attempt: the new access token or the failure reason
pub type RefreshOutcome = Result<String, String>;

#[derive(Debug, Default)]
struct RefreshState {
    in_progress: bool,
    generation: u64,
    pending: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

/// Refresh-in-progress flag, generation counter and pending-request queue
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

/// What a request that hit a `401` must do next
#[derive(Debug)]
pub enum RefreshTicket<'a> {
    /// Perform the refresh and settle the lease
    Leader(RefreshLease<'a>),
    /// Wait for the in-flight refresh
    Waiter(oneshot::Receiver<RefreshOutcome>),
    /// A refresh settled after the request was sent; replay with the stored token
    Settled,
}

impl RefreshCoordinator {
    /// Creates an idle coordinator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current generation; read it before sending a request
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Whether a refresh is in flight
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.lock().in_progress
    }

    /// Number of parked requests
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Decides the role of a request that got a `401`
    ///
    /// # Arguments
    /// * `seen_generation` - Generation read before the request was sent
    pub fn acquire(&self, seen_generation: u64) -> RefreshTicket<'_> {
        let mut state = self.lock();
        if state.in_progress {
            let (tx, rx) = oneshot::channel();
            state.pending.push_back(tx);
            debug!("Refresh in flight, queued request #{}", state.pending.len());
            RefreshTicket::Waiter(rx)
        } else if state.generation != seen_generation {
            RefreshTicket::Settled
        } else {
            state.in_progress = true;
            RefreshTicket::Leader(RefreshLease {
                coordinator: self,
                settled: false,
            })
        }
    }

    fn finish(&self, outcome: Option<&RefreshOutcome>) {
        let pending = {
            let mut state = self.lock();
            state.in_progress = false;
            state.generation += 1;
            std::mem::take(&mut state.pending)
        };

        let Some(outcome) = outcome else {
            // Dropping the senders wakes every waiter with a receive error
            debug!("Refresh abandoned, releasing {} queued requests", pending.len());
            return;
        };

        debug!("Refresh settled, resuming {} queued requests", pending.len());
        for waiter in pending {
            // The waiter may have been cancelled meanwhile
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Exclusive right to perform the in-flight refresh
///
/// Dropping the lease without settling it clears the flag and fails every
/// queued request.
#[derive(Debug)]
pub struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Publishes the outcome to every queued request, in arrival order
    pub fn settle(mut self, outcome: &RefreshOutcome) {
        self.settled = true;
        self.coordinator.finish(Some(outcome));
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.finish(None);
        }
    }
}
