//! # Global busy coordinator
//!
//! One process-wide "something is in flight" flag plus the message the loading
//! overlay shows. Any code holding a [`BusyCoordinator`] (a cheap clone) can raise or
//! lower it; views observe it through [`BusyCoordinator::subscribe`].
//!
//! ## Semantics
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`show`](BusyCoordinator::show) | Activate and replace message/class. Last writer wins; there is no counting. |
//! | [`hide`](BusyCoordinator::hide) | Deactivate, however many `show`s came before. No-op when already inactive. |
//! | [`show_for`](BusyCoordinator::show_for) | `show`, then hide again after a duration. |
//! | [`show_with_delay`](BusyCoordinator::show_with_delay) | `show` after a delay. |
//! | [`raise`](BusyCoordinator::raise) | `show` and return a [`BusyGuard`] that lowers on drop. |
//! | [`with_loading`](BusyCoordinator::with_loading) | Keep the flag raised for the lifetime of a future and return its output unchanged. |
//!
//! ## Tickets
//!
//! Every operation that changes the flag advances a monotonically increasing
//! [`BusyTicket`]. Auto-hide timers and guards remember the ticket they were issued
//! and only lower the flag while that ticket is still the latest, so a stale timer
//! from an earlier `show_for` cannot hide a newer `show`.
//!
//! A delayed show takes no ticket until it fires. It remembers the latest ticket at
//! scheduling time and is dropped if any `show` or `hide` happened in between; a
//! guard or timer that was running when it was scheduled still lowers the flag.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use crate::timer;

/// What to display while busy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyDescriptor {
    /// Overlay text; the coordinator's default message when `None`.
    pub message: Option<String>,
    /// Extra CSS class for the overlay.
    pub class_name: Option<String>,
    /// Lower the flag automatically after this long.
    pub auto_hide: Option<Duration>,
}

impl BusyDescriptor {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_auto_hide(mut self, after: Duration) -> Self {
        self.auto_hide = Some(after);
        self
    }
}

/// Snapshot observed by the overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyState {
    pub active: bool,
    pub message: String,
    pub class_name: Option<String>,
}

/// Identifies one raise of the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusyTicket(u64);

#[derive(Debug)]
struct Shared {
    state: watch::Sender<BusyState>,
    // Every mutation of `state` happens with this lock held.
    latest: Mutex<u64>,
    default_message: String,
}

#[derive(Clone, Debug)]
pub struct BusyCoordinator {
    shared: Arc<Shared>,
}

impl BusyCoordinator {
    pub fn new(default_message: impl Into<String>) -> Self {
        let (state, _rx) = watch::channel(BusyState::default());
        Self {
            shared: Arc::new(Shared {
                state,
                latest: Mutex::new(0),
                default_message: default_message.into(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, u64> {
        self.shared
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn next_ticket(latest: &mut u64) -> BusyTicket {
        *latest += 1;
        BusyTicket(*latest)
    }

    fn apply_show(&self, descriptor: BusyDescriptor) {
        let message = descriptor
            .message
            .unwrap_or_else(|| self.shared.default_message.clone());
        tracing::debug!(%message, "busy raised");
        self.shared.state.send_replace(BusyState {
            active: true,
            message,
            class_name: descriptor.class_name,
        });
    }

    fn apply_hide(&self) {
        let lowered = self.shared.state.send_if_modified(|state| {
            if !state.active {
                return false;
            }
            state.active = false;
            true
        });
        if lowered {
            tracing::debug!("busy lowered");
        }
    }

    /// Raise the flag, replacing whatever message was showing.
    pub fn show(&self, descriptor: BusyDescriptor) -> BusyTicket {
        let auto_hide = descriptor.auto_hide;
        let ticket = {
            let mut latest = self.lock();
            let ticket = Self::next_ticket(&mut latest);
            self.apply_show(descriptor);
            ticket
        };
        if let Some(after) = auto_hide {
            self.schedule_hide(ticket, after);
        }
        ticket
    }

    /// Lower the flag unconditionally.
    pub fn hide(&self) {
        let mut latest = self.lock();
        Self::next_ticket(&mut latest);
        self.apply_hide();
    }

    /// Lower the flag only if `ticket` is still the latest. Returns whether it was.
    pub fn hide_if_current(&self, ticket: BusyTicket) -> bool {
        let latest = self.lock();
        if *latest != ticket.0 {
            return false;
        }
        self.apply_hide();
        true
    }

    pub fn show_for(&self, duration: Duration, descriptor: BusyDescriptor) -> BusyTicket {
        self.show(descriptor.with_auto_hide(duration))
    }

    /// Raise the flag after `delay`, unless anything else touched it meanwhile.
    ///
    /// Scheduling does not take a ticket, so whatever currently owns the flag can
    /// still lower it. The ticket is issued when the show actually happens.
    pub fn show_with_delay(&self, delay: Duration, descriptor: BusyDescriptor) {
        let observed = *self.lock();

        let this = self.clone();
        timer::spawn(async move {
            timer::sleep(delay).await;
            if this.show_if_unchanged(observed, descriptor).is_none() {
                tracing::debug!(observed, "delayed busy superseded");
            }
        });
    }

    fn show_if_unchanged(&self, observed: u64, descriptor: BusyDescriptor) -> Option<BusyTicket> {
        let auto_hide = descriptor.auto_hide;
        let ticket = {
            let mut latest = self.lock();
            if *latest != observed {
                return None;
            }
            let ticket = Self::next_ticket(&mut latest);
            self.apply_show(descriptor);
            ticket
        };
        if let Some(after) = auto_hide {
            self.schedule_hide(ticket, after);
        }
        Some(ticket)
    }

    fn schedule_hide(&self, ticket: BusyTicket, after: Duration) {
        let this = self.clone();
        timer::spawn(async move {
            timer::sleep(after).await;
            this.hide_if_current(ticket);
        });
    }

    /// Raise the flag for as long as the returned guard lives.
    pub fn raise(&self, descriptor: BusyDescriptor) -> BusyGuard {
        BusyGuard {
            coordinator: self.clone(),
            ticket: self.show(descriptor),
        }
    }

    /// Keep the flag raised while `operation` runs, on every exit path, and hand its
    /// output back untouched. Errors are not swallowed.
    pub async fn with_loading<F>(&self, descriptor: BusyDescriptor, operation: F) -> F::Output
    where
        F: Future,
    {
        let guard = self.raise(descriptor);
        let output = operation.await;
        drop(guard);
        output
    }

    pub fn state(&self) -> BusyState {
        self.shared.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.shared.state.borrow().active
    }

    pub fn subscribe(&self) -> watch::Receiver<BusyState> {
        self.shared.state.subscribe()
    }
}

/// Lowers the busy flag when dropped, unless a newer raise has taken over.
#[must_use = "the busy flag is lowered as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard {
    coordinator: BusyCoordinator,
    ticket: BusyTicket,
}

impl BusyGuard {
    pub fn ticket(&self) -> BusyTicket {
        self.ticket
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.coordinator.hide_if_current(self.ticket);
    }
}
