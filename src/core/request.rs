//! Request generations for component state machines.
//!
//! Every component instance owns one [`RequestTracker`] per operation.
//! Issuing a request yields a [`Ticket`]; when the response comes back the
//! component asks the tracker whether that ticket is still the latest one.
//! Responses carrying an older ticket are dropped, so a slow early response
//! can never overwrite a newer one.

/// Generation number of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    pending: Option<Ticket>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the latest issued request has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Issue a ticket unless a request is already in flight.
    pub fn try_begin(&mut self) -> Option<Ticket> {
        if self.is_pending() {
            return None;
        }
        Some(self.begin())
    }

    /// Issue a ticket unconditionally. Any in-flight ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// Forget the in-flight ticket, if any. Its completion becomes stale.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Mark `ticket` finished. Returns `true` only for the latest pending
    /// ticket; stale or repeated completions return `false` and leave the
    /// tracker untouched.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
