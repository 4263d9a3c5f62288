//! Request generations — only the latest user action may publish results.

/// Identifies one user-triggered request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Monotonic counter handing out [`RequestTicket`]s.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one.
    pub fn next(&mut self) -> RequestTicket {
        self.current += 1;
        RequestTicket(self.current)
    }

    /// Supersede outstanding tickets without issuing a new one.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }
}
