use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Pending,
    Success,
    Failed,
}

/// Generation handed out when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tracks the latest request of one flow so that late answers to
/// superseded requests can be dropped.
#[derive(Debug, Clone)]
pub struct FlowTracker {
    name: &'static str,
    latest: u64,
    state: FlowState,
}

impl FlowTracker {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            latest: 0,
            state: FlowState::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.state = FlowState::Pending;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate whatever is in flight without starting a request.
    pub fn supersede(&mut self) {
        self.latest += 1;
        self.state = FlowState::Idle;
    }

    /// Closes the current request. One that never produced a result goes
    /// back to idle.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if self.state == FlowState::Pending {
            self.state = FlowState::Idle;
        }
        true
    }

    pub fn succeed(&mut self, ticket: Ticket) -> bool {
        self.settle(ticket, FlowState::Success)
    }

    pub fn fail(&mut self, ticket: Ticket) -> bool {
        self.settle(ticket, FlowState::Failed)
    }

    fn settle(&mut self, ticket: Ticket, state: FlowState) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Dropping stale {} response {} (latest #{})",
                self.name,
                ticket,
                self.latest
            );
            return false;
        }
        self.state = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut flow = FlowTracker::new("play");
        assert_eq!(flow.state(), FlowState::Idle);

        let ticket = flow.begin();
        assert_eq!(flow.state(), FlowState::Pending);
        assert!(flow.succeed(ticket));
        assert_eq!(flow.state(), FlowState::Success);

        let ticket = flow.begin();
        assert!(flow.fail(ticket));
        assert_eq!(flow.state(), FlowState::Failed);
    }

    #[test]
    fn test_superseded_ticket_is_dropped() {
        let mut flow = FlowTracker::new("play");
        let first = flow.begin();
        let second = flow.begin();

        assert!(!flow.is_current(first));
        assert!(!flow.succeed(first));
        assert_eq!(flow.state(), FlowState::Pending);

        assert!(flow.fail(second));
        assert_eq!(flow.state(), FlowState::Failed);
    }

    #[test]
    fn test_finish_keeps_outcome_or_returns_to_idle() {
        let mut flow = FlowTracker::new("chat");
        let ticket = flow.begin();
        assert!(flow.succeed(ticket));
        assert!(flow.finish(ticket));
        assert_eq!(flow.state(), FlowState::Success);

        let abandoned = flow.begin();
        assert!(flow.finish(abandoned));
        assert_eq!(flow.state(), FlowState::Idle);

        let stale = flow.begin();
        let _latest = flow.begin();
        assert!(!flow.finish(stale));
        assert_eq!(flow.state(), FlowState::Pending);
    }

    #[test]
    fn test_supersede_without_request() {
        let mut flow = FlowTracker::new("score");
        let ticket = flow.begin();
        flow.supersede();
        assert!(!flow.succeed(ticket));
        assert_eq!(flow.state(), FlowState::Idle);
    }
}
