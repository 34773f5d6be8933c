/// Tag handed out when a pipeline run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Orders pipeline runs targeting one piece of view state. A run's result is
/// applied only when no newer run has been applied before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSequencer {
    issued: u64,
    applied: Option<RunTicket>,
}

impl RunSequencer {
    pub fn begin(&mut self) -> RunTicket {
        self.issued += 1;
        RunTicket(self.issued)
    }

    /// Records `ticket` as applied and returns true if it is newer than
    /// everything applied so far; returns false for stale completions.
    pub fn try_apply(&mut self, ticket: RunTicket) -> bool {
        match self.applied {
            Some(applied) if applied >= ticket => false,
            _ => {
                self.applied = Some(ticket);
                true
            }
        }
    }
}
