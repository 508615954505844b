/// Outcome of fanning one event out to a registry snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub delivered: usize,
    /// Queue was full; the client misses this message
    pub dropped: usize,
    /// Client registered after the event was posted
    pub skipped: usize,
}

impl FanOutReport {
    pub fn recipients(&self) -> usize {
        self.delivered + self.dropped + self.skipped
    }
}
