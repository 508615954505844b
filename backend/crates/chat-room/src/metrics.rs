use crate::FanOutReport;

use metrics::{counter, gauge};

/// Metrics collector for chat room operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "chat_room",
        }
    }

    /// Record a successful join
    pub fn client_joined(&self) {
        counter!(format!("{}.clients.joined", self.prefix)).increment(1);
        gauge!(format!("{}.clients.active", self.prefix)).increment(1.0);
    }

    /// Record a successful leave
    pub fn client_left(&self) {
        counter!(format!("{}.clients.left", self.prefix)).increment(1);
        gauge!(format!("{}.clients.active", self.prefix)).decrement(1.0);
    }

    /// Record clients restored from the store at startup
    pub fn clients_restored(&self, count: usize) {
        gauge!(format!("{}.clients.active", self.prefix)).set(count as f64);
    }

    /// Record a message committed to the log
    pub fn message_sent(&self) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
    }

    /// Record the outcome of one fan-out
    pub fn fan_out_completed(&self, report: &FanOutReport) {
        counter!(format!("{}.broadcast.events", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.delivered", self.prefix))
            .increment(report.delivered as u64);
        counter!(format!("{}.broadcast.dropped", self.prefix))
            .increment(report.dropped as u64);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_code: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!(
            "{}.errors.{}",
            self.prefix,
            error_code.to_lowercase()
        ))
        .increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
