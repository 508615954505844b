/// Runtime settings for a chat room
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Capacity of each client's live delivery queue
    pub client_queue_capacity: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            client_queue_capacity: 10,
        }
    }
}
