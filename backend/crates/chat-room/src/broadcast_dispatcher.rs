use crate::{
    ChatError, ChatEvent, ClientRegistry, Delivery, FanOutReport, Metrics,
    Result as ChatErrorResult, ShutdownCoordinator, ShutdownGuard,
};

use std::panic::Location;

use error_location::ErrorLocation;
use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Posting side of the dispatcher's FIFO hand-off. Cheap to clone.
#[derive(Clone)]
pub struct DispatcherHandle {
    sender: mpsc::UnboundedSender<ChatEvent>,
}

impl DispatcherHandle {
    /// Queue an event for fan-out. Never waits on the dispatcher; fails only
    /// once the dispatcher loop has exited.
    pub fn post(&self, event: ChatEvent) -> ChatErrorResult<()> {
        self.sender
            .send(event)
            .map_err(|_| ChatError::DispatcherStopped {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// Single consumer that fans each posted event out to every registered
/// client.
///
/// Delivery policy: for each client in the registry snapshot taken when the
/// event is processed, attempt one non-blocking enqueue. A full queue drops
/// the message for that client only. Nothing is retried and nothing is
/// reported back to the sender. Events are processed in posting order.
pub struct BroadcastDispatcher {
    registry: ClientRegistry,
    metrics: Metrics,
    receiver: mpsc::UnboundedReceiver<ChatEvent>,
    shutdown: ShutdownGuard,
}

enum Next {
    Event(ChatEvent),
    Shutdown,
    Closed,
}

impl BroadcastDispatcher {
    pub fn new(
        registry: ClientRegistry,
        metrics: Metrics,
        shutdown: &ShutdownCoordinator,
    ) -> (Self, DispatcherHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            registry,
            metrics,
            receiver,
            shutdown: shutdown.subscribe_guard(),
        };
        (dispatcher, DispatcherHandle { sender })
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Consume events until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Broadcast dispatcher started");

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.wait() => Next::Shutdown,
                event = self.receiver.recv() => match event {
                    Some(event) => Next::Event(event),
                    None => Next::Closed,
                },
            };

            match next {
                Next::Event(event) => {
                    Self::fan_out(&self.registry, &self.metrics, &event).await;
                }
                Next::Shutdown => {
                    info!("Broadcast dispatcher stopping on shutdown");
                    break;
                }
                Next::Closed => {
                    info!("Broadcast dispatcher stopping, all handles dropped");
                    break;
                }
            }
        }

        self.receiver.close();
    }

    /// Deliver one event to the current registry snapshot.
    pub async fn fan_out(
        registry: &ClientRegistry,
        metrics: &Metrics,
        event: &ChatEvent,
    ) -> FanOutReport {
        let clients = registry.snapshot().await;
        let line = event.line();
        let mut report = FanOutReport::default();

        for client in clients {
            if client.registered_at() > event.posted_at {
                report.skipped += 1;
                continue;
            }

            match client.try_deliver(line.clone()) {
                Delivery::Delivered => report.delivered += 1,
                Delivery::DroppedFull => {
                    report.dropped += 1;
                    debug!(
                        "Dropped message from {} for {} (queue full)",
                        event.sender_id,
                        client.id()
                    );
                }
                Delivery::DroppedClosed => {
                    report.dropped += 1;
                    debug!(
                        "Dropped message from {} for {} (queue closed)",
                        event.sender_id,
                        client.id()
                    );
                }
            }
        }

        debug!(
            "Fan-out from {}: {} delivered, {} dropped, {} skipped",
            event.sender_id, report.delivered, report.dropped, report.skipped
        );
        metrics.fan_out_completed(&report);

        report
    }
}
