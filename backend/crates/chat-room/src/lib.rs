pub mod broadcast_dispatcher;
pub mod chat_event;
pub mod client;
pub mod client_registry;
pub mod coordinator;
pub mod error;
pub mod fan_out_report;
mod membership_locks;
pub mod metrics;
pub mod room_config;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

pub use broadcast_dispatcher::{BroadcastDispatcher, DispatcherHandle};
pub use chat_event::ChatEvent;
pub use client::{Client, Delivery};
pub use client_registry::ClientRegistry;
pub use coordinator::ChatCoordinator;
pub use error::{ChatError, Result};
pub use fan_out_report::FanOutReport;
pub use metrics::Metrics;
pub use room_config::RoomConfig;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;

pub(crate) use membership_locks::MembershipLocks;
