//! Event-sourced group aggregate engine for a stokvel platform
//!
//! A stokvel is a rotating savings group: members contribute on a fixed
//! cadence and take turns receiving the pooled payout. This crate owns the
//! group lifecycle — creation, public joins, the private join-request flow,
//! and the payout rotation — as an event-sourced aggregate: commands are
//! validated against a projection rebuilt from the full event stream, and
//! the immutable event log is the single source of truth.
//!
//! ```text
//! Command → Service → Handler (pure) → GroupEvent → EventStore
//!                                                       ↓
//!                               Projector ← replay ← events
//! ```

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod projection;
pub mod service;

// Re-export commonly used types
pub use aggregate::CommandError;
pub use config::{EngineConfig, JoinRequestPolicy, ProcessedRequestPolicy};
pub use domain::{EventId, Group, GroupId, RequestId, UserId};
pub use errors::{EngineError, EngineResult};
pub use event_store::{EventStore, InMemoryEventStore, StoredEvent};
pub use events::GroupEvent;
pub use projection::{InMemoryProjectionStore, Projector, ProjectionStore};
pub use service::{EventSourcedGroupService, GroupService, ServiceError, ServiceResult};
