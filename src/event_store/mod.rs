// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store Abstraction
//!
//! Interface for appending and retrieving domain events.
//!
//! # Architecture
//!
//! ```text
//! Command → Handler → Event → EventStore → Projector
//!                                  ↓
//!                            Projection Store
//! ```
//!
//! # Event Store Requirements
//!
//! 1. **Append-Only**: Events are never updated or deleted
//! 2. **Monotonic**: Every stamped timestamp is strictly later than any
//!    previously stamped timestamp, across all aggregates
//! 3. **Replay**: All events for an aggregate key can be read back in
//!    ascending timestamp order
//!
//! The store performs no payload validation; command handlers validate
//! before anything reaches the log. A failed append is surfaced as
//! [`EngineError::EventStore`](crate::errors::EngineError) and is never
//! retried here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EventId, GroupId};
use crate::errors::EngineResult;
use crate::events::GroupEvent;

pub mod memory;

pub use memory::InMemoryEventStore;

/// An event as persisted in the log
///
/// Wraps the domain event with its durable handle and the generation
/// timestamp stamped at append time. Serializes flat, so the wire form is
/// `{"id": ..., "eventType": ..., "data": {...}, "timestamp": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Durable event handle (UUIDv7)
    pub id: EventId,

    #[serde(flatten)]
    pub event: GroupEvent,

    /// Generation timestamp stamped by the store
    pub timestamp: DateTime<Utc>,
}

impl StoredEvent {
    /// Aggregate key of the wrapped event
    pub fn group_id(&self) -> &GroupId {
        self.event.group_id()
    }
}

/// Event Store trait for persisting and retrieving group events
///
/// Implementations must ensure:
///
/// - **Durability**: a returned `StoredEvent` has been persisted
/// - **Monotonic ordering**: timestamps are strictly increasing in append
///   order across all aggregates, so the projector's replay sort is total
/// - **Completeness**: `events_for_group` returns every event whose payload
///   references the group, ascending by timestamp
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a single event and stamp it with a generation timestamp
    ///
    /// Returns the stored envelope with its durable handle. Propagates the
    /// underlying log's write failure without retrying.
    async fn append(&self, event: GroupEvent) -> EngineResult<StoredEvent>;

    /// All events for the given group, ascending by timestamp
    async fn events_for_group(&self, group_id: &GroupId) -> EngineResult<Vec<StoredEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemberRole, UserId};
    use crate::events::UserJoinedGroup;

    #[test]
    fn test_stored_event_flattens_envelope() {
        let stored = StoredEvent {
            id: EventId::generate(),
            event: GroupEvent::UserJoinedGroup(UserJoinedGroup {
                group_id: GroupId::new("g1"),
                user_id: UserId::new("u1"),
                role: MemberRole::Member,
                username: None,
            }),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("id").is_some());
        assert_eq!(json["eventType"], "UserJoinedGroup");
        assert_eq!(json["data"]["groupId"], "g1");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("event").is_none());
    }
}
