// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Event Store
//!
//! Reference [`EventStore`] implementation backed by a `Vec` behind an async
//! lock. Used by the tests and the demo binary; a durable deployment
//! substitutes its own adapter behind the same trait.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use async_trait::async_trait;

use crate::domain::{EventId, GroupId};
use crate::errors::EngineResult;
use crate::events::GroupEvent;

use super::{EventStore, StoredEvent};

#[derive(Default)]
struct LogState {
    events: Vec<StoredEvent>,
    last_timestamp: Option<DateTime<Utc>>,
}

/// In-memory append-only event log
///
/// Timestamps are stamped monotonically: when the wall clock has not moved
/// since the previous append (or moved backwards), the new event is stamped
/// one millisecond after the previous one, preserving the strict log
/// ordering the projector's replay sort depends on.
#[derive(Default)]
pub struct InMemoryEventStore {
    state: RwLock<LogState>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events in the log, across all groups
    pub async fn len(&self) -> usize {
        self.state.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.events.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: GroupEvent) -> EngineResult<StoredEvent> {
        let mut state = self.state.write().await;

        let mut timestamp = Utc::now();
        if let Some(last) = state.last_timestamp {
            if timestamp <= last {
                timestamp = last + Duration::milliseconds(1);
            }
        }
        state.last_timestamp = Some(timestamp);

        let stored = StoredEvent {
            id: EventId::generate(),
            event,
            timestamp,
        };

        debug!(
            event_type = stored.event.event_type_name(),
            group_id = %stored.group_id(),
            event_id = %stored.id,
            "Appended event"
        );

        state.events.push(stored.clone());
        Ok(stored)
    }

    async fn events_for_group(&self, group_id: &GroupId) -> EngineResult<Vec<StoredEvent>> {
        let state = self.state.read().await;
        let mut events: Vec<StoredEvent> = state
            .events
            .iter()
            .filter(|e| e.group_id() == group_id)
            .cloned()
            .collect();
        // Append order already implies this, but the contract is explicit
        events.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));
        Ok(events)
    }
}
