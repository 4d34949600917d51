// Copyright (c) 2025 - Cowboy AI, Inc.
//! Read-Model Projection
//!
//! The projector rebuilds a group by replaying its full event stream and
//! persists the result to a [`ProjectionStore`]. The stored projection is
//! the only view commands validate against and the only view queries read.
//!
//! Full replay on every rebuild (no snapshotting) is a deliberate
//! simplicity/consistency trade-off; per-group event counts in this domain
//! stay in the low hundreds over a group's lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::aggregate::from_events;
use crate::domain::{check_group, Group, GroupId};
use crate::errors::EngineResult;
use crate::event_store::EventStore;

/// Queryable store for rebuilt group projections
#[async_trait]
pub trait ProjectionStore: Send + Sync {
    /// Persist a rebuilt projection, replacing any previous version
    async fn save(&self, group: Group) -> EngineResult<()>;

    /// Current persisted projection, if the group exists
    async fn find_by_id(&self, group_id: &GroupId) -> EngineResult<Option<Group>>;
}

/// In-memory projection store
#[derive(Default)]
pub struct InMemoryProjectionStore {
    groups: RwLock<HashMap<GroupId, Group>>,
}

impl InMemoryProjectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectionStore for InMemoryProjectionStore {
    async fn save(&self, group: Group) -> EngineResult<()> {
        self.groups
            .write()
            .await
            .insert(group.group_id.clone(), group);
        Ok(())
    }

    async fn find_by_id(&self, group_id: &GroupId) -> EngineResult<Option<Group>> {
        Ok(self.groups.read().await.get(group_id).cloned())
    }
}

/// Rebuilds and serves group projections
///
/// `rebuild_state` is a total fold over the stored events; invariant
/// violations in the rebuilt state are logged, not raised, because events
/// are facts and a violation means a fold bug rather than a bad command.
pub struct Projector<S, P> {
    event_store: Arc<S>,
    projection_store: Arc<P>,
}

impl<S, P> Projector<S, P>
where
    S: EventStore,
    P: ProjectionStore,
{
    pub fn new(event_store: Arc<S>, projection_store: Arc<P>) -> Self {
        Self {
            event_store,
            projection_store,
        }
    }

    /// Recompute the projection for `group_id` from its full event stream
    ///
    /// Persists the result when the group exists and returns the rebuilt
    /// state either way, so command handlers can validate "group not found"
    /// against the same fold.
    pub async fn rebuild_state(&self, group_id: &GroupId) -> EngineResult<Group> {
        let events = self.event_store.events_for_group(group_id).await?;
        let group = from_events(group_id.clone(), &events);

        debug!(
            group_id = %group_id,
            events = events.len(),
            members = group.members.len(),
            "Rebuilt group projection"
        );

        if let Err(violation) = check_group(&group) {
            warn!(group_id = %group_id, %violation, "Rebuilt projection violates invariants");
        }

        if group.is_created() {
            self.projection_store.save(group.clone()).await?;
        }

        Ok(group)
    }

    /// Current persisted projection for `group_id`
    pub async fn get_group(&self, group_id: &GroupId) -> EngineResult<Option<Group>> {
        self.projection_store.find_by_id(group_id).await
    }
}
