// Copyright (c) 2025 - Cowboy AI, Inc.
//! Group Service Layer
//!
//! Application service coordinating the event-sourced group aggregate:
//! - Command handling via the pure functions in [`crate::aggregate`]
//! - Event persistence through the [`EventStore`] trait
//! - Projection rebuild through the [`Projector`]
//!
//! # Service Pattern
//!
//! ```text
//! Command → Service → rebuild projection → Handler → Event → Event Store
//!                                                               ↓
//!                                                     rebuild projection
//! ```
//!
//! # Transaction Semantics
//!
//! Each command method is a transaction:
//! 1. Acquire the group's command lock
//! 2. Rebuild the projection from the full event stream
//! 3. Handle the command (pure function) against that fresh state
//! 4. Append the event to the store
//! 5. Rebuild the projection so queries observe the new state
//!
//! Validation failures abort before step 4, so a failed command never
//! writes to the log. An append failure aborts before step 5; the command
//! is then not-applied, and retrying is the caller's decision (a blind
//! retry after a lost acknowledgment can double-append).
//!
//! # Concurrency
//!
//! Commands for the same group are serialized by a per-group async mutex,
//! closing the validate-then-append race: two concurrent accepts of the
//! last free slot cannot both pass validation, because the second one
//! revalidates against the projection that already contains the first.
//! Commands for different groups run concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::aggregate::commands::*;
use crate::aggregate::handlers::*;
use crate::config::EngineConfig;
use crate::domain::{EventId, Group, GroupId, JoinRequest, UserId};
use crate::errors::EngineError;
use crate::event_store::EventStore;
use crate::events::GroupEvent;
use crate::projection::{Projector, ProjectionStore};

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
///
/// Splits business-rule rejections (pre-append, caller's fault) from
/// infrastructure failures (append or projection I/O, safe to surface as
/// transient).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Command validation failed; nothing was written
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Event store or projection store failure
    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] EngineError),
}

/// Group service trait
///
/// The command surface of the engine plus the projection queries. All
/// command methods return the durable handle of the appended event.
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Create a new group
    async fn create_group(&self, command: CreateGroupCommand) -> ServiceResult<EventId>;

    /// Join a public group directly
    async fn join_group(&self, command: JoinGroupCommand) -> ServiceResult<EventId>;

    /// Request to join a private group
    async fn create_join_request(
        &self,
        command: CreateJoinRequestCommand,
    ) -> ServiceResult<EventId>;

    /// Accept or reject a waiting join request
    ///
    /// Returns `None` when the request was already decided and the engine
    /// is configured to ignore replays of the decision.
    async fn process_join_request(
        &self,
        command: ProcessJoinRequestCommand,
    ) -> ServiceResult<Option<EventId>>;

    /// Current projection of a group
    async fn get_group(&self, group_id: &GroupId) -> ServiceResult<Option<Group>>;

    /// Join requests still awaiting a decision
    async fn group_join_requests(&self, group_id: &GroupId) -> ServiceResult<Vec<JoinRequest>>;

    /// The member due to receive the next payout
    async fn next_payout_recipient(&self, group_id: &GroupId) -> ServiceResult<Option<UserId>>;
}

/// Event-sourced implementation of [`GroupService`]
pub struct EventSourcedGroupService<S, P> {
    event_store: Arc<S>,
    projector: Projector<S, P>,
    config: EngineConfig,

    /// Per-group command locks; the registry itself is touched only long
    /// enough to clone out a lock handle
    locks: Mutex<HashMap<GroupId, Arc<Mutex<()>>>>,
}

impl<S, P> EventSourcedGroupService<S, P>
where
    S: EventStore,
    P: ProjectionStore,
{
    pub fn new(event_store: Arc<S>, projection_store: Arc<P>, config: EngineConfig) -> Self {
        let projector = Projector::new(event_store.clone(), projection_store);
        Self {
            event_store,
            projector,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The command lock for `group_id`, created on first use
    async fn lock_for(&self, group_id: &GroupId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(group_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Append a validated event and bring the projection up to date
    async fn append_and_rebuild(&self, event: GroupEvent) -> ServiceResult<EventId> {
        let stored = self.event_store.append(event).await?;
        self.projector.rebuild_state(stored.group_id()).await?;

        info!(
            event_type = stored.event.event_type_name(),
            group_id = %stored.group_id(),
            event_id = %stored.id,
            "Command applied"
        );
        Ok(stored.id)
    }
}

#[async_trait]
impl<S, P> GroupService for EventSourcedGroupService<S, P>
where
    S: EventStore,
    P: ProjectionStore,
{
    async fn create_group(&self, command: CreateGroupCommand) -> ServiceResult<EventId> {
        let lock = self.lock_for(&command.group_id).await;
        let _guard = lock.lock().await;

        let event = handle_create_group(command)?;
        self.append_and_rebuild(event).await
    }

    async fn join_group(&self, command: JoinGroupCommand) -> ServiceResult<EventId> {
        let lock = self.lock_for(&command.group_id).await;
        let _guard = lock.lock().await;

        let state = self.projector.rebuild_state(&command.group_id).await?;
        let event = handle_join_group(&state, command)?;
        self.append_and_rebuild(event).await
    }

    async fn create_join_request(
        &self,
        command: CreateJoinRequestCommand,
    ) -> ServiceResult<EventId> {
        let lock = self.lock_for(&command.group_id).await;
        let _guard = lock.lock().await;

        let state = self.projector.rebuild_state(&command.group_id).await?;
        let event = handle_create_join_request(&state, command, &self.config.join_requests)?;
        self.append_and_rebuild(event).await
    }

    async fn process_join_request(
        &self,
        command: ProcessJoinRequestCommand,
    ) -> ServiceResult<Option<EventId>> {
        let lock = self.lock_for(&command.group_id).await;
        let _guard = lock.lock().await;

        let state = self.projector.rebuild_state(&command.group_id).await?;
        let group_id = command.group_id.clone();
        match handle_process_join_request(&state, command, &self.config.join_requests)? {
            Some(event) => Ok(Some(self.append_and_rebuild(event).await?)),
            None => {
                debug!(group_id = %group_id, "Join request already processed, ignoring");
                Ok(None)
            }
        }
    }

    async fn get_group(&self, group_id: &GroupId) -> ServiceResult<Option<Group>> {
        Ok(self.projector.get_group(group_id).await?)
    }

    async fn group_join_requests(&self, group_id: &GroupId) -> ServiceResult<Vec<JoinRequest>> {
        let group = self.require_group(group_id).await?;
        Ok(group.waiting_requests().into_iter().cloned().collect())
    }

    async fn next_payout_recipient(&self, group_id: &GroupId) -> ServiceResult<Option<UserId>> {
        let group = self.require_group(group_id).await?;
        Ok(group.payout.next_recipient().cloned())
    }
}

impl<S, P> EventSourcedGroupService<S, P>
where
    S: EventStore,
    P: ProjectionStore,
{
    async fn require_group(&self, group_id: &GroupId) -> ServiceResult<Group> {
        self.projector
            .get_group(group_id)
            .await?
            .ok_or_else(|| CommandError::NotFound(format!("Group {group_id} not found")).into())
    }
}
