// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Group Aggregate
//!
//! Implements the event-sourcing fold with pure functions:
//! - Immutable state
//! - Pure event application (fold)
//! - No side effects, no hidden clocks, no randomness
//!
//! # Architecture
//!
//! ```text
//! Command → handle_command() → Result<GroupEvent, CommandError>
//!                                      ↓
//! StoredEvents → apply_event() → New Group
//! ```
//!
//! Replaying the same event sequence always yields the same `Group`; this
//! determinism is the central correctness property of the engine. Member
//! join timestamps come from the store-stamped event timestamp, never from
//! a clock read during the fold.

use crate::domain::{
    Group, GroupId, JoinRequest, Member, MemberRole, PayoutSchedule, Rejection, RequestId,
    RequestState,
};
use crate::event_store::StoredEvent;
use crate::events::GroupEvent;

/// Rebuild a group by folding its event stream
///
/// ```text
/// Group = fold(StoredEvents, Group::empty(group_id), apply_event)
/// ```
///
/// Events must already be sorted ascending by timestamp, as returned by
/// [`EventStore::events_for_group`](crate::event_store::EventStore::events_for_group).
pub fn from_events(group_id: GroupId, events: &[StoredEvent]) -> Group {
    events
        .iter()
        .fold(Group::empty(group_id), |group, event| apply_event(group, event))
}

/// Apply a single stored event to the group state
///
/// Total function: events are facts and are never rejected here. Events
/// that no longer make sense against the current state (a duplicate join in
/// a log written before per-group serialization existed, an accept for a
/// vanished request) degrade to the closest sensible state change instead
/// of failing the rebuild.
pub fn apply_event(group: Group, stored: &StoredEvent) -> Group {
    match &stored.event {
        GroupEvent::GroupCreated(e) => {
            let mut group = group;
            group.group_id = e.group_id.clone();
            group.admin_id = e.admin_id.clone();
            group.name = e.name.clone();
            group.min_contribution = e.min_contribution;
            group.max_members = e.max_members;
            group.description = e.description.clone();
            group.profile_image = e.profile_image.clone();
            group.visibility = e.visibility;
            group.contribution_frequency = e.contribution_frequency;
            group.contribution_date = e.contribution_date;
            group.payout_frequency = e.payout_frequency;
            group.payout_date = e.payout_date;
            group.tier = e.tier;
            group.members = Vec::new();
            group.requests = Vec::new();
            // with_member dedups, so a repeated id in the initial roster
            // cannot corrupt the rotation
            group.payout = e
                .member_ids
                .iter()
                .fold(PayoutSchedule::default(), |p, id| p.with_member(id.clone()));
            group.created_at = Some(stored.timestamp);
            group
        }

        GroupEvent::UserJoinedGroup(e) => {
            let mut group = group;
            if !group.is_member(&e.user_id) {
                let username = e
                    .username
                    .clone()
                    .unwrap_or_else(|| e.user_id.to_string());
                group.members.push(Member::new(
                    e.user_id.clone(),
                    username,
                    e.role,
                    stored.timestamp,
                ));
            }
            group.payout = group.payout.with_member(e.user_id.clone());
            group
        }

        GroupEvent::JoinRequestCreated(e) => {
            let mut group = group;
            group.requests.push(JoinRequest {
                request_id: e.request_id.clone(),
                user_id: e.user_id.clone(),
                username: e.username.clone().unwrap_or_else(|| e.user_id.to_string()),
                state: e.state,
                timestamp: stored.timestamp,
            });
            group
        }

        GroupEvent::JoinRequestAccepted(e) => {
            let mut group = group;
            let removed = remove_request(&mut group, &e.request_id);
            if !group.is_member(&e.user_id) {
                let username = removed
                    .map(|r| r.username)
                    .unwrap_or_else(|| e.user_id.to_string());
                group.members.push(Member::new(
                    e.user_id.clone(),
                    username,
                    e.role.unwrap_or(MemberRole::Member),
                    stored.timestamp,
                ));
            }
            group.payout = group.payout.with_member(e.user_id.clone());
            group
        }

        GroupEvent::JoinRequestRejected(e) => {
            let mut group = group;
            remove_request(&mut group, &e.request_id);
            group.rejections.push(Rejection {
                request_id: e.request_id.clone(),
                user_id: e.user_id.clone(),
                rejected_at: stored.timestamp,
            });
            group
        }
    }
}

/// Remove the waiting request with the given id from the live list
fn remove_request(group: &mut Group, request_id: &RequestId) -> Option<JoinRequest> {
    let index = group
        .requests
        .iter()
        .position(|r| &r.request_id == request_id && r.state == RequestState::Waiting)?;
    Some(group.requests.remove(index))
}
