// Copyright (c) 2025 - Cowboy AI, Inc.
//! Group Domain Events
//!
//! All state changes to a group are represented as immutable events.
//! Events follow event sourcing practice:
//! - Immutable (no setters)
//! - Past tense naming (UserJoinedGroup, not JoinGroup)
//! - Serialized with the exact field names other services read
//!
//! The wire envelope is `{"eventType": "...", "data": {...}}`; the payload
//! of every variant carries the `groupId` aggregate key. The enum is a
//! closed set: an unknown `eventType` fails deserialization instead of
//! flowing through the fold as an untyped map.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::domain::{
    Frequency, GroupId, JoinRequestAction, MemberRole, RequestId, RequestState, UserId,
    Visibility,
};

/// Group Domain Events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "data")]
pub enum GroupEvent {
    /// A new group was created with its initial roster
    GroupCreated(GroupCreated),

    /// A user joined a public group directly
    UserJoinedGroup(UserJoinedGroup),

    /// A user asked to join a private group
    JoinRequestCreated(JoinRequestCreated),

    /// An admin accepted a waiting join request
    JoinRequestAccepted(JoinRequestProcessed),

    /// An admin rejected a waiting join request
    JoinRequestRejected(JoinRequestProcessed),
}

/// Payload of `GroupCreated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreated {
    pub group_id: GroupId,

    pub admin_id: UserId,

    pub name: String,

    pub min_contribution: f64,

    pub max_members: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    pub visibility: Visibility,

    pub contribution_frequency: Frequency,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_date: Option<DateTime<Utc>>,

    pub payout_frequency: Frequency,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_date: Option<DateTime<Utc>>,

    /// Initial roster; seeds the payout order
    #[serde(default)]
    pub member_ids: Vec<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<u32>,
}

/// Payload of `UserJoinedGroup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJoinedGroup {
    pub group_id: GroupId,

    pub user_id: UserId,

    pub role: MemberRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Payload of `JoinRequestCreated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestCreated {
    pub group_id: GroupId,

    pub user_id: UserId,

    pub request_id: RequestId,

    pub state: RequestState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Shared payload of `JoinRequestAccepted` and `JoinRequestRejected`
///
/// The admin decision travels in `action`; on accept, `role` carries the
/// role granted to the new member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestProcessed {
    pub group_id: GroupId,

    pub request_id: RequestId,

    pub user_id: UserId,

    pub action: JoinRequestAction,

    pub processed_by: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

impl GroupEvent {
    /// Aggregate key of the event
    pub fn group_id(&self) -> &GroupId {
        match self {
            Self::GroupCreated(e) => &e.group_id,
            Self::UserJoinedGroup(e) => &e.group_id,
            Self::JoinRequestCreated(e) => &e.group_id,
            Self::JoinRequestAccepted(e) => &e.group_id,
            Self::JoinRequestRejected(e) => &e.group_id,
        }
    }

    /// Wire name of the event type
    pub fn event_type_name(&self) -> &'static str {
        match self {
            Self::GroupCreated(_) => "GroupCreated",
            Self::UserJoinedGroup(_) => "UserJoinedGroup",
            Self::JoinRequestCreated(_) => "JoinRequestCreated",
            Self::JoinRequestAccepted(_) => "JoinRequestAccepted",
            Self::JoinRequestRejected(_) => "JoinRequestRejected",
        }
    }
}
