// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for the group engine
//!
//! Deterministic builders for commands and stored events. All timestamps
//! are fixed constants offset by explicit milliseconds, so every test is
//! reproducible.

// Each test binary uses a different subset of these builders
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};

use stokvel_group_engine::aggregate::commands::{
    CreateGroupCommand, CreateJoinRequestCommand, JoinGroupCommand, ProcessJoinRequestCommand,
};
use stokvel_group_engine::domain::{
    EventId, Frequency, GroupId, JoinRequestAction, MemberRole, RequestId, RequestState, UserId,
    Visibility,
};
use stokvel_group_engine::event_store::StoredEvent;
use stokvel_group_engine::events::{
    GroupCreated, GroupEvent, JoinRequestCreated, JoinRequestProcessed, UserJoinedGroup,
};

// Fixed test timestamp (2026-02-01T08:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-02-01T08:00:00Z";

/// Parse the fixed base timestamp
pub fn base_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Base timestamp shifted by whole days (for cooldown scenarios)
pub fn days_later(days: i64) -> DateTime<Utc> {
    base_timestamp() + Duration::days(days)
}

/// A valid CreateGroup command; tests override individual fields
pub fn create_group_command(group: &str, visibility: Visibility) -> CreateGroupCommand {
    CreateGroupCommand {
        group_id: GroupId::new(group),
        admin_id: UserId::new("admin"),
        name: "Sisonke Savers".to_string(),
        min_contribution: 250.0,
        max_members: 4,
        visibility,
        contribution_frequency: Frequency::Monthly,
        payout_frequency: Frequency::Monthly,
        contribution_date: None,
        payout_date: None,
        description: Some("Test stokvel".to_string()),
        profile_image: None,
        member_ids: vec![],
        tier: None,
        timestamp: base_timestamp(),
    }
}

pub fn join_group_command(group: &str, user: &str) -> JoinGroupCommand {
    JoinGroupCommand {
        group_id: GroupId::new(group),
        user_id: UserId::new(user),
        username: Some(user.to_string()),
        timestamp: base_timestamp(),
    }
}

pub fn create_join_request_command(group: &str, user: &str) -> CreateJoinRequestCommand {
    CreateJoinRequestCommand {
        group_id: GroupId::new(group),
        user_id: UserId::new(user),
        username: Some(user.to_string()),
        timestamp: base_timestamp(),
    }
}

pub fn process_join_request_command(
    group: &str,
    request: &RequestId,
    action: JoinRequestAction,
    admin: &str,
) -> ProcessJoinRequestCommand {
    ProcessJoinRequestCommand {
        group_id: GroupId::new(group),
        request_id: request.clone(),
        action,
        admin_id: UserId::new(admin),
        timestamp: base_timestamp(),
    }
}

/// Wrap a domain event as stored, stamped `offset_ms` after the base time
pub fn stored(event: GroupEvent, offset_ms: i64) -> StoredEvent {
    StoredEvent {
        id: EventId::generate(),
        event,
        timestamp: base_timestamp() + Duration::milliseconds(offset_ms),
    }
}

pub fn group_created_event(group: &str, visibility: Visibility, max_members: u32) -> GroupEvent {
    GroupEvent::GroupCreated(GroupCreated {
        group_id: GroupId::new(group),
        admin_id: UserId::new("admin"),
        name: "Sisonke Savers".to_string(),
        min_contribution: 250.0,
        max_members,
        description: None,
        profile_image: None,
        visibility,
        contribution_frequency: Frequency::Monthly,
        contribution_date: None,
        payout_frequency: Frequency::Monthly,
        payout_date: None,
        member_ids: vec![],
        tier: None,
    })
}

pub fn user_joined_event(group: &str, user: &str) -> GroupEvent {
    GroupEvent::UserJoinedGroup(UserJoinedGroup {
        group_id: GroupId::new(group),
        user_id: UserId::new(user),
        role: MemberRole::Member,
        username: Some(user.to_string()),
    })
}

pub fn join_request_created_event(group: &str, user: &str, request: &str) -> GroupEvent {
    GroupEvent::JoinRequestCreated(JoinRequestCreated {
        group_id: GroupId::new(group),
        user_id: UserId::new(user),
        request_id: RequestId::new(request),
        state: RequestState::Waiting,
        username: Some(user.to_string()),
    })
}

pub fn join_request_processed_event(
    group: &str,
    user: &str,
    request: &str,
    action: JoinRequestAction,
) -> GroupEvent {
    let payload = JoinRequestProcessed {
        group_id: GroupId::new(group),
        request_id: RequestId::new(request),
        user_id: UserId::new(user),
        action,
        processed_by: UserId::new("admin"),
        role: match action {
            JoinRequestAction::Accept => Some(MemberRole::Member),
            JoinRequestAction::Reject => None,
        },
    };
    match action {
        JoinRequestAction::Accept => GroupEvent::JoinRequestAccepted(payload),
        JoinRequestAction::Reject => GroupEvent::JoinRequestRejected(payload),
    }
}
