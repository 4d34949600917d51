// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Command Handlers for the Group Aggregate
//!
//! Command handlers are pure functions that:
//! 1. Take the freshly rebuilt group state + a command
//! 2. Validate business rules
//! 3. Return an Event (success) or an Error (validation failure)
//!
//! # Handler Pattern
//!
//! ```text
//! handle_command(Group, Command) → Result<GroupEvent, CommandError>
//! ```
//!
//! All handlers are **pure functions**: no I/O, no `Utc::now()`, no
//! mutations. The event log is only touched after a handler succeeds, so a
//! failed command never writes partial state.
//!
//! # Business Rule Enforcement
//!
//! - Direct joins only into `Public` groups; requests only into `Private`
//!   groups (each check steers the caller to the other path)
//! - Capacity is enforced on both join paths and again at accept time
//! - Only the group admin or a member with the `admin`/`founder` role may
//!   process join requests
//! - Rejection cooldown and rejection cap per [`JoinRequestPolicy`]

use crate::aggregate::commands::*;
use crate::config::{JoinRequestPolicy, ProcessedRequestPolicy};
use crate::domain::{
    Group, InvalidValue, JoinRequestAction, MemberRole, RequestId, RequestState, Visibility,
};
use crate::events::{
    GroupCreated, GroupEvent, JoinRequestCreated, JoinRequestProcessed, UserJoinedGroup,
};

/// Command validation error
///
/// The four variants are the caller-facing taxonomy: all are detected
/// before any event is appended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Malformed or out-of-range command input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced group or join request does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule violation against current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Acting user lacks authority over the group
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<InvalidValue> for CommandError {
    fn from(err: InvalidValue) -> Self {
        CommandError::InvalidArgument(err.to_string())
    }
}

/// Handle CreateGroup
///
/// # Business Rules
/// - `name` must not be blank
/// - `min_contribution` and `max_members` must be positive
/// - The initial roster must fit the capacity
///
/// Uniqueness of `group_id` is enforced by upstream id generation, not
/// here.
pub fn handle_create_group(command: CreateGroupCommand) -> Result<GroupEvent, CommandError> {
    if command.name.trim().is_empty() {
        return Err(CommandError::InvalidArgument(
            "Group name must not be empty".to_string(),
        ));
    }

    if command.min_contribution <= 0.0 {
        return Err(CommandError::InvalidArgument(
            "Minimum contribution must be greater than zero".to_string(),
        ));
    }

    if command.max_members == 0 {
        return Err(CommandError::InvalidArgument(
            "Maximum members must be greater than zero".to_string(),
        ));
    }

    if command.member_ids.len() > command.max_members as usize {
        return Err(CommandError::InvalidArgument(format!(
            "Initial member list ({}) exceeds maximum members ({})",
            command.member_ids.len(),
            command.max_members
        )));
    }

    Ok(GroupEvent::GroupCreated(GroupCreated {
        group_id: command.group_id,
        admin_id: command.admin_id,
        name: command.name,
        min_contribution: command.min_contribution,
        max_members: command.max_members,
        description: command.description,
        profile_image: command.profile_image,
        visibility: command.visibility,
        contribution_frequency: command.contribution_frequency,
        contribution_date: command.contribution_date,
        payout_frequency: command.payout_frequency,
        payout_date: command.payout_date,
        member_ids: command.member_ids,
        tier: command.tier,
    }))
}

/// Handle JoinGroup (direct join)
///
/// # Business Rules
/// - Group must exist
/// - Caller must not already be a member
/// - Group must have spare capacity
/// - Group must be `Public`; private groups use the request flow
pub fn handle_join_group(state: &Group, command: JoinGroupCommand) -> Result<GroupEvent, CommandError> {
    if !state.is_created() {
        return Err(CommandError::NotFound(format!(
            "Group {} not found",
            command.group_id
        )));
    }

    if state.is_member(&command.user_id) {
        return Err(CommandError::Conflict(
            "User is already a member of this group".to_string(),
        ));
    }

    if state.is_full() {
        return Err(CommandError::Conflict(
            "Group is at maximum capacity".to_string(),
        ));
    }

    if state.visibility != Visibility::Public {
        return Err(CommandError::Conflict(
            "Private groups require a join request".to_string(),
        ));
    }

    Ok(GroupEvent::UserJoinedGroup(UserJoinedGroup {
        group_id: command.group_id,
        user_id: command.user_id,
        role: MemberRole::Member,
        username: command.username,
    }))
}

/// Handle CreateJoinRequest (private-group join flow)
///
/// # Business Rules
/// - Group must exist, caller not a member, group not full
/// - At most one waiting request per user
/// - Group must be `Private`; public groups are joined directly
/// - Rejection cooldown and cap per `policy`, evaluated against the
///   command timestamp
pub fn handle_create_join_request(
    state: &Group,
    command: CreateJoinRequestCommand,
    policy: &JoinRequestPolicy,
) -> Result<GroupEvent, CommandError> {
    if !state.is_created() {
        return Err(CommandError::NotFound(format!(
            "Group {} not found",
            command.group_id
        )));
    }

    if state.is_member(&command.user_id) {
        return Err(CommandError::Conflict(
            "User is already a member of this group".to_string(),
        ));
    }

    if state.has_waiting_request(&command.user_id) {
        return Err(CommandError::Conflict(
            "User already has a pending join request for this group".to_string(),
        ));
    }

    if state.is_full() {
        return Err(CommandError::Conflict(
            "Group is at maximum capacity".to_string(),
        ));
    }

    if state.visibility != Visibility::Private {
        return Err(CommandError::Conflict(
            "Public groups can be joined directly".to_string(),
        ));
    }

    if let Some(max) = policy.max_rejections {
        if state.rejection_count(&command.user_id) >= max as usize {
            return Err(CommandError::Conflict(format!(
                "User has been rejected {max} times and may not request again"
            )));
        }
    }

    if let Some(days) = policy.rejection_cooldown_days {
        if let Some(rejected_at) = state.last_rejection_at(&command.user_id) {
            if command.timestamp - rejected_at < chrono::Duration::days(days) {
                return Err(CommandError::Conflict(format!(
                    "User must wait {days} days after a rejection before requesting again"
                )));
            }
        }
    }

    Ok(GroupEvent::JoinRequestCreated(JoinRequestCreated {
        group_id: command.group_id,
        user_id: command.user_id,
        request_id: RequestId::generate(),
        state: RequestState::Waiting,
        username: command.username,
    }))
}

/// Handle ProcessJoinRequest (accept or reject)
///
/// # Business Rules
/// - Group must exist; acting user must hold admin authority
/// - Request must exist and still be waiting
/// - `accept` additionally requires spare capacity
///
/// Returns `Ok(None)` when the request was already decided and the policy
/// is [`ProcessedRequestPolicy::Ignore`]; nothing is appended in that case.
pub fn handle_process_join_request(
    state: &Group,
    command: ProcessJoinRequestCommand,
    policy: &JoinRequestPolicy,
) -> Result<Option<GroupEvent>, CommandError> {
    if !state.is_created() {
        return Err(CommandError::NotFound(format!(
            "Group {} not found",
            command.group_id
        )));
    }

    if !state.is_group_admin(&command.admin_id) {
        return Err(CommandError::Forbidden(
            "User is not authorized to process join requests for this group".to_string(),
        ));
    }

    let request = match state.find_request(&command.request_id) {
        Some(request) if request.state == RequestState::Waiting => request,
        Some(_) => return already_processed(policy),
        // Terminal requests leave the live list; a rejected id is still
        // visible in the rejection history
        None if state.was_rejected(&command.request_id) => {
            return already_processed(policy);
        }
        None => {
            return Err(CommandError::NotFound(format!(
                "Join request {} not found",
                command.request_id
            )));
        }
    };

    let role = match command.action {
        JoinRequestAction::Accept => {
            if state.is_full() {
                return Err(CommandError::Conflict(
                    "Group is at maximum capacity".to_string(),
                ));
            }
            if state.is_member(&request.user_id) {
                return Err(CommandError::Conflict(
                    "User is already a member of this group".to_string(),
                ));
            }
            Some(MemberRole::Member)
        }
        JoinRequestAction::Reject => None,
    };

    let payload = JoinRequestProcessed {
        group_id: command.group_id,
        request_id: command.request_id,
        user_id: request.user_id.clone(),
        action: command.action,
        processed_by: command.admin_id,
        role,
    };

    Ok(Some(match command.action {
        JoinRequestAction::Accept => GroupEvent::JoinRequestAccepted(payload),
        JoinRequestAction::Reject => GroupEvent::JoinRequestRejected(payload),
    }))
}

fn already_processed(policy: &JoinRequestPolicy) -> Result<Option<GroupEvent>, CommandError> {
    match policy.on_processed {
        ProcessedRequestPolicy::Error => Err(CommandError::Conflict(
            "Join request has already been processed".to_string(),
        )),
        ProcessedRequestPolicy::Ignore => Ok(None),
    }
}
