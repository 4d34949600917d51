// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Projection Invariants
//!
//! Structural checks that must hold for any group state produced by the
//! event fold. All functions are pure and deterministic. The projector runs
//! [`check_group`] after every rebuild and logs violations rather than
//! failing the rebuild; a violation here means the fold has a bug, not that
//! a command was invalid.

use std::collections::HashSet;

use crate::domain::group::{Group, RequestState};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Invariant violation with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// More members than the configured capacity
    #[error("Group has {count} members, capacity is {capacity}")]
    CapacityExceeded { count: usize, capacity: u32 },

    /// The same user appears twice in the member list
    #[error("Duplicate member: {user_id}")]
    DuplicateMember { user_id: String },

    /// A user has more than one waiting join request
    #[error("User {user_id} has multiple waiting join requests")]
    DuplicateWaitingRequest { user_id: String },

    /// The same user appears twice in the payout order
    #[error("Duplicate payout order entry: {user_id}")]
    DuplicatePayoutEntry { user_id: String },

    /// A member is missing from the payout rotation
    #[error("Member {user_id} is not in the payout order")]
    MemberNotInPayoutOrder { user_id: String },

    /// Payout position points outside the order
    #[error("Payout position {position} out of bounds for order of length {len}")]
    PayoutPositionOutOfBounds { position: usize, len: usize },
}

/// Validate the member list fits the group's capacity
pub fn validate_capacity(group: &Group) -> ValidationResult {
    if group.is_created() && group.members.len() > group.max_members as usize {
        return Err(ValidationError::CapacityExceeded {
            count: group.members.len(),
            capacity: group.max_members,
        });
    }
    Ok(())
}

/// Validate no user appears twice in the member list
pub fn validate_unique_members(group: &Group) -> ValidationResult {
    let mut seen = HashSet::new();
    for member in &group.members {
        if !seen.insert(&member.user_id) {
            return Err(ValidationError::DuplicateMember {
                user_id: member.user_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate at most one waiting join request per user
pub fn validate_unique_waiting_requests(group: &Group) -> ValidationResult {
    let mut seen = HashSet::new();
    for request in &group.requests {
        if request.state == RequestState::Waiting && !seen.insert(&request.user_id) {
            return Err(ValidationError::DuplicateWaitingRequest {
                user_id: request.user_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate the payout rotation is consistent with the member list
///
/// # Rules
/// - Order entries are unique
/// - Every current member appears in the order (the order may additionally
///   retain the initial roster entries seeded at creation)
/// - The position indexes into the order, or is 0 when the order is empty
pub fn validate_payout_schedule(group: &Group) -> ValidationResult {
    let mut seen = HashSet::new();
    for user_id in &group.payout.order {
        if !seen.insert(user_id) {
            return Err(ValidationError::DuplicatePayoutEntry {
                user_id: user_id.to_string(),
            });
        }
    }

    for member in &group.members {
        if !group.payout.order.contains(&member.user_id) {
            return Err(ValidationError::MemberNotInPayoutOrder {
                user_id: member.user_id.to_string(),
            });
        }
    }

    let len = group.payout.order.len();
    if len == 0 {
        if group.payout.position != 0 {
            return Err(ValidationError::PayoutPositionOutOfBounds {
                position: group.payout.position,
                len,
            });
        }
    } else if group.payout.position >= len {
        return Err(ValidationError::PayoutPositionOutOfBounds {
            position: group.payout.position,
            len,
        });
    }

    Ok(())
}

/// Composite check run by the projector after every rebuild
pub fn check_group(group: &Group) -> ValidationResult {
    validate_capacity(group)?;
    validate_unique_members(group)?;
    validate_unique_waiting_requests(group)?;
    validate_payout_schedule(group)?;
    Ok(())
}
