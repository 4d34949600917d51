// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Commands for the Group Aggregate
//!
//! Commands express caller intent and can fail validation.
//! They contain all data needed for business rule enforcement.
//!
//! # Command Pattern
//!
//! ```text
//! Command → handle_command(Group, Command) → Result<GroupEvent, CommandError>
//! ```
//!
//! Commands differ from Events:
//! - Commands express intent (what should happen)
//! - Events express facts (what did happen)
//! - Commands can be rejected by business rules
//! - Events cannot fail (they already happened)
//!
//! # Time Handling
//!
//! Every command carries an explicit `timestamp`.
//! **NEVER call `Utc::now()` in domain logic**.
//! Time is passed in from the service layer, so handlers stay
//! deterministic and replayable in tests.

use chrono::{DateTime, Utc};

use crate::domain::{Frequency, GroupId, JoinRequestAction, RequestId, UserId, Visibility};

/// Command to create a new group
///
/// This is the initial command that creates the aggregate. `group_id` is
/// caller-supplied; uniqueness is enforced by upstream id generation, not
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateGroupCommand {
    pub group_id: GroupId,

    /// Creator; becomes the group's admin
    pub admin_id: UserId,

    pub name: String,

    /// Minimum contribution per cycle, must be positive
    pub min_contribution: f64,

    /// Member capacity, must be positive
    pub max_members: u32,

    pub visibility: Visibility,

    pub contribution_frequency: Frequency,

    pub payout_frequency: Frequency,

    pub contribution_date: Option<DateTime<Utc>>,

    pub payout_date: Option<DateTime<Utc>>,

    pub description: Option<String>,

    pub profile_image: Option<String>,

    /// Initial roster; seeds the payout order. Size bounded by `max_members`
    pub member_ids: Vec<UserId>,

    pub tier: Option<u32>,

    /// Timestamp when the command was issued (explicit time parameter)
    pub timestamp: DateTime<Utc>,
}

/// Command to join a public group directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGroupCommand {
    pub group_id: GroupId,

    pub user_id: UserId,

    /// Display name to record on the membership, when known
    pub username: Option<String>,

    /// Timestamp when the command was issued
    pub timestamp: DateTime<Utc>,
}

/// Command to request membership of a private group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJoinRequestCommand {
    pub group_id: GroupId,

    pub user_id: UserId,

    pub username: Option<String>,

    /// Timestamp when the command was issued; also the reference point for
    /// the rejection-cooldown check
    pub timestamp: DateTime<Utc>,
}

/// Command to accept or reject a waiting join request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessJoinRequestCommand {
    pub group_id: GroupId,

    pub request_id: RequestId,

    pub action: JoinRequestAction,

    /// Acting user; must hold admin authority over the group
    pub admin_id: UserId,

    /// Timestamp when the command was issued
    pub timestamp: DateTime<Utc>,
}
