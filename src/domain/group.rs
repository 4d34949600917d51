// Copyright (c) 2025 - Cowboy AI, Inc.
//! Group Read Model and Membership Value Objects
//!
//! The [`Group`] struct is the projection rebuilt by folding a group's event
//! stream; it is never hand-edited. All enums here are closed sets whose
//! serde representations are the exact wire strings other services read,
//! with `FromStr` at the string boundary so malformed input fails before a
//! command is ever handled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::ids::{GroupId, RequestId, UserId};
use crate::domain::payout::PayoutSchedule;

/// Raised when a wire string is outside one of the closed enums
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {what}: '{value}'")]
pub struct InvalidValue {
    pub what: &'static str,
    pub value: String,
}

impl InvalidValue {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

/// Whether a group accepts direct joins or requires the request flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Public" => Ok(Self::Public),
            "Private" => Ok(Self::Private),
            other => Err(InvalidValue::new("visibility", other)),
        }
    }
}

/// Contribution / payout cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    #[serde(rename = "Bi-weekly")]
    BiWeekly,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::BiWeekly => "Bi-weekly",
            Self::Weekly => "Weekly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monthly" => Ok(Self::Monthly),
            "Bi-weekly" => Ok(Self::BiWeekly),
            "Weekly" => Ok(Self::Weekly),
            other => Err(InvalidValue::new("frequency", other)),
        }
    }
}

/// Role a member holds inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
    Founder,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Founder => "founder",
        }
    }

    /// Roles allowed to process join requests
    pub fn can_process_requests(&self) -> bool {
        matches!(self, Self::Admin | Self::Founder)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "founder" => Ok(Self::Founder),
            other => Err(InvalidValue::new("role", other)),
        }
    }
}

/// Lifecycle state of a join request
///
/// Terminal states are not retained in the live projection; they exist only
/// in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Waiting,
    Accepted,
    Rejected,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admin decision on a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestAction {
    Accept,
    Reject,
}

impl JoinRequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for JoinRequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JoinRequestAction {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(InvalidValue::new("action", other)),
        }
    }
}

/// A member of a group as seen by the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: UserId,

    pub username: String,

    pub role: MemberRole,

    /// Timestamp of the event that added this member
    pub joined_at: DateTime<Utc>,

    /// Running contribution total; maintained by events outside this engine
    pub contribution: f64,

    pub last_active: DateTime<Utc>,
}

impl Member {
    pub fn new(
        user_id: UserId,
        username: String,
        role: MemberRole,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            username,
            role,
            joined_at,
            contribution: 0.0,
            last_active: joined_at,
        }
    }
}

/// A pending request to join a private group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub request_id: RequestId,

    pub user_id: UserId,

    pub username: String,

    pub state: RequestState,

    pub timestamp: DateTime<Utc>,
}

/// One rejected join request, kept for the cooldown policy and so a
/// replayed rejection can be told apart from a request that never existed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub request_id: RequestId,

    pub user_id: UserId,

    pub rejected_at: DateTime<Utc>,
}

/// The group read model
///
/// Derived entirely from replaying the group's events in timestamp order.
/// Logically immutable between rebuilds: commands always validate against a
/// freshly loaded copy and never mutate it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: GroupId,

    pub admin_id: UserId,

    pub name: String,

    pub visibility: Visibility,

    pub max_members: u32,

    pub min_contribution: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    pub contribution_frequency: Frequency,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_date: Option<DateTime<Utc>>,

    pub payout_frequency: Frequency,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<u32>,

    pub members: Vec<Member>,

    pub requests: Vec<JoinRequest>,

    /// Payout rotation state (`payoutOrder` / `currentPayoutPosition`)
    #[serde(flatten)]
    pub payout: PayoutSchedule,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payout_recipient: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payout_date: Option<DateTime<Utc>>,

    /// History of rejected join requests, newest last
    #[serde(default)]
    pub rejections: Vec<Rejection>,

    /// Timestamp of the `GroupCreated` event; `None` until the group exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Empty state used as the seed of the event fold
    ///
    /// Scalar fields hold placeholders until `GroupCreated` is applied;
    /// [`Group::is_created`] is the initialization marker.
    pub fn empty(group_id: GroupId) -> Self {
        Self {
            group_id,
            admin_id: UserId::new(""),
            name: String::new(),
            visibility: Visibility::Private,
            max_members: 0,
            min_contribution: 0.0,
            description: None,
            profile_image: None,
            contribution_frequency: Frequency::Monthly,
            contribution_date: None,
            payout_frequency: Frequency::Monthly,
            payout_date: None,
            tier: None,
            members: Vec::new(),
            requests: Vec::new(),
            payout: PayoutSchedule::default(),
            last_payout_recipient: None,
            last_payout_date: None,
            rejections: Vec::new(),
            created_at: None,
        }
    }

    /// Whether a `GroupCreated` event has been applied
    pub fn is_created(&self) -> bool {
        self.created_at.is_some()
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| &m.user_id == user_id)
    }

    pub fn member(&self, user_id: &UserId) -> Option<&Member> {
        self.members.iter().find(|m| &m.user_id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_members as usize
    }

    pub fn find_request(&self, request_id: &RequestId) -> Option<&JoinRequest> {
        self.requests.iter().find(|r| &r.request_id == request_id)
    }

    pub fn has_waiting_request(&self, user_id: &UserId) -> bool {
        self.requests
            .iter()
            .any(|r| &r.user_id == user_id && r.state == RequestState::Waiting)
    }

    /// Requests still awaiting an admin decision
    pub fn waiting_requests(&self) -> Vec<&JoinRequest> {
        self.requests
            .iter()
            .filter(|r| r.state == RequestState::Waiting)
            .collect()
    }

    /// Whether `user_id` may process join requests for this group
    ///
    /// True for the group creator and for members holding the `admin` or
    /// `founder` role.
    pub fn is_group_admin(&self, user_id: &UserId) -> bool {
        if &self.admin_id == user_id {
            return true;
        }
        self.members
            .iter()
            .any(|m| &m.user_id == user_id && m.role.can_process_requests())
    }

    /// Whether `request_id` was rejected at some point in this group's log
    pub fn was_rejected(&self, request_id: &RequestId) -> bool {
        self.rejections.iter().any(|r| &r.request_id == request_id)
    }

    /// Number of times `user_id` has been rejected from this group
    pub fn rejection_count(&self, user_id: &UserId) -> usize {
        self.rejections
            .iter()
            .filter(|r| &r.user_id == user_id)
            .count()
    }

    /// Most recent rejection timestamp for `user_id`, if any
    pub fn last_rejection_at(&self, user_id: &UserId) -> Option<DateTime<Utc>> {
        self.rejections
            .iter()
            .filter(|r| &r.user_id == user_id)
            .map(|r| r.rejected_at)
            .max()
    }
}
