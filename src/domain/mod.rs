// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Value Objects and Pure Business Rules
//!
//! Everything in this module is pure: identifier newtypes, the group read
//! model and its closed enums, the payout rotation schedule, and the
//! invariant checks the projector runs after each rebuild. No I/O, no
//! clocks; time always arrives as a parameter.

pub mod group;
pub mod ids;
pub mod invariants;
pub mod payout;

pub use group::{
    Frequency, Group, InvalidValue, JoinRequest, JoinRequestAction, Member, MemberRole,
    Rejection, RequestState, Visibility,
};
pub use ids::{EventId, GroupId, RequestId, UserId};
pub use invariants::{check_group, ValidationError, ValidationResult};
pub use payout::PayoutSchedule;
