// Copyright (c) 2025 - Cowboy AI, Inc.
//! Replay Properties of the Group Fold
//!
//! The fold must be a total, deterministic left fold: the same event
//! sequence always yields the same group, applying events one at a time
//! agrees with folding the whole stream, and any stream that could have
//! been produced by the command handlers satisfies the projection
//! invariants.

use proptest::prelude::*;

use stokvel_group_engine::aggregate::{apply_event, from_events};
use stokvel_group_engine::domain::{
    check_group, Group, GroupId, JoinRequestAction, UserId, Visibility,
};
use stokvel_group_engine::event_store::StoredEvent;

use crate::fixtures::{
    group_created_event, join_request_created_event, join_request_processed_event, stored,
    user_joined_event,
};

/// An abstract step in a group's life, indexed into a small user pool
#[derive(Debug, Clone)]
enum Step {
    Join(u8),
    Request(u8),
    ProcessOldest(bool),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u8..8).prop_map(Step::Join),
        (0u8..8).prop_map(Step::Request),
        any::<bool>().prop_map(Step::ProcessOldest),
    ]
}

fn user(index: u8) -> String {
    format!("user_{index}")
}

/// Translate abstract steps into the event stream the handlers would have
/// produced: joins and requests only when the preconditions hold, decisions
/// only against the oldest waiting request
fn events_from_steps(steps: &[Step]) -> Vec<StoredEvent> {
    let mut events = vec![stored(
        group_created_event("g1", Visibility::Private, 64),
        0,
    )];
    let mut next_request = 0usize;
    let mut offset = 1i64;

    for step in steps {
        let state = from_events(GroupId::new("g1"), &events);
        match step {
            Step::Join(index) => {
                let user = user(*index);
                if !state.is_member(&UserId::new(user.as_str())) {
                    events.push(stored(user_joined_event("g1", &user), offset));
                    offset += 1;
                }
            }
            Step::Request(index) => {
                let user = user(*index);
                let user_id = UserId::new(user.as_str());
                if !state.is_member(&user_id) && !state.has_waiting_request(&user_id) {
                    let request = format!("req_{next_request}");
                    next_request += 1;
                    events.push(stored(
                        join_request_created_event("g1", &user, &request),
                        offset,
                    ));
                    offset += 1;
                }
            }
            Step::ProcessOldest(accept) => {
                if let Some(request) = state.waiting_requests().first() {
                    let action = if *accept && !state.is_member(&request.user_id) {
                        JoinRequestAction::Accept
                    } else {
                        JoinRequestAction::Reject
                    };
                    events.push(stored(
                        join_request_processed_event(
                            "g1",
                            request.user_id.as_str(),
                            request.request_id.as_str(),
                            action,
                        ),
                        offset,
                    ));
                    offset += 1;
                }
            }
        }
    }

    events
}

fn incremental_fold(events: &[StoredEvent]) -> Group {
    let mut group = Group::empty(GroupId::new("g1"));
    for event in events {
        group = apply_event(group, event);
    }
    group
}

proptest! {
    /// Replaying the same stream twice yields identical state
    #[test]
    fn prop_replay_is_deterministic(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let events = events_from_steps(&steps);
        let first = from_events(GroupId::new("g1"), &events);
        let second = from_events(GroupId::new("g1"), &events);
        prop_assert_eq!(first, second);
    }

    /// One-at-a-time application agrees with folding the whole stream
    #[test]
    fn prop_incremental_apply_matches_full_fold(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let events = events_from_steps(&steps);
        prop_assert_eq!(
            incremental_fold(&events),
            from_events(GroupId::new("g1"), &events)
        );
    }

    /// Handler-producible streams always satisfy the projection invariants
    #[test]
    fn prop_invariants_hold_after_any_valid_stream(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let events = events_from_steps(&steps);
        let group = from_events(GroupId::new("g1"), &events);
        prop_assert!(check_group(&group).is_ok(), "violation: {:?}", check_group(&group));
    }

    /// A prefix of the log is itself a valid log (folds without violations)
    #[test]
    fn prop_every_prefix_is_consistent(steps in prop::collection::vec(step_strategy(), 0..25)) {
        let events = events_from_steps(&steps);
        for cut in 0..=events.len() {
            let group = from_events(GroupId::new("g1"), &events[..cut]);
            prop_assert!(check_group(&group).is_ok());
        }
    }

    /// Membership and the payout rotation never disagree
    #[test]
    fn prop_members_always_in_payout_order(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let events = events_from_steps(&steps);
        let group = from_events(GroupId::new("g1"), &events);
        for member in &group.members {
            prop_assert!(group.payout.order.contains(&member.user_id));
        }
    }
}
