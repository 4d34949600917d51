// Copyright (c) 2025 - Cowboy AI, Inc.
//! Payout Rotation Schedule
//!
//! Pure value type tracking who receives the next payout. The order is
//! append-only on joins and compacts on removals; the position index is
//! adjusted so the rotation never skips or double-pays a member because
//! someone else left.

use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;

/// Rotation state carried inside the group projection
///
/// Serialized flattened into the group document as `payoutOrder` and
/// `currentPayoutPosition`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSchedule {
    #[serde(rename = "payoutOrder")]
    pub order: Vec<UserId>,

    #[serde(rename = "currentPayoutPosition")]
    pub position: usize,
}

impl PayoutSchedule {
    /// Seed the rotation from an initial member list, in list order
    pub fn new(order: Vec<UserId>) -> Self {
        Self { order, position: 0 }
    }

    /// The member due to receive the next payout
    ///
    /// The modulo guards against a stale position after removals; `None`
    /// only when the rotation is empty.
    pub fn next_recipient(&self) -> Option<&UserId> {
        if self.order.is_empty() {
            return None;
        }
        self.order.get(self.position % self.order.len())
    }

    /// Rotation state after a payout has been made
    pub fn advanced(mut self) -> Self {
        if !self.order.is_empty() {
            self.position = (self.position + 1) % self.order.len();
        }
        self
    }

    /// Rotation state with `user_id` appended at the end
    ///
    /// Idempotent: a member already in the order is not added twice.
    pub fn with_member(mut self, user_id: UserId) -> Self {
        if !self.order.contains(&user_id) {
            self.order.push(user_id);
        }
        self
    }

    /// Rotation state with `user_id` removed
    ///
    /// If the removed slot was before the current position, the position
    /// shifts down one so the member who was next is still next. A position
    /// that falls off the end wraps to the start.
    pub fn without_member(mut self, user_id: &UserId) -> Self {
        if let Some(index) = self.order.iter().position(|u| u == user_id) {
            self.order.remove(index);
            if index < self.position {
                self.position -= 1;
            }
            if self.position >= self.order.len() {
                self.position = 0;
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule(ids: &[&str]) -> PayoutSchedule {
        PayoutSchedule::new(ids.iter().map(|s| UserId::new(*s)).collect())
    }

    #[test]
    fn test_next_recipient_walks_the_order() {
        let s = schedule(&["a", "b", "c"]);
        assert_eq!(s.next_recipient(), Some(&UserId::new("a")));

        let s = s.advanced();
        assert_eq!(s.next_recipient(), Some(&UserId::new("b")));

        let s = s.advanced().advanced();
        assert_eq!(s.next_recipient(), Some(&UserId::new("a")));
        assert_eq!(s.position, 0);
    }

    #[test]
    fn test_empty_rotation() {
        let s = PayoutSchedule::default();
        assert_eq!(s.next_recipient(), None);
        let s = s.advanced();
        assert_eq!(s.position, 0);
    }

    #[test]
    fn test_with_member_is_idempotent() {
        let s = schedule(&["a"]).with_member(UserId::new("b"));
        assert_eq!(s.len(), 2);
        let s = s.with_member(UserId::new("b"));
        assert_eq!(s.len(), 2);
        assert_eq!(s.order, vec![UserId::new("a"), UserId::new("b")]);
    }

    #[test]
    fn test_removal_before_position_keeps_next_recipient() {
        // Order [a, b, c], payout made to a, so b is next. Removing a must
        // leave b as the next recipient.
        let s = schedule(&["a", "b", "c"]).advanced();
        assert_eq!(s.next_recipient(), Some(&UserId::new("b")));

        let s = s.without_member(&UserId::new("a"));
        assert_eq!(s.position, 0);
        assert_eq!(s.next_recipient(), Some(&UserId::new("b")));
    }

    #[test]
    fn test_removal_after_position_leaves_position_alone() {
        let s = schedule(&["a", "b", "c"]).advanced();
        let s = s.without_member(&UserId::new("c"));
        assert_eq!(s.position, 1);
        assert_eq!(s.next_recipient(), Some(&UserId::new("b")));
    }

    #[test]
    fn test_position_wraps_when_tail_is_removed() {
        let s = schedule(&["a", "b"]).advanced();
        assert_eq!(s.next_recipient(), Some(&UserId::new("b")));

        let s = s.without_member(&UserId::new("b"));
        assert_eq!(s.position, 0);
        assert_eq!(s.next_recipient(), Some(&UserId::new("a")));
    }

    #[test]
    fn test_removing_unknown_member_is_a_no_op() {
        let s = schedule(&["a", "b"]).advanced();
        let t = s.clone().without_member(&UserId::new("zz"));
        assert_eq!(s, t);
    }

    #[test]
    fn test_wire_field_names() {
        let s = schedule(&["a"]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["payoutOrder"], serde_json::json!(["a"]));
        assert_eq!(json["currentPayoutPosition"], 0);
    }
}
