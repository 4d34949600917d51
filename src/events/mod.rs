// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Events
//!
//! Events are immutable facts. They are produced by command handlers after
//! validation, appended to the event store, and folded into projections.
//!
//! ```text
//! Command → Handler → Event → EventStore → Projector
//!   (intent)  (validate)  (fact)   (persist)   (rebuild view)
//! ```

pub mod group;

pub use group::{
    GroupCreated, GroupEvent, JoinRequestCreated, JoinRequestProcessed, UserJoinedGroup,
};
