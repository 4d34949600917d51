// Copyright (c) 2025 - Cowboy AI, Inc.
//! Group Aggregate - Pure Functional Event Sourcing
//!
//! The aggregate is split into three pure pieces:
//! - [`commands`] — caller intent, with explicit timestamps
//! - [`handlers`] — validation: state + command → event or [`CommandError`]
//! - [`group`] — the fold: events → state
//!
//! The service layer owns all I/O; nothing in this module touches the event
//! store, the clock, or the projection store.

pub mod commands;
pub mod group;
pub mod handlers;

pub use commands::{
    CreateGroupCommand, CreateJoinRequestCommand, JoinGroupCommand, ProcessJoinRequestCommand,
};
pub use group::{apply_event, from_events};
pub use handlers::{
    handle_create_group, handle_create_join_request, handle_join_group,
    handle_process_join_request, CommandError,
};
