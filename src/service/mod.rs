// Copyright (c) 2025 - Cowboy AI, Inc.
//! Application Services
//!
//! Service implementations that coordinate aggregates, the event store,
//! and projections. All I/O lives here; the aggregate underneath is pure.

pub mod group;

pub use group::{EventSourcedGroupService, GroupService, ServiceError, ServiceResult};
