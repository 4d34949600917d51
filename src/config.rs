// Copyright (c) 2025 - Cowboy AI, Inc.
//! Engine Configuration
//!
//! Tunable policies for the command handlers. Defaults match the platform's
//! production rules; individual checks can be relaxed or disabled per
//! deployment.

use serde::{Deserialize, Serialize};

/// What to do when an admin processes a join request that has already been
/// decided (for example two admins racing on the same request)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessedRequestPolicy {
    /// Surface a conflict to the caller
    #[default]
    Error,

    /// Treat the command as a no-op; nothing is appended
    Ignore,
}

/// Policy gates applied when a user requests to join a private group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinRequestPolicy {
    /// Days a user must wait after a rejection before requesting again;
    /// `None` disables the cooldown
    pub rejection_cooldown_days: Option<i64>,

    /// Rejections after which a user may never re-request;
    /// `None` disables the cap
    pub max_rejections: Option<u32>,

    /// Handling of already-processed requests
    pub on_processed: ProcessedRequestPolicy,
}

impl Default for JoinRequestPolicy {
    fn default() -> Self {
        Self {
            rejection_cooldown_days: Some(7),
            max_rejections: Some(3),
            on_processed: ProcessedRequestPolicy::Error,
        }
    }
}

impl JoinRequestPolicy {
    /// Policy with every gate disabled; useful in tests
    pub fn permissive() -> Self {
        Self {
            rejection_cooldown_days: None,
            max_rejections: None,
            on_processed: ProcessedRequestPolicy::Error,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub join_requests: JoinRequestPolicy,
}
