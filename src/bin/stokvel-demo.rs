// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stokvel Group Engine Demo
//!
//! Walks a group through its lifecycle against the in-memory stores:
//! create, direct joins, the private request flow, and the payout rotation.
//!
//! Run with: cargo run --bin stokvel-demo

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use stokvel_group_engine::aggregate::commands::{
    CreateGroupCommand, CreateJoinRequestCommand, ProcessJoinRequestCommand,
};
use stokvel_group_engine::domain::{Frequency, JoinRequestAction, Visibility};
use stokvel_group_engine::{
    EngineConfig, EventSourcedGroupService, GroupId, GroupService, InMemoryEventStore,
    InMemoryProjectionStore, UserId,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("🚀 Starting stokvel group engine demo");

    let event_store = Arc::new(InMemoryEventStore::new());
    let projection_store = Arc::new(InMemoryProjectionStore::new());
    let service = EventSourcedGroupService::new(
        event_store.clone(),
        projection_store,
        EngineConfig::default(),
    );

    let group_id = GroupId::new("grp_demo");
    let admin = UserId::new("user_nomsa");

    // Create a private group with the founder on the roster
    service
        .create_group(CreateGroupCommand {
            group_id: group_id.clone(),
            admin_id: admin.clone(),
            name: "Sisonke Savers".to_string(),
            min_contribution: 500.0,
            max_members: 8,
            visibility: Visibility::Private,
            contribution_frequency: Frequency::Monthly,
            payout_frequency: Frequency::Monthly,
            contribution_date: None,
            payout_date: None,
            description: Some("Monthly rotating savings circle".to_string()),
            profile_image: None,
            member_ids: vec![admin.clone()],
            tier: Some(1),
            timestamp: Utc::now(),
        })
        .await?;
    info!("✅ Group created");

    // Two users ask to join; the admin accepts one and rejects the other
    for user in ["user_thabo", "user_lerato"] {
        service
            .create_join_request(CreateJoinRequestCommand {
                group_id: group_id.clone(),
                user_id: UserId::new(user),
                username: Some(user.trim_start_matches("user_").to_string()),
                timestamp: Utc::now(),
            })
            .await?;
    }

    let waiting = service.group_join_requests(&group_id).await?;
    info!("📋 {} join requests waiting", waiting.len());

    let decisions = [JoinRequestAction::Accept, JoinRequestAction::Reject];
    for (request, action) in waiting.iter().zip(decisions) {
        service
            .process_join_request(ProcessJoinRequestCommand {
                group_id: group_id.clone(),
                request_id: request.request_id.clone(),
                action,
                admin_id: admin.clone(),
                timestamp: Utc::now(),
            })
            .await?;
        info!(
            "🗳️  Request {} from {}: {}",
            request.request_id, request.username, action
        );
    }

    let group = service
        .get_group(&group_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("group projection missing"))?;
    info!("👥 Members: {}", group.members.len());
    info!("🔁 Payout order: {:?}", group.payout.order);

    if let Some(next) = service.next_payout_recipient(&group_id).await? {
        info!("💸 Next payout goes to {next}");
    }

    info!("📦 {} events in the log", event_store.len().await);
    info!("🏁 Demo complete");
    Ok(())
}
