//! Test helper factories and mock state builders
//!
//! Convenience functions for creating test objects with sensible defaults,
//! and helpers for building mock repositories / server state.
#![allow(dead_code)]

use crate::activity::ActivityLog;
use crate::api::handlers::{DashboardState, ServerState};
use crate::catalog::{CatalogProfile, Category, Task, TaskCatalog, TaskRepository};
use crate::dashboard::Dashboard;
use crate::events::{EventBus, HybridEmitter};
use crate::kv::mock::MockKvStore;
use crate::kv::DocumentKeys;
use std::sync::Arc;

pub const TEST_TASKS_KEY: &str = "seo:tasks";
pub const TEST_ACTIVITY_KEY: &str = "seo:activity";

// ============================================================================
// Model factories
// ============================================================================

/// Create a task with the given id and completion flag
pub fn test_task(id: u32, completed: bool) -> Task {
    let mut task = Task::new(
        id,
        &format!("Task {}", id),
        "Test task",
        "SEO Specialist",
    );
    task.completed = completed;
    task
}

/// Small two-category catalog: technical 1/3 done, content 2/2 done
pub fn test_catalog() -> TaskCatalog {
    TaskCatalog::new()
        .with_category(
            Category::Technical,
            vec![test_task(1, true), test_task(2, false), test_task(3, false)],
        )
        .with_category(Category::Content, vec![test_task(1, true), test_task(2, true)])
}

// ============================================================================
// Mock state builders
// ============================================================================

/// Task repository and its activity log over a mock store, using the test keys
pub fn mock_repository(
    kv: Arc<MockKvStore>,
    profile: CatalogProfile,
) -> (TaskRepository, Arc<ActivityLog>) {
    let activity = Arc::new(ActivityLog::new(kv.clone(), TEST_ACTIVITY_KEY));
    let repo = TaskRepository::new(kv, profile, TEST_TASKS_KEY, activity.clone());
    (repo, activity)
}

/// Generic dashboard over the given mock store
pub fn mock_dashboard(kv: Arc<MockKvStore>) -> Dashboard {
    Dashboard::new(kv, CatalogProfile::Generic, DocumentKeys::namespaced("seo"))
}

/// Server state over the given mock store, with a local-only event bus
pub fn mock_server_state(kv: Arc<MockKvStore>) -> DashboardState {
    let event_bus = Arc::new(HybridEmitter::new(Arc::new(EventBus::default())));
    let dashboard = mock_dashboard(kv).with_event_emitter(event_bus.clone());
    Arc::new(ServerState {
        dashboard: Arc::new(dashboard),
        event_bus,
    })
}
