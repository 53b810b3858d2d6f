//! Activity log of task state changes

mod log;
mod models;

pub use log::{ActivityLog, ACTIVITY_LOG_CAPACITY};
pub use models::{ActivityEntry, ActivityKind};
