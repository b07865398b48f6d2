//! Todo module
//!
//! This module contains todo types, the priority ordering policy and the
//! repository that keeps the local view in sync with the remote store.

mod model;
mod priority;
mod repository;
mod summary;

pub use model::*;
pub use priority::{rank, sort_by_priority, Priority, UNRANKED};
pub use repository::TodoRepository;
pub use summary::CompletionSummary;
