//! Core library for todo synchronization
//!
//! This crate contains the core logic, including:
//! - Session context and the identity provider seam
//! - Remote document store clients
//! - Priority ordering
//! - The todo repository that keeps the local view in sync

pub mod config;
pub mod error;
pub mod notice;
pub mod session;
pub mod store;
pub mod todo;

pub use config::StoreConfig;
pub use error::Error;
pub use notice::{Notice, NoticeLevel};
pub use session::{IdentityProvider, Session, StaticIdentityProvider, UserId, UserProfile};
pub use store::{HttpRemoteStore, MemoryRemoteStore, RemoteStore};
pub use todo::{CompletionSummary, Priority, Todo, TodoId, TodoRecord, TodoRepository};

pub type Result<T> = std::result::Result<T, Error>;
