//! Remote store trait
//!
//! Defines the interface for document store operations. Implementations
//! know nothing about priorities or ordering.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::session::UserId;
use crate::todo::{TodoId, TodoRecord};
use crate::Result;

/// Raw documents of one user's collection, keyed by store id
pub type RecordMap = Map<String, Value>;

/// Interface for the remote document store
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Append a record to the user's collection and return its new id
    async fn create_record(&self, user: &UserId, record: &TodoRecord) -> Result<TodoId>;

    /// Read every document of the user's collection.
    ///
    /// An absent collection is an empty map, not an error.
    async fn read_all(&self, user: &UserId) -> Result<RecordMap>;

    /// Overwrite one record; the record does not need to exist
    async fn replace_record(&self, user: &UserId, id: &str, record: &TodoRecord) -> Result<()>;

    /// Remove one record; removing a missing id succeeds
    async fn delete_record(&self, user: &UserId, id: &str) -> Result<()>;
}
