//! In-memory document store
//!
//! Keeps each user's documents as raw JSON, the way the remote store does,
//! and counts calls per operation so callers can assert what was written.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::RwLock;

use super::remote::{RecordMap, RemoteStore};
use crate::session::UserId;
use crate::todo::{TodoId, TodoRecord};
use crate::{Error, Result};

/// Store operation, used to target injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Create,
    Read,
    Replace,
    Delete,
}

impl StoreOp {
    fn action(self) -> &'static str {
        match self {
            Self::Create => "create todo",
            Self::Read => "read todos",
            Self::Replace => "update todo",
            Self::Delete => "delete todo",
        }
    }
}

/// Failure to inject into the next call of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    /// Behave as if the transport failed
    Unavailable,
    /// Answer with the given non-2xx status
    Rejected(u16),
}

impl StoreFailure {
    fn into_error(self, action: &str) -> Error {
        match self {
            Self::Unavailable => Error::StoreUnavailable(format!("Failed to {}: injected", action)),
            Self::Rejected(status) => {
                Error::rejected(status, format!("Failed to {}: injected", action))
            }
        }
    }
}

/// Number of calls made per operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub creates: usize,
    pub reads: usize,
    pub replaces: usize,
    pub deletes: usize,
}

impl StoreCalls {
    /// Calls that modify the store
    pub fn writes(&self) -> usize {
        self.creates + self.replaces + self.deletes
    }
}

#[derive(Default)]
struct CallCounters {
    creates: AtomicUsize,
    reads: AtomicUsize,
    replaces: AtomicUsize,
    deletes: AtomicUsize,
}

/// Document store held in process memory
#[derive(Default)]
pub struct MemoryRemoteStore {
    /// Documents per user; the map keeps keys sorted, so ids that sort
    /// chronologically come back in creation order
    collections: RwLock<HashMap<UserId, RecordMap>>,
    next_id: AtomicU64,
    calls: CallCounters,
    failures: Mutex<HashMap<StoreOp, StoreFailure>>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made so far
    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            creates: self.calls.creates.load(Ordering::SeqCst),
            reads: self.calls.reads.load(Ordering::SeqCst),
            replaces: self.calls.replaces.load(Ordering::SeqCst),
            deletes: self.calls.deletes.load(Ordering::SeqCst),
        }
    }

    /// Make the next call of `op` fail
    pub fn fail_next(&self, op: StoreOp, failure: StoreFailure) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(op, failure);
        }
    }

    /// Put a raw document in place without counting a call
    pub async fn insert_document(&self, user: &str, id: &str, document: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(user.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Drop a document without counting a call, as another client would
    pub async fn remove_document(&self, user: &str, id: &str) -> bool {
        let mut collections = self.collections.write().await;
        collections
            .get_mut(user)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Raw document as currently stored
    pub async fn document(&self, user: &str, id: &str) -> Option<Value> {
        let collections = self.collections.read().await;
        collections.get(user).and_then(|docs| docs.get(id)).cloned()
    }

    fn take_failure(&self, op: StoreOp) -> Result<()> {
        let failure = match self.failures.lock() {
            Ok(mut failures) => failures.remove(&op),
            Err(_) => None,
        };
        match failure {
            Some(failure) => Err(failure.into_error(op.action())),
            None => Ok(()),
        }
    }

    fn generate_id(&self) -> TodoId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("-N{:012}", n)
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn create_record(&self, user: &UserId, record: &TodoRecord) -> Result<TodoId> {
        self.calls.creates.fetch_add(1, Ordering::SeqCst);
        self.take_failure(StoreOp::Create)?;

        let document = serde_json::to_value(record)?;
        let id = self.generate_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(user.clone())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn read_all(&self, user: &UserId) -> Result<RecordMap> {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        self.take_failure(StoreOp::Read)?;

        let collections = self.collections.read().await;
        Ok(collections.get(user).cloned().unwrap_or_default())
    }

    async fn replace_record(&self, user: &UserId, id: &str, record: &TodoRecord) -> Result<()> {
        self.calls.replaces.fetch_add(1, Ordering::SeqCst);
        self.take_failure(StoreOp::Replace)?;

        let document = serde_json::to_value(record)?;
        let mut collections = self.collections.write().await;
        collections
            .entry(user.clone())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn delete_record(&self, user: &UserId, id: &str) -> Result<()> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        self.take_failure(StoreOp::Delete)?;

        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(user) {
            docs.remove(id);
        }
        Ok(())
    }
}
