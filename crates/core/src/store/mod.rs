//! Remote store module
//!
//! Per-user CRUD over JSON documents addressed as `todos/{user}[/{id}]`.

mod http;
mod memory;
mod remote;

pub use http::HttpRemoteStore;
pub use memory::{MemoryRemoteStore, StoreCalls, StoreFailure, StoreOp};
pub use remote::{RecordMap, RemoteStore};
