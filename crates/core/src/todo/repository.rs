//! Todo repository
//!
//! Mediates between user intents and the remote store. The in-memory
//! collection is only ever replaced wholesale by `refresh`; every successful
//! mutation is followed by a full re-read instead of a local patch.
//!
//! Overlapping calls are not serialized: whichever refresh completes last
//! determines the final collection.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

use super::model::{Todo, TodoId, TodoRecord};
use super::priority::{sort_by_priority, Priority};
use super::summary::CompletionSummary;
use crate::notice::Notice;
use crate::session::{Session, UserId};
use crate::store::RemoteStore;
use crate::{Error, Result};

const NOTICE_CAPACITY: usize = 64;

/// Stateful view of the current user's todos
pub struct TodoRepository<S: RemoteStore + ?Sized> {
    store: Arc<S>,
    items: RwLock<Vec<Todo>>,
    submitting: AtomicBool,
    notice_tx: broadcast::Sender<Notice>,
}

impl<S: RemoteStore + ?Sized> TodoRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (notice_tx, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            store,
            items: RwLock::new(Vec::new()),
            submitting: AtomicBool::new(false),
            notice_tx,
        }
    }

    /// Subscribe to notices
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notice_tx.subscribe()
    }

    /// Snapshot of the sorted collection
    pub async fn items(&self) -> Vec<Todo> {
        self.items.read().await.clone()
    }

    /// Look up a todo in the current snapshot
    pub async fn get(&self, id: &str) -> Option<Todo> {
        self.items.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// True while a create is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub async fn summary(&self) -> CompletionSummary {
        CompletionSummary::from_todos(&self.items.read().await)
    }

    /// Forget the current snapshot, e.g. after sign-out
    pub async fn clear(&self) {
        self.items.write().await.clear();
    }

    /// Re-read the whole collection, normalize, sort and publish it.
    ///
    /// Without a user this is a silent no-op. On failure the previous
    /// snapshot is kept.
    pub async fn refresh(&self, session: &Session) -> Result<()> {
        let Some(user) = session.current_user_id() else {
            debug!("Skipping refresh: no user session");
            return Ok(());
        };

        match self.store.read_all(user).await {
            Ok(documents) => {
                let mut todos: Vec<Todo> = documents
                    .iter()
                    .filter_map(|(id, doc)| Todo::from_document(id, doc))
                    .collect();
                sort_by_priority(&mut todos);

                debug!("Fetched {} todos for {}", todos.len(), user);
                *self.items.write().await = todos;
                Ok(())
            }
            Err(e) => {
                error!("Fetch error: {}", e);
                self.notify(Notice::diagnostic(format!("Could not load tasks: {}", e)));
                Err(e)
            }
        }
    }

    /// Create a todo and resynchronize.
    ///
    /// The title is trimmed and must not be empty. New todos start out not
    /// completed.
    pub async fn create(
        &self,
        session: &Session,
        title: &str,
        priority: Priority,
        due_date: NaiveDate,
    ) -> Result<TodoId> {
        let user = self.require_writer(session)?;

        let title = title.trim();
        if title.is_empty() {
            self.notify(Notice::blocking("Task cannot be empty."));
            return Err(Error::Validation("title cannot be empty".into()));
        }

        self.submitting.store(true, Ordering::SeqCst);
        let record = TodoRecord::new(title, priority, due_date);
        let result = self.store.create_record(user, &record).await;
        self.submitting.store(false, Ordering::SeqCst);

        match result {
            Ok(id) => {
                info!("Created todo {}", id);
                self.resync(session).await;
                Ok(id)
            }
            Err(e) => {
                error!("Create task error: {}", e);
                self.notify(Notice::diagnostic(format!("Create task error: {}", e)));
                self.notify(Notice::blocking("Error creating task."));
                Err(e)
            }
        }
    }

    /// Flip the completed flag of a todo in the current snapshot
    pub async fn toggle_complete(&self, session: &Session, id: &str) -> Result<()> {
        let user = self.require_writer(session)?;
        let todo = self.lookup(id).await?;

        let mut record = todo.to_record();
        record.completed = !record.completed;
        self.replace_then_refresh(session, user, id, record, "Complete")
            .await
    }

    /// Replace the title of a todo in the current snapshot.
    ///
    /// The new title is stored as given, without validation.
    pub async fn edit_title(&self, session: &Session, id: &str, new_title: &str) -> Result<()> {
        let user = self.require_writer(session)?;
        let todo = self.lookup(id).await?;

        let mut record = todo.to_record();
        record.title = new_title.to_string();
        self.replace_then_refresh(session, user, id, record, "Edit")
            .await
    }

    /// Delete a todo and resynchronize. Deleting a missing id succeeds.
    pub async fn remove(&self, session: &Session, id: &str) -> Result<()> {
        let user = self.require_writer(session)?;

        if let Err(e) = self.store.delete_record(user, id).await {
            self.report_failure("Delete", &e);
            return Err(e);
        }

        info!("Deleted todo {}", id);
        self.resync(session).await;
        Ok(())
    }

    fn require_writer<'a>(&self, session: &'a Session) -> Result<&'a UserId> {
        session.require_user().inspect_err(|_| {
            warn!("Rejected write: no user session");
            self.notify(Notice::blocking("User not loaded yet. Please wait."));
        })
    }

    async fn lookup(&self, id: &str) -> Result<Todo> {
        match self.get(id).await {
            Some(todo) => Ok(todo),
            None => {
                warn!("Todo {} is not in the current snapshot", id);
                self.notify(Notice::diagnostic(format!("Task {} not found", id)));
                Err(Error::TodoNotFound(id.to_string()))
            }
        }
    }

    async fn replace_then_refresh(
        &self,
        session: &Session,
        user: &UserId,
        id: &str,
        record: TodoRecord,
        action: &str,
    ) -> Result<()> {
        if let Err(e) = self.store.replace_record(user, id, &record).await {
            self.report_failure(action, &e);
            return Err(e);
        }

        debug!("{} applied to todo {}", action, id);
        self.resync(session).await;
        Ok(())
    }

    /// Refresh after a successful write; a failed re-read is already
    /// reported by `refresh` and does not undo the write
    async fn resync(&self, session: &Session) {
        let _ = self.refresh(session).await;
    }

    fn report_failure(&self, action: &str, err: &Error) {
        error!("{} error: {}", action, err);
        self.notify(Notice::diagnostic(format!("{} error: {}", action, err)));
    }

    fn notify(&self, notice: Notice) {
        // No subscribers is fine
        let _ = self.notice_tx.send(notice);
    }
}
