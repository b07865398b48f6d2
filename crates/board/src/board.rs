//! Todo board
//!
//! Dispatches user intents into the repository. Failures are never
//! propagated as panics: the repository publishes them as notices, which
//! the board collects for display.

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use todo_core::{
    CompletionSummary, IdentityProvider, Notice, RemoteStore, Result, Session, TodoId,
    TodoRepository, UserProfile,
};

use crate::draft::TodoDraft;
use crate::view::TodoRow;

pub struct TodoBoard<S: RemoteStore + ?Sized, I: IdentityProvider + ?Sized> {
    repository: TodoRepository<S>,
    identity: Arc<I>,
    draft: TodoDraft,
    notice_rx: broadcast::Receiver<Notice>,
    last_error: Mutex<Option<String>>,
}

impl<S: RemoteStore + ?Sized, I: IdentityProvider + ?Sized> TodoBoard<S, I> {
    pub fn new(store: Arc<S>, identity: Arc<I>) -> Self {
        let repository = TodoRepository::new(store);
        let notice_rx = repository.subscribe();
        Self {
            repository,
            identity,
            draft: TodoDraft::default(),
            notice_rx,
            last_error: Mutex::new(None),
        }
    }

    pub fn repository(&self) -> &TodoRepository<S> {
        &self.repository
    }

    pub fn draft(&self) -> &TodoDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TodoDraft {
        &mut self.draft
    }

    /// Current session from the identity provider
    pub async fn session(&self) -> Session {
        self.identity.session().await
    }

    /// Sign in and load the user's todos
    pub async fn sign_in(&self, user: UserProfile) -> Result<()> {
        let session = self.identity.login(user).await?;
        self.repository.refresh(&session).await
    }

    /// Sign out and drop the previous user's todos from view
    pub async fn sign_out(&self) -> Result<()> {
        self.identity.logout().await?;
        self.repository.clear().await;
        Ok(())
    }

    /// Reload from the store, e.g. when the view is first shown
    pub async fn reload(&self) -> Result<()> {
        let session = self.session().await;
        self.repository.refresh(&session).await
    }

    /// Create a todo from the draft.
    ///
    /// The draft title is cleared only when the store accepted the todo.
    pub async fn submit(&mut self) -> Result<TodoId> {
        let session = self.session().await;
        let created = self
            .repository
            .create(
                &session,
                &self.draft.title,
                self.draft.priority.clone(),
                self.draft.due_date,
            )
            .await;
        let id = self.track(created)?;

        debug!("Draft submitted as {}", id);
        self.draft.clear_title();
        Ok(id)
    }

    pub async fn toggle(&self, id: &str) -> Result<()> {
        let session = self.session().await;
        self.track(self.repository.toggle_complete(&session, id).await)
    }

    pub async fn edit(&self, id: &str, title: &str) -> Result<()> {
        let session = self.session().await;
        self.track(self.repository.edit_title(&session, id, title).await)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let session = self.session().await;
        self.track(self.repository.remove(&session, id).await)
    }

    /// Rows in repository order
    pub async fn rows(&self) -> Vec<TodoRow> {
        self.repository.items().await.iter().map(TodoRow::from).collect()
    }

    pub async fn summary(&self) -> CompletionSummary {
        self.repository.summary().await
    }

    pub fn is_submitting(&self) -> bool {
        self.repository.is_submitting()
    }

    /// Header line for the signed-in user
    pub async fn greeting(&self) -> Option<String> {
        let session = self.session().await;
        let user = session.current_user()?;
        let name = user
            .given_name
            .as_deref()
            .or(user.display_name.as_deref())
            .unwrap_or(user.subject_id.as_str());
        Some(format!("Manage your tasks @{}", name))
    }

    /// Message of the most recent failed intent, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        match self.last_error.lock() {
            Ok(last) => last.clone(),
            Err(_) => None,
        }
    }

    fn track<T>(&self, result: Result<T>) -> Result<T> {
        let message = result.as_ref().err().map(ToString::to_string);
        if let Ok(mut last) = self.last_error.lock() {
            *last = message;
        }
        result
    }

    /// Drain notices published since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        loop {
            match self.notice_rx.try_recv() {
                Ok(notice) => notices.push(notice),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Dropped {} notices", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        notices
    }
}
