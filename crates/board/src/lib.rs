//! Presentation layer for the todo repository
//!
//! Holds the create form draft, turns user intents into repository calls
//! and exposes the repository's collection as display rows.

mod board;
mod draft;
mod view;

pub use board::TodoBoard;
pub use draft::TodoDraft;
pub use view::TodoRow;

pub use todo_core::CompletionSummary;
