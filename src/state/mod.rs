//! Application state management module.
//!
//! This module contains the two state holders and their supporting types:
//! - `State`: the quest tracking state holder and app-wide UI state
//! - `QuestForm`: the quest creation/edit state holder
//! - Navigation types (View, QuestTab, StatusFilter)
//! - State error handling

mod error;
mod form;
mod navigation;
mod tracking;

pub use error::StateError;
pub use form::{FormField, QuestForm, RepeatKind};
pub use navigation::{QuestTab, StatusFilter, View};
pub use tracking::State;
