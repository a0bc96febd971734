// Adapters layer: concrete implementations of the domain ports (files, terminal).

pub mod prompt;
pub mod storage;

pub use prompt::{AutoConfirm, PromptConfirmer};
pub use storage::{FileCandidateSource, JsonHistoryStore};
