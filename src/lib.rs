pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AutoConfirm, FileCandidateSource, JsonHistoryStore, PromptConfirmer};
pub use config::AppConfig;
pub use core::engine::{DrawEngine, DrawOutcome, DrawSettings};
pub use core::selector::{ByePolicy, PairingSelector};
pub use utils::error::{BuddyError, Result};
