pub mod announcement;
pub mod engine;
pub mod history;
pub mod potential;
pub mod selector;

pub use crate::domain::model::{Draw, Pair, PairingRound, Partner, Pairing, PotentialPairing};
pub use crate::domain::ports::{CandidateSource, Confirmer, HistoryStore};
pub use crate::utils::error::Result;
