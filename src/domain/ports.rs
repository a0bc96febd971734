use crate::domain::model::PairingRound;
use crate::utils::error::Result;

/// Supplies the current roster, in file order.
pub trait CandidateSource {
    fn load_candidates(&self) -> Result<Vec<String>>;
}

pub trait HistoryStore {
    fn load_history(&self) -> Result<Vec<PairingRound>>;
    /// Keeps every existing round and adds `round` at the end.
    fn append_round(&self, round: &PairingRound) -> Result<()>;
}

/// 顯示提議並詢問是否接受
pub trait Confirmer {
    fn confirm(&mut self, rendered: &str) -> Result<bool>;
}
