use crate::domain::model::PairingRound;
use std::collections::{BTreeMap, BTreeSet};

/// Who has already had lunch with whom, derived from the full history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousPairings {
    partners: BTreeMap<String, BTreeSet<String>>,
    rounds_played: BTreeMap<String, usize>,
}

impl PreviousPairings {
    pub fn from_rounds(rounds: &[PairingRound]) -> Self {
        let mut index = Self::default();

        for round in rounds {
            let mut played_this_round = BTreeSet::new();

            for pair in &round.buddies {
                index.record(&pair.0, &pair.1);
                index.record(&pair.1, &pair.0);
                played_this_round.insert(pair.0.as_str());
                played_this_round.insert(pair.1.as_str());
            }

            // 每輪每人只算一次
            for name in played_this_round {
                *index.rounds_played.entry(name.to_string()).or_insert(0) += 1;
            }
        }

        tracing::debug!(
            "Aggregated {} round(s) covering {} people",
            rounds.len(),
            index.partners.len()
        );

        index
    }

    fn record(&mut self, person: &str, buddy: &str) {
        self.partners
            .entry(person.to_string())
            .or_default()
            .insert(buddy.to_string());
    }

    pub fn partners_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.partners.get(name)
    }

    pub fn have_paired(&self, a: &str, b: &str) -> bool {
        self.partners
            .get(a)
            .map(|set| set.contains(b))
            .unwrap_or(false)
    }

    pub fn play_count(&self, name: &str) -> usize {
        self.rounds_played.get(name).copied().unwrap_or(0)
    }

    pub fn people(&self) -> impl Iterator<Item = &str> {
        self.partners.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}
