use crate::domain::model::{Draw, Pairing, PotentialPairing};
use rand::seq::SliceRandom;
use rand::Rng;

/// Who sits out when the roster has an odd number of people.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ByePolicy {
    /// The named organizer always sits out.
    Organizer(String),
    /// The candidate with the most rounds played sits out. Ties go to the
    /// earliest roster entry.
    #[default]
    MostPlayed,
    Random,
}

#[derive(Debug, Clone, Default)]
pub struct PairingSelector {
    bye_policy: ByePolicy,
}

impl PairingSelector {
    pub fn new(bye_policy: ByePolicy) -> Self {
        Self { bye_policy }
    }

    /// Greedy random draw. People with the fewest options are served first.
    ///
    /// A candidate left with nobody to pair with gets an `Unmatched` entry;
    /// the caller decides whether to redraw.
    pub fn select<R: Rng + ?Sized>(&self, potentials: &[PotentialPairing], rng: &mut R) -> Draw {
        let mut draw = Draw::default();

        if potentials.len() % 2 == 1 {
            if let Some(name) = self.choose_bye(potentials, rng) {
                tracing::debug!("Odd roster of {}, {} sits out", potentials.len(), name);
                draw.pairings.push(Pairing::sits_out(name));
            }
        }

        // 穩定排序：選擇最少的人先配，同數量維持名單順序
        let mut ordered: Vec<&PotentialPairing> = potentials.iter().collect();
        ordered.sort_by_key(|p| p.partners.len());

        for candidate in ordered {
            if draw.is_assigned(&candidate.name) {
                continue;
            }

            let remaining: Vec<&String> = candidate
                .partners
                .iter()
                .filter(|partner| !draw.is_assigned(partner))
                .collect();

            match remaining.choose(rng) {
                Some(buddy) => {
                    draw.pairings
                        .push(Pairing::buddy(candidate.name.clone(), (*buddy).clone()));
                }
                None => {
                    tracing::debug!("No partner left for {}", candidate.name);
                    draw.pairings.push(Pairing::unmatched(candidate.name.clone()));
                }
            }
        }

        draw
    }

    fn choose_bye<R: Rng + ?Sized>(
        &self,
        potentials: &[PotentialPairing],
        rng: &mut R,
    ) -> Option<String> {
        match &self.bye_policy {
            ByePolicy::Organizer(organizer) => {
                if !potentials.iter().any(|p| &p.name == organizer) {
                    tracing::warn!(
                        "⚠️ Organizer {} is not on the roster, someone will be left unmatched",
                        organizer
                    );
                }
                Some(organizer.clone())
            }
            ByePolicy::MostPlayed => potentials
                .iter()
                .fold(None::<&PotentialPairing>, |best, p| match best {
                    Some(b) if b.play_count >= p.play_count => Some(b),
                    _ => Some(p),
                })
                .map(|p| p.name.clone()),
            ByePolicy::Random => potentials.choose(rng).map(|p| p.name.clone()),
        }
    }
}
