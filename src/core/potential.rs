use crate::core::history::PreviousPairings;
use crate::domain::model::PotentialPairing;

/// For every candidate, the other candidates they have not had lunch with yet.
///
/// Names are assumed unique; the roster is validated before it gets here.
pub fn build_potential_pairings(
    candidates: &[String],
    previous: &PreviousPairings,
) -> Vec<PotentialPairing> {
    candidates
        .iter()
        .map(|name| {
            let partners = candidates
                .iter()
                .filter(|other| *other != name && !previous.have_paired(name, other))
                .cloned()
                .collect::<Vec<_>>();

            PotentialPairing {
                name: name.clone(),
                partners,
                play_count: previous.play_count(name),
            }
        })
        .collect()
}

/// 第一次參加的人，依名字排序（不分大小寫）
pub fn first_timers(potentials: &[PotentialPairing]) -> Vec<String> {
    let mut names: Vec<String> = potentials
        .iter()
        .filter(|p| p.is_first_timer())
        .map(|p| p.name.clone())
        .collect();
    names.sort_by_key(|name| name.to_lowercase());
    names
}
