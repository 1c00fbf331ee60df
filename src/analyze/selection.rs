use crate::analyze::relevance::RelevanceMap;
use crate::types::system::{SystemCapability, SystemId, NO_SYSTEM};
use tracing::debug;

/// Suitability above `1 - SUITABILITY_EPSILON` counts as perfect,
/// at or below `SUITABILITY_EPSILON` as useless.
pub const SUITABILITY_EPSILON: f64 = 1e-6;

/// Aim for the best 5% of the catalog, at least one system.
pub fn default_target(total_systems: usize) -> usize {
    total_systems.div_ceil(20)
}

/// Sum of the relevances of all formats the system can read.
pub fn suitability(system: &SystemCapability, relevances: &RelevanceMap) -> f64 {
    relevances
        .iter()
        .filter(|(format_id, _)| system.readable(format_id))
        .map(|(_, relevance)| relevance)
        .sum()
}

/// Ranked systems recommended for one disk.
///
/// Every perfect system is chosen, in catalog order. If that leaves the list
/// short of the target, the best remaining partial systems are appended by
/// decreasing suitability. Systems with no suitability are never chosen.
#[derive(Debug, Clone, Default)]
pub struct SystemChoice {
    chosen: Vec<SystemId>,
}

impl SystemChoice {
    #[cfg(test)]
    pub fn new(systems: &mut [SystemCapability], relevances: &RelevanceMap) -> Self {
        Self::with_target(systems, relevances, None)
    }

    /// `target` overrides the default 5% share when given.
    pub fn with_target(
        systems: &mut [SystemCapability],
        relevances: &RelevanceMap,
        target: Option<usize>,
    ) -> Self {
        let signal: f64 = relevances.values().sum();
        if systems.is_empty() || relevances.is_empty() || signal <= SUITABILITY_EPSILON {
            // Scores from an earlier run must not survive this one.
            for system in systems.iter_mut() {
                system.set_suitability(0.0);
            }
            return Self::default();
        }

        let mut chosen = Vec::new();
        let mut candidates: Vec<(SystemId, f64)> = Vec::new();
        for system in systems.iter_mut() {
            let score = suitability(system, relevances);
            system.set_suitability(score);

            if score > 1.0 - SUITABILITY_EPSILON {
                chosen.push(system.id());
            } else if score > SUITABILITY_EPSILON {
                candidates.push((system.id(), score));
            }
        }

        let target = target.unwrap_or_else(|| default_target(systems.len()));
        while chosen.len() < target {
            let Some(position) = best_candidate(&candidates) else {
                break;
            };
            chosen.push(candidates.remove(position).0);
        }

        debug!(
            systems = systems.len(),
            chosen = chosen.len(),
            target,
            "selected systems"
        );
        Self { chosen }
    }

    pub fn chosen(&self) -> &[SystemId] {
        &self.chosen
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn best_system(&self) -> Option<SystemId> {
        self.chosen.first().copied()
    }

    /// Chosen ids in ranking order, or `[-1]` when nothing is useful.
    pub fn choose_systems(&self) -> Vec<i64> {
        if self.chosen.is_empty() {
            return vec![NO_SYSTEM];
        }
        self.chosen.iter().map(|id| id.as_wire()).collect()
    }
}

/// Position of the first candidate with the strictly highest useful score.
fn best_candidate(candidates: &[(SystemId, f64)]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, (_, score)) in candidates.iter().enumerate() {
        if *score > best.map_or(0.0, |(_, top)| top) {
            best = Some((position, *score));
        }
    }
    best.filter(|(_, score)| *score > SUITABILITY_EPSILON)
        .map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::system::SystemCatalog;

    fn relevances(entries: &[(&str, f64)]) -> RelevanceMap {
        entries
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect()
    }

    fn catalog(readable: &[&[&str]]) -> SystemCatalog {
        let mut catalog = SystemCatalog::new();
        for formats in readable {
            catalog.push(None, formats.iter().copied(), std::iter::empty::<&str>());
        }
        catalog
    }

    #[test]
    fn empty_catalog_or_map_yields_no_system() {
        let mut empty = SystemCatalog::new();
        let choice = SystemChoice::new(empty.systems_mut(), &relevances(&[("A", 1.0)]));
        assert_eq!(choice.best_system(), None);
        assert_eq!(choice.choose_systems(), vec![NO_SYSTEM]);

        let mut systems = catalog(&[&["A"]]);
        let choice = SystemChoice::new(systems.systems_mut(), &RelevanceMap::new());
        assert_eq!(choice.choose_systems(), vec![-1]);

        let choice = SystemChoice::new(systems.systems_mut(), &relevances(&[("A", 0.0)]));
        assert!(choice.is_empty());
    }

    #[test]
    fn run_without_signal_clears_previous_suitability() {
        let mut systems = catalog(&[&["A"], &["B"]]);
        let choice = SystemChoice::new(systems.systems_mut(), &relevances(&[("A", 1.0)]));
        assert_eq!(choice.best_system(), Some(SystemId(0)));
        assert_eq!(systems.systems()[0].suitability(), 1.0);

        let choice = SystemChoice::new(systems.systems_mut(), &relevances(&[("A", 0.0)]));
        assert!(choice.is_empty());
        assert!(systems.systems().iter().all(|s| s.suitability() == 0.0));

        SystemChoice::new(systems.systems_mut(), &relevances(&[("B", 1.0)]));
        SystemChoice::new(systems.systems_mut(), &RelevanceMap::new());
        assert_eq!(systems.systems()[1].suitability(), 0.0);
    }

    #[test]
    fn higher_scoring_partial_system_wins_single_slot() {
        let mut systems = catalog(&[&["B"], &["A"]]);
        let map = relevances(&[("A", 0.6), ("B", 0.4)]);
        let choice = SystemChoice::with_target(systems.systems_mut(), &map, Some(1));

        assert_eq!(choice.best_system(), Some(SystemId(1)));
        assert_eq!(choice.choose_systems(), vec![1]);
        assert!((systems.systems()[0].suitability() - 0.4).abs() < 1e-12);
        assert!((systems.systems()[1].suitability() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn all_perfect_systems_are_chosen_beyond_target() {
        let mut systems = catalog(&[&["A"], &["A", "B"], &["A", "B"], &["A", "B", "C"]]);
        let map = relevances(&[("A", 0.5), ("B", 0.5)]);
        let choice = SystemChoice::new(systems.systems_mut(), &map);

        assert_eq!(choice.chosen(), &[SystemId(1), SystemId(2), SystemId(3)]);
    }

    #[test]
    fn useless_systems_are_never_chosen() {
        let mut systems = catalog(&[&["X"], &["Y"]]);
        let map = relevances(&[("A", 1.0)]);
        let choice = SystemChoice::with_target(systems.systems_mut(), &map, Some(2));
        assert!(choice.is_empty());
        assert_eq!(choice.choose_systems(), vec![NO_SYSTEM]);
    }

    #[test]
    fn candidates_fill_to_target_by_decreasing_score() {
        let mut systems = catalog(&[&["C"], &["A"], &["B"], &["X"]]);
        let map = relevances(&[("A", 0.5), ("B", 0.3), ("C", 0.2)]);
        let choice = SystemChoice::with_target(systems.systems_mut(), &map, Some(4));

        // X is useless, so the list stops short of the target
        assert_eq!(choice.choose_systems(), vec![1, 2, 0]);
    }

    #[test]
    fn ties_prefer_catalog_order() {
        let mut systems = catalog(&[&["B"], &["A"], &["A"]]);
        let map = relevances(&[("A", 0.5), ("B", 0.5)]);
        let choice = SystemChoice::with_target(systems.systems_mut(), &map, Some(1));
        assert_eq!(choice.best_system(), Some(SystemId(0)));
    }

    #[test]
    fn perfect_systems_precede_candidates() {
        let mut systems = catalog(&[&["A"], &["A", "B"]]);
        let map = relevances(&[("A", 0.7), ("B", 0.3)]);
        let choice = SystemChoice::with_target(systems.systems_mut(), &map, Some(2));
        assert_eq!(choice.choose_systems(), vec![1, 0]);
    }

    #[test]
    fn default_target_is_five_percent_rounded_up() {
        assert_eq!(default_target(0), 0);
        assert_eq!(default_target(1), 1);
        assert_eq!(default_target(20), 1);
        assert_eq!(default_target(21), 2);
        assert_eq!(default_target(100), 5);
    }

    #[test]
    fn unknown_relevance_does_not_count() {
        let mut systems = catalog(&[&["UNKNOWN", "A"]]);
        let map = relevances(&[("A", 1.0), ("UNKNOWN", 0.0)]);
        let choice = SystemChoice::new(systems.systems_mut(), &map);
        assert_eq!(choice.best_system(), Some(SystemId(0)));
        assert!((systems.systems()[0].suitability() - 1.0).abs() < 1e-12);
    }
}
