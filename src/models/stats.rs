//! Derived progress statistics.
//!
//! Everything here is computed by walking the catalog, so ids in the
//! completion set that no longer exist in the catalog never count.

use crate::models::catalog::{BeatmapCatalog, Level};
use crate::models::progress::ProgressState;

/// Rounded percentage of `done` over `total`, 0 when `total` is 0.
pub fn percentage(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * done as f64 / total as f64).round() as u32
}

/// Per-level completion summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProgress {
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
    pub average_star_rating: f64,
    pub skipped: bool,
}

impl LevelProgress {
    pub fn compute(level: &Level, progress: &ProgressState) -> Self {
        let total = level.maps.len();
        let completed = level
            .maps
            .iter()
            .filter(|m| progress.is_completed(&m.id))
            .count();
        let average_star_rating = if total == 0 {
            0.0
        } else {
            level.maps.iter().map(|m| m.sr).sum::<f64>() / total as f64
        };

        Self {
            name: level.name.clone(),
            completed,
            total,
            percentage: percentage(completed, total),
            average_star_rating,
            skipped: progress.is_skipped(&level.name),
        }
    }
}

/// Whole-catalog completion summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverallProgress {
    pub completed: usize,
    pub total: usize,
    pub remaining: usize,
    pub percentage: u32,
}

impl OverallProgress {
    pub fn compute(catalog: &BeatmapCatalog, progress: &ProgressState) -> Self {
        let (completed, total) = catalog.levels().iter().fold((0, 0), |(done, all), level| {
            let level_done = level
                .maps
                .iter()
                .filter(|m| progress.is_completed(&m.id))
                .count();
            (done + level_done, all + level.maps.len())
        });

        Self {
            completed,
            total,
            remaining: total - completed,
            percentage: percentage(completed, total),
        }
    }
}

pub fn level_progress(catalog: &BeatmapCatalog, progress: &ProgressState) -> Vec<LevelProgress> {
    catalog
        .levels()
        .iter()
        .map(|level| LevelProgress::compute(level, progress))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::tests::three_dans;

    #[test]
    fn test_percentage_rounding_and_zero_total() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(6, 6), 100);
    }

    #[test]
    fn test_level_progress() {
        let catalog = three_dans();
        let mut progress = ProgressState::default();
        progress.toggle_completion("b2");
        progress.skipped_levels.insert("Dan1".to_string());

        let levels = level_progress(&catalog, &progress);
        assert_eq!(levels.len(), 3);
        assert!(levels[0].skipped);
        assert_eq!(levels[1].completed, 1);
        assert_eq!(levels[1].total, 2);
        assert_eq!(levels[1].percentage, 50);
        assert!((levels[1].average_star_rating - 4.4).abs() < 1e-9);
    }

    #[test]
    fn test_empty_level_has_no_nan() {
        let level = Level::new("Empty", vec![]);
        let lp = LevelProgress::compute(&level, &ProgressState::default());
        assert_eq!(lp.percentage, 0);
        assert_eq!(lp.average_star_rating, 0.0);
    }

    #[test]
    fn test_overall_ignores_dangling_ids() {
        let catalog = three_dans();
        let mut progress = ProgressState::default();
        progress.toggle_completion("a1");
        progress.toggle_completion("gone");

        let overall = OverallProgress::compute(&catalog, &progress);
        assert_eq!(overall.completed, 1);
        assert_eq!(overall.total, 6);
        assert_eq!(overall.remaining, 5);
        assert_eq!(overall.percentage, 17);

        let empty = OverallProgress::compute(&BeatmapCatalog::default(), &progress);
        assert_eq!(empty, OverallProgress::default());
    }
}
