//! Pure derivation of every displayed value from catalog + progress.
//!
//! Nothing here is cached: the screen calls [`derive_view`] every frame
//! with the latest snapshot, so the UI cannot drift from the state.

use crate::models::catalog::{BeatmapCatalog, MapEntry};
use crate::models::progress::ProgressState;
use crate::models::stats::{LevelProgress, OverallProgress, level_progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarGlyph {
    Full,
    Half,
    Empty,
}

/// Most glyphs a card ever draws.
pub const MAX_STARS: usize = 10;

/// `ceil(sr)` glyphs: `floor(sr)` full ones, then a half one when the
/// fractional part is at least 0.5, then empty ones. Capped at
/// [`MAX_STARS`].
pub fn star_glyphs(sr: f64) -> Vec<StarGlyph> {
    let sr = if sr.is_finite() { sr.max(0.0) } else { 0.0 };
    let full = (sr.floor() as usize).min(MAX_STARS);
    let has_half = sr.fract() >= 0.5;
    let total = (sr.ceil() as usize).min(MAX_STARS);

    (0..total)
        .map(|i| {
            if i < full {
                StarGlyph::Full
            } else if has_half && i == full {
                StarGlyph::Half
            } else {
                StarGlyph::Empty
            }
        })
        .collect()
}

/// Seconds per pendulum swing: one beat.
pub fn pendulum_period_secs(bpm: u32) -> f32 {
    if bpm == 0 { 0.0 } else { 60.0 / bpm as f32 }
}

/// Higher CS means smaller circles.
pub fn circle_diameter(cs: f64) -> f32 {
    (40.0 - cs * 4.0).max(16.0) as f32
}

pub fn length_bar_width(total_seconds: u32) -> f32 {
    (total_seconds as f32 / 5.0).clamp(20.0, 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallView {
    pub percentage: u32,
    pub completed: usize,
    pub total: usize,
    pub remaining: usize,
}

impl OverallView {
    pub fn bar_fraction(&self) -> f32 {
        self.percentage as f32 / 100.0
    }

    pub fn headline(&self) -> String {
        format!("{}% Complete", self.percentage)
    }
}

impl From<OverallProgress> for OverallView {
    fn from(p: OverallProgress) -> Self {
        Self {
            percentage: p.percentage,
            completed: p.completed,
            total: p.total,
            remaining: p.remaining,
        }
    }
}

/// One row of the sidebar level list.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRowView {
    pub name: String,
    /// `done/total (pct%) ★avg`
    pub progress_label: String,
    pub skipped: bool,
    pub active: bool,
}

impl LevelRowView {
    fn new(progress: &LevelProgress, active: bool) -> Self {
        Self {
            name: progress.name.clone(),
            progress_label: format!(
                "{}/{} ({}%) ★{:.2}",
                progress.completed,
                progress.total,
                progress.percentage,
                progress.average_star_rating
            ),
            skipped: progress.skipped,
            active,
        }
    }
}

/// Everything a song card needs, keyed by map id.
#[derive(Debug, Clone, PartialEq)]
pub struct SongCardView {
    pub map_id: String,
    pub name: String,
    pub url: String,
    pub mod_label: Option<String>,
    pub completed: bool,
    pub has_note: bool,
    pub sr_label: String,
    pub stars: Vec<StarGlyph>,
    pub bpm: u32,
    pub pendulum_period: f32,
    pub cs_label: String,
    pub circle_diameter: f32,
    pub length: String,
    pub length_bar_width: f32,
}

impl SongCardView {
    pub fn new(map: &MapEntry, progress: &ProgressState) -> Self {
        Self {
            map_id: map.id.clone(),
            name: map.name.clone(),
            url: map.url.clone(),
            mod_label: map.mod_label().map(str::to_string),
            completed: progress.is_completed(&map.id),
            has_note: !progress.note(&map.id).is_empty(),
            sr_label: format!("{:.2}", map.sr),
            stars: star_glyphs(map.sr),
            bpm: map.bpm,
            pendulum_period: pendulum_period_secs(map.bpm),
            cs_label: map.cs.to_string(),
            circle_diameter: circle_diameter(map.cs),
            length: map.length.clone(),
            length_bar_width: length_bar_width(map.length_seconds()),
        }
    }
}

/// Content of the notes dialog for one map.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesModalView {
    pub map_id: String,
    pub title: String,
    pub star_rating: String,
    pub bpm: String,
    /// `AR x | CS y | OD z`
    pub attributes: String,
    pub length: String,
    pub note: String,
}

impl NotesModalView {
    pub fn new(map: &MapEntry, progress: &ProgressState) -> Self {
        Self {
            map_id: map.id.clone(),
            title: map.name.clone(),
            star_rating: map.sr.to_string(),
            bpm: map.bpm.to_string(),
            attributes: format!("AR: {} | CS: {} | OD: {}", map.ar, map.cs, map.od),
            length: map.length.clone(),
            note: progress.note(&map.id).to_string(),
        }
    }
}

/// The whole screen, derived in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerView {
    pub overall: OverallView,
    pub levels: Vec<LevelRowView>,
    pub current_level: Option<String>,
    pub cards: Vec<SongCardView>,
    pub skip_options: Vec<String>,
}

pub fn derive_view(catalog: &BeatmapCatalog, progress: &ProgressState) -> TrackerView {
    let current = progress.view.current_level.as_deref();

    let levels = level_progress(catalog, progress)
        .iter()
        .map(|lp| LevelRowView::new(lp, current == Some(lp.name.as_str())))
        .collect();

    let cards = current
        .and_then(|name| catalog.level(name))
        .map(|level| {
            level
                .maps
                .iter()
                .map(|m| SongCardView::new(m, progress))
                .collect()
        })
        .unwrap_or_default();

    TrackerView {
        overall: OverallProgress::compute(catalog, progress).into(),
        levels,
        current_level: current.map(str::to_string),
        cards,
        skip_options: catalog.level_names().map(str::to_string).collect(),
    }
}

pub fn notes_modal_view(
    catalog: &BeatmapCatalog,
    progress: &ProgressState,
    map_id: &str,
) -> Option<NotesModalView> {
    catalog
        .find_map(map_id)
        .map(|map| NotesModalView::new(map, progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::tests::{map, three_dans};

    #[test]
    fn test_star_glyphs() {
        use StarGlyph::*;
        assert_eq!(star_glyphs(4.7), vec![Full, Full, Full, Full, Half]);
        assert_eq!(star_glyphs(4.3), vec![Full, Full, Full, Full, Empty]);
        assert_eq!(star_glyphs(3.0), vec![Full, Full, Full]);
        assert_eq!(star_glyphs(0.5), vec![Half]);
        assert!(star_glyphs(0.0).is_empty());
    }

    #[test]
    fn test_star_glyphs_are_capped() {
        assert_eq!(star_glyphs(1e9), vec![StarGlyph::Full; MAX_STARS]);
        assert_eq!(star_glyphs(12.5).len(), MAX_STARS);
        assert_eq!(star_glyphs(9.5).last(), Some(&StarGlyph::Half));
        assert!(star_glyphs(f64::INFINITY).is_empty());
        assert!(star_glyphs(f64::NAN).is_empty());
        assert!(star_glyphs(-3.0).is_empty());
    }

    #[test]
    fn test_stat_formulas_and_clamps() {
        assert!((pendulum_period_secs(120) - 0.5).abs() < 1e-6);
        assert_eq!(pendulum_period_secs(0), 0.0);

        assert_eq!(circle_diameter(4.0), 24.0);
        assert_eq!(circle_diameter(7.0), 16.0);
        assert_eq!(circle_diameter(0.0), 40.0);

        assert_eq!(length_bar_width(30), 20.0);
        assert_eq!(length_bar_width(250), 50.0);
        assert_eq!(length_bar_width(900), 100.0);
    }

    #[test]
    fn test_card_view() {
        let mut m = map("x", 4.7);
        m.mod_name = "DT".to_string();
        m.cs = 3.5;
        let mut progress = ProgressState::default();
        progress.toggle_completion("x");
        progress.set_note("x", "hi");

        let card = SongCardView::new(&m, &progress);
        assert!(card.completed);
        assert!(card.has_note);
        assert_eq!(card.mod_label.as_deref(), Some("DT"));
        assert_eq!(card.sr_label, "4.70");
        assert_eq!(card.cs_label, "3.5");
        assert_eq!(card.circle_diameter, 26.0);
        assert_eq!(card.length_bar_width, 30.0);
    }

    #[test]
    fn test_derive_view_for_current_level() {
        let catalog = three_dans();
        let mut progress = ProgressState::default();
        progress.skip_to_level(&catalog, "Dan2").unwrap();

        let view = derive_view(&catalog, &progress);
        assert_eq!(view.overall.percentage, 33);
        assert_eq!(view.overall.headline(), "33% Complete");
        assert_eq!(view.levels[0].progress_label, "2/2 (100%) ★3.50");
        assert!(view.levels[0].skipped);
        assert!(view.levels[1].active);
        assert_eq!(view.current_level.as_deref(), Some("Dan2"));
        let ids: Vec<_> = view.cards.iter().map(|c| c.map_id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
        assert_eq!(view.skip_options, vec!["Dan1", "Dan2", "Dan3"]);
    }

    #[test]
    fn test_no_cards_without_current_level() {
        let view = derive_view(&three_dans(), &ProgressState::default());
        assert!(view.cards.is_empty());
        assert!(view.levels.iter().all(|l| !l.active));
    }

    #[test]
    fn test_notes_modal_view() {
        let catalog = three_dans();
        let mut progress = ProgressState::default();
        progress.set_note("b2", "retry with HD");

        let modal = notes_modal_view(&catalog, &progress, "b2").unwrap();
        assert_eq!(modal.title, "Song b2");
        assert_eq!(modal.star_rating, "4.7");
        assert_eq!(modal.attributes, "AR: 9 | CS: 4 | OD: 8");
        assert_eq!(modal.note, "retry with HD");
        assert!(notes_modal_view(&catalog, &progress, "nope").is_none());
    }
}
