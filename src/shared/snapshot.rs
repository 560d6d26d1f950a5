//! Render snapshots for inter-thread communication.
//!
//! Snapshots are immutable captures of tracker state sent from the logic
//! thread to the render thread. The catalog never changes after startup so
//! it is shared behind an `Arc`.

use std::sync::Arc;

use crate::models::catalog::BeatmapCatalog;
use crate::models::progress::ProgressState;
use crate::shared::messages::Notice;

#[derive(Clone, Debug)]
pub enum RenderState {
    /// Nothing received from the logic thread yet.
    Empty,
    Tracker(TrackerSnapshot),
}

#[derive(Clone, Debug)]
pub struct TrackerSnapshot {
    pub catalog: Arc<BeatmapCatalog>,
    pub progress: ProgressState,
    pub notice: Option<Notice>,
}
