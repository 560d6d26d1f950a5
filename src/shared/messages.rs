//! Messages flowing from the UI to the logic thread.

use std::path::PathBuf;

/// A user intent, applied by the logic thread in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerAction {
    ShowLevel(String),
    ToggleCompletion(String),
    SetNote { map_id: String, text: String },
    SkipToLevel(String),
    /// Sent only after the user confirmed the reset dialog.
    ResetAll,
    Export(PathBuf),
    Import(PathBuf),
    /// Clears the notice with this id; a newer notice stays up.
    DismissNotice(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient, dismissible message shown on top of the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}
