//! Shared channel infrastructure between the window thread and the logic thread.

use crate::shared::messages::TrackerAction;
use crate::shared::snapshot::RenderState;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// System-level events sent by the window.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Window closed; the logic thread saves and stops.
    Quit,
}

/// Aggregates the cross-thread communication channels.
///
/// - UI → Logic: user actions from the tracker screen
/// - Logic → Render: state snapshots
/// - Main → Logic: system events
#[derive(Clone)]
pub struct SystemBus {
    pub action_tx: Sender<TrackerAction>,
    pub action_rx: Receiver<TrackerAction>,

    /// Unbounded: the logic thread only publishes after an action, so a
    /// dropped snapshot would leave the screen stale. The renderer keeps
    /// the last one it drains.
    pub render_tx: Sender<RenderState>,
    pub render_rx: Receiver<RenderState>,

    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (action_tx, action_rx) = unbounded();
        let (render_tx, render_rx) = unbounded();
        let (sys_tx, sys_rx) = unbounded();

        Self {
            action_tx,
            action_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
